//! Login / logout command handlers.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use userhive_core::api::DirectoryClient;
use userhive_core::config::Config;
use userhive_core::session::SessionStore;

pub async fn login(config: &Config, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    if email.trim().is_empty() || password.is_empty() {
        anyhow::bail!("Email and password are required");
    }

    let client = DirectoryClient::from_config(config)?;
    let session = client.login(email.trim(), &password).await?;

    let store = SessionStore::default();
    store.save(&session).context("store session")?;
    tracing::info!(path = %store.path().display(), "session stored");
    println!("Logged in as {} ({})", email.trim(), session.masked_token());
    Ok(())
}

pub fn logout() -> Result<()> {
    let store = SessionStore::default();
    if store.clear().context("clear session")? {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}

/// Reads one line from stdin, prompting when attached to a terminal.
fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        let mut err = io::stderr();
        write!(err, "Password: ")?;
        err.flush()?;
    }

    let mut line = String::new();
    stdin.lock().read_line(&mut line).context("read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
