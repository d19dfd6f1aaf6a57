//! User command handlers.
//!
//! Every command requires a stored session. Successful results are
//! reflected in the local mirror so the TUI repaints them on its next start.

use anyhow::{Result, anyhow};
use userhive_core::api::DirectoryClient;
use userhive_core::config::Config;
use userhive_core::directory::ResidentPage;
use userhive_core::mirror::MirrorCache;
use userhive_core::models::{Page, UserUpdate};
use userhive_core::session::SessionStore;

/// Field overrides for `users update`. Missing fields come from the mirror.
#[derive(Debug, Default)]
pub struct UpdateFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

fn require_session() -> Result<()> {
    match SessionStore::default().load()? {
        Some(_) => Ok(()),
        None => Err(anyhow!("Not logged in. Run `userhive login --email <EMAIL>` first.")),
    }
}

pub async fn list(config: &Config, page: u32) -> Result<()> {
    require_session()?;
    let client = DirectoryClient::from_config(config)?;
    let fetched = client.list_users(page).await?;
    tracing::debug!(page = fetched.page, items = fetched.items.len(), "page listed");

    MirrorCache::default().write_page(&fetched);
    print_page(&fetched);
    Ok(())
}

pub async fn update(config: &Config, id: u64, fields: UpdateFields) -> Result<()> {
    require_session()?;

    let mut mirror = MirrorCache::default();
    let mirrored = mirror.read_page();
    let current = mirrored
        .as_ref()
        .and_then(|page| page.items.iter().find(|u| u.id == id));

    let draft = build_draft(id, current.map(UserUpdate::from), fields)?;

    let client = DirectoryClient::from_config(config)?;
    let echo = client.update_user(id, &draft).await?;

    if let Some(page) = mirrored {
        let mut resident = ResidentPage::default();
        resident.replace_page(page);
        if resident.apply_update(id, &draft) {
            mirror.write_page(&resident.to_page());
        }
    }

    match echo.updated_at {
        Some(at) => println!("Updated user {id} at {at}"),
        None => println!("Updated user {id}"),
    }
    Ok(())
}

pub async fn delete(config: &Config, id: u64) -> Result<()> {
    require_session()?;
    let client = DirectoryClient::from_config(config)?;
    client.delete_user(id).await?;

    let mut mirror = MirrorCache::default();
    if let Some(page) = mirror.read_page() {
        let mut resident = ResidentPage::default();
        resident.replace_page(page);
        if resident.remove(id).is_some() {
            mirror.write_page(&resident.to_page());
        }
    }

    println!("Deleted user {id}");
    Ok(())
}

/// Builds the full update body from overrides and the mirrored record.
fn build_draft(id: u64, base: Option<UserUpdate>, fields: UpdateFields) -> Result<UserUpdate> {
    let base = base.unwrap_or_default();
    let first_name = fields.first_name.unwrap_or(base.first_name);
    let last_name = fields.last_name.unwrap_or(base.last_name);
    let email = match fields.email {
        Some(email) if email.trim().is_empty() => None,
        Some(email) => Some(email.trim().to_string()),
        None => base.email,
    };

    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        anyhow::bail!(
            "First and last name are required (user {id} is not in the local mirror; \
             pass --first-name and --last-name)"
        );
    }

    Ok(UserUpdate {
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        email,
    })
}

fn print_page(page: &Page) {
    if page.items.is_empty() {
        println!("No users found");
    } else {
        println!("{:<6} {:<28} EMAIL", "ID", "NAME");
        for user in &page.items {
            println!(
                "{:<6} {:<28} {}",
                user.id,
                user.full_name(),
                user.email.as_deref().unwrap_or("-")
            );
        }
    }
    println!();
    println!("Page {} of {}", page.page, page.total_pages);
}
