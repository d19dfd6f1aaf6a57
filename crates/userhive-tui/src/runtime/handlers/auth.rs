use userhive_core::api::DirectoryClient;

use crate::events::{LoginUiEvent, UiEvent};

/// Exchanges credentials for a session.
pub async fn login(client: DirectoryClient, email: String, password: String) -> UiEvent {
    match client.login(&email, &password).await {
        Ok(session) => UiEvent::Login(LoginUiEvent::Succeeded(session)),
        Err(e) => UiEvent::Login(LoginUiEvent::Failed(e.to_string())),
    }
}
