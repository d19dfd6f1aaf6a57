//! Directory request handlers.

use userhive_core::api::DirectoryClient;
use userhive_core::models::UserUpdate;

use crate::events::{DirectoryUiEvent, UiEvent};

/// Fetches one page of users.
pub async fn fetch_page(client: DirectoryClient, page: u32) -> UiEvent {
    let result = client.list_users(page).await.map_err(|e| e.to_string());
    UiEvent::Directory(DirectoryUiEvent::PageFetched { page, result })
}

/// Sends an edit draft. The server's echo is only logged; the draft is what
/// gets applied to the resident page.
pub async fn update_user(client: DirectoryClient, id: u64, update: UserUpdate) -> UiEvent {
    let result = client
        .update_user(id, &update)
        .await
        .map(|echo| {
            tracing::debug!(id, updated_at = ?echo.updated_at, "update acknowledged");
        })
        .map_err(|e| e.to_string());
    UiEvent::Directory(DirectoryUiEvent::UserUpdated { id, update, result })
}

/// Deletes a user.
pub async fn delete_user(client: DirectoryClient, id: u64) -> UiEvent {
    let result = client.delete_user(id).await.map_err(|e| e.to_string());
    UiEvent::Directory(DirectoryUiEvent::UserDeleted { id, result })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A client pointed at a port nothing listens on, if one can be reserved.
    fn unreachable_client() -> Option<DirectoryClient> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").ok()?;
        let port = listener.local_addr().ok()?.port();
        drop(listener);
        DirectoryClient::new(&format!("http://127.0.0.1:{port}/api"), None).ok()
    }

    #[tokio::test]
    async fn test_fetch_failure_carries_requested_page_and_message() {
        let Some(client) = unreachable_client() else {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        };
        let event = fetch_page(client, 2).await;
        match event {
            UiEvent::Directory(DirectoryUiEvent::PageFetched { page, result }) => {
                assert_eq!(page, 2);
                assert_eq!(
                    result.expect_err("transport failure"),
                    "An error occurred while fetching users"
                );
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_failure_keeps_draft() {
        let draft = UserUpdate {
            first_name: "Janet".to_string(),
            last_name: "Weaver".to_string(),
            email: None,
        };
        let Some(client) = unreachable_client() else {
            eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
            return;
        };
        let event = update_user(client, 2, draft.clone()).await;
        match event {
            UiEvent::Directory(DirectoryUiEvent::UserUpdated { id, update, result }) => {
                assert_eq!(id, 2);
                assert_eq!(update, draft);
                assert_eq!(
                    result.expect_err("transport failure"),
                    "An error occurred while updating user"
                );
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
