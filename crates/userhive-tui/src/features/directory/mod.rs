//! Directory feature slice (paginated user list with search).

mod render;
mod state;
mod update;

pub use render::render_directory;
pub use state::{DirectoryState, FetchStatus, SearchState};
pub use update::{
    DirectoryRequest, handle_key, handle_mirror_loaded, handle_page_fetched, handle_paste,
    handle_user_deleted, handle_user_updated, start_fetch,
};
