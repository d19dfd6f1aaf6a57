use userhive_core::directory::ResidentPage;
use userhive_core::models::User;

/// Page fetch status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The last fetch failed; resident items are left as they were.
    Errored(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchStatus::Errored(message) => Some(message),
            _ => None,
        }
    }
}

/// Search box state. The query filters the resident page only.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    /// Keystrokes go to the query while true.
    pub editing: bool,
}

/// Directory view state.
#[derive(Debug, Clone, Default)]
pub struct DirectoryState {
    pub resident: ResidentPage,
    pub fetch: FetchStatus,
    pub search: SearchState,
    /// Index into the filtered view.
    pub selected: usize,
    /// Error from the last edit/delete action shown above the list.
    pub action_error: Option<String>,
    /// True while the resident page came from the mirror and has not been
    /// replaced by a fetch yet.
    pub from_mirror: bool,
}

impl DirectoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> u32 {
        self.resident.pagination().page()
    }

    /// Returns the users matching the search query, in resident order.
    pub fn visible(&self) -> Vec<&User> {
        self.resident.filtered(&self.search.query)
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.visible().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keeps the selection inside the filtered view.
    pub fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}
