//! Pure directory rules: pagination bounds, search filter, and resident-page
//! mutations.
//!
//! Nothing here performs I/O. The TUI reducer and the CLI both build on these
//! types so the invariants hold in one place:
//! - `page` stays within `[1, total_pages]`
//! - resident items keep server order
//! - search derives a filtered view without touching the resident list

use crate::models::{Page, User, UserUpdate};

/// Page cursor with bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
        }
    }
}

impl Pagination {
    /// Creates a cursor, normalizing out-of-range input.
    pub fn new(page: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            page: page.clamp(1, total_pages),
            total_pages,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Moves to the previous page. Returns whether the page changed.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Moves to the next page. Returns whether the page changed.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }
}

/// Returns whether `user` matches a search term.
///
/// Case-insensitive substring match on first name, last name, or email.
/// An empty term matches every user.
pub fn matches_search(user: &User, term: &str) -> bool {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    user.first_name.to_lowercase().contains(&needle)
        || user.last_name.to_lowercase().contains(&needle)
        || user
            .email
            .as_deref()
            .is_some_and(|email| email.to_lowercase().contains(&needle))
}

/// Returns the users matching `term`, in their original order.
pub fn filter_users<'a>(users: &'a [User], term: &str) -> Vec<&'a User> {
    users.iter().filter(|u| matches_search(u, term)).collect()
}

/// The single page of users held in view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResidentPage {
    items: Vec<User>,
    pagination: Pagination,
}

impl ResidentPage {
    pub fn items(&self) -> &[User] {
        &self.items
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: u64) -> Option<&User> {
        self.items.iter().find(|u| u.id == id)
    }

    /// Replaces the resident items with a fetched page.
    ///
    /// The previous items are discarded; the cursor follows the page.
    pub fn replace_page(&mut self, page: Page) {
        self.pagination = Pagination::new(page.page, page.total_pages);
        self.items = page.items;
    }

    /// Applies a successful update in place, preserving order.
    /// Returns false if no resident item has `id`.
    pub fn apply_update(&mut self, id: u64, update: &UserUpdate) -> bool {
        match self.items.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                *user = user.with_update(update);
                true
            }
            None => false,
        }
    }

    /// Removes a deleted user. Returns the removed record, if present.
    pub fn remove(&mut self, id: u64) -> Option<User> {
        let index = self.items.iter().position(|u| u.id == id)?;
        Some(self.items.remove(index))
    }

    /// Returns the filtered view for a search term.
    pub fn filtered(&self, term: &str) -> Vec<&User> {
        filter_users(&self.items, term)
    }

    /// Returns a snapshot suitable for mirroring.
    pub fn to_page(&self) -> Page {
        Page {
            items: self.items.clone(),
            page: self.pagination.page(),
            total_pages: self.pagination.total_pages(),
        }
    }
}
