//! Local mirror of the last resident page.
//!
//! The mirror is a non-authoritative copy used to paint the directory
//! immediately on startup. Every write goes to two stores: a persistent file
//! (`<home>/mirror.json`) and a session-scoped copy held in memory for the
//! life of the process. Reads prefer the file and fall back to the session
//! copy. All failures are logged and swallowed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::paths;
use crate::models::Page;

/// Best-effort two-level page mirror.
#[derive(Debug, Clone)]
pub struct MirrorCache {
    path: PathBuf,
    session: Option<Page>,
}

impl Default for MirrorCache {
    fn default() -> Self {
        Self::new(paths::mirror_path())
    }
}

impl MirrorCache {
    /// Creates a mirror whose persistent copy lives at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            session: None,
        }
    }

    /// Returns the persistent file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the mirrored page, if any.
    ///
    /// The returned page is normalized: `total_pages` is at least 1 and
    /// `page` is clamped into `[1, total_pages]`.
    pub fn read_page(&self) -> Option<Page> {
        let persisted = match self.read_persisted() {
            Ok(page) => page,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "ignoring unreadable page mirror");
                None
            }
        };

        persisted.or_else(|| self.session.clone()).map(normalize)
    }

    /// Writes the page to both stores.
    pub fn write_page(&mut self, page: &Page) {
        self.session = Some(page.clone());

        match self.write_persisted(page) {
            Ok(()) => tracing::debug!(
                page = page.page,
                total_pages = page.total_pages,
                items = page.items.len(),
                "page mirrored"
            ),
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "failed to persist page mirror");
            }
        }
    }

    fn read_persisted(&self) -> Result<Option<Page>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read mirror from {}", self.path.display()))?;
        let page = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse mirror from {}", self.path.display()))?;
        Ok(Some(page))
    }

    fn write_persisted(&self, page: &Page) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let contents = serde_json::to_string(page).context("Failed to serialize mirror")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write mirror to {}", self.path.display()))
    }
}

fn normalize(mut page: Page) -> Page {
    page.total_pages = page.total_pages.max(1);
    page.page = page.page.clamp(1, page.total_pages);
    page
}
