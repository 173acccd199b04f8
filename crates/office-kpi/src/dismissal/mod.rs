//! Client-local throttle that hides suggestion categories a user keeps dismissing.
//!
//! Each dismissal bumps a persisted per-category counter. A category that reaches
//! [`DISMISSAL_THRESHOLD`] is blacklisted for good on that client; nothing decays
//! or resets the counter short of clearing the store.

mod store;

pub use store::{DismissalCounts, DismissalStore, InMemoryStore, JsonFileStore};

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::debug;

pub const DISMISSAL_THRESHOLD: u32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum DismissalError {
    #[error("dismissal store io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dismissal store at {path} is not valid JSON: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Throttle over a [`DismissalStore`].
///
/// Nothing is cached: every query and every dismissal reads the store, so several
/// throttles sharing one file see each other's counts.
pub struct DismissalThrottle<S> {
    store: S,
}

impl<S: DismissalStore> DismissalThrottle<S> {
    /// Wraps `store`, failing early when its current contents cannot be read.
    pub fn open(store: S) -> Result<Self, DismissalError> {
        store.load()?;
        Ok(Self { store })
    }

    /// Counts one more dismissal of `category` and persists it, returning the new count.
    ///
    /// The counter is re-read before incrementing. A failed save leaves the stored
    /// count untouched.
    pub fn record_dismissal(&self, category: &str) -> Result<u32, DismissalError> {
        let mut counts = self.store.load()?;
        let count = counts
            .get(category)
            .copied()
            .unwrap_or(0)
            .saturating_add(1);
        counts.insert(category.to_string(), count);
        self.store.save(&counts)?;

        if count == DISMISSAL_THRESHOLD {
            debug!(category, "suggestion category blacklisted");
        }
        Ok(count)
    }

    pub fn dismissals(&self, category: &str) -> Result<u32, DismissalError> {
        Ok(self.store.load()?.get(category).copied().unwrap_or(0))
    }

    pub fn is_blacklisted(&self, category: &str) -> Result<bool, DismissalError> {
        Ok(self.dismissals(category)? >= DISMISSAL_THRESHOLD)
    }

    pub fn current_blacklist(&self) -> Result<BTreeSet<String>, DismissalError> {
        Ok(blacklist_of(&self.store.load()?))
    }

    /// Drops fetched suggestions whose category is blacklisted.
    pub fn filter<T, F>(&self, suggestions: Vec<T>, category_of: F) -> Result<Vec<T>, DismissalError>
    where
        F: Fn(&T) -> &str,
    {
        let blacklist = self.current_blacklist()?;
        Ok(suggestions
            .into_iter()
            .filter(|suggestion| !blacklist.contains(category_of(suggestion)))
            .collect())
    }
}

fn blacklist_of(counts: &DismissalCounts) -> BTreeSet<String> {
    counts
        .iter()
        .filter(|(_, count)| **count >= DISMISSAL_THRESHOLD)
        .map(|(category, _)| category.clone())
        .collect()
}
