//! The ordered revision history of a repository
//!
//! - `revision`: one log entry and its path updates
//! - `revision_path`: a (path, revision) value pair

pub mod revision;
pub mod revision_path;

use crate::artifacts::history::revision::Revision;
use crate::artifacts::layout;
use std::collections::{BTreeMap, BTreeSet};

/// All revisions of a log export, keyed by revision number.
///
/// Iteration order is a contract: every accessor yields revisions in
/// ascending number order.
#[derive(Debug, Clone, Default)]
pub struct History {
    revisions: BTreeMap<u64, Revision>,
}

impl History {
    /// Builds a history from parsed revisions. Two revisions sharing a
    /// number mean the export is corrupt, which is fatal.
    pub fn new(revisions: Vec<Revision>) -> anyhow::Result<Self> {
        let mut map = BTreeMap::new();

        for revision in revisions {
            let number = revision.number();
            if map.insert(number, revision).is_some() {
                anyhow::bail!("duplicate revision {} in the log export", number);
            }
        }

        Ok(History { revisions: map })
    }

    pub fn revision_count(&self) -> usize {
        self.revisions.len()
    }

    pub fn revisions(&self) -> impl Iterator<Item = &Revision> {
        self.revisions.values()
    }

    pub fn revision(&self, number: u64) -> Option<&Revision> {
        self.revisions.get(&number)
    }

    /// A new history keeping only the revisions touching the given path
    /// prefix. The receiver is left untouched.
    pub fn history_on_path(&self, path: &str) -> History {
        History {
            revisions: self
                .revisions
                .iter()
                .filter(|(_, revision)| revision.is_on_path(path))
                .map(|(number, revision)| (*number, revision.clone()))
                .collect(),
        }
    }

    /// Every distinct root directory (`.../trunk`, `.../branches/<name>`,
    /// `.../tags/<name>`) touched anywhere in the history.
    pub fn root_paths(&self) -> BTreeSet<String> {
        let mut paths = BTreeSet::new();

        for revision in self.revisions.values() {
            for update in revision.updates() {
                if let Some(path) = layout::root_path(update.path()) {
                    paths.insert(path.to_string());
                }
            }
        }

        paths
    }

    pub fn is_root_path(&self, path: &str) -> bool {
        self.root_paths().contains(path)
    }

    /// The revisions carrying at least one significant update, ascending.
    pub fn significant_revisions(&self) -> impl Iterator<Item = &Revision> {
        self.revisions
            .values()
            .filter(|revision| revision.is_significant())
    }
}
