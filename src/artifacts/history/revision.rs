use crate::artifacts::history::revision_path::RevisionPath;
use crate::artifacts::layout;
use chrono::{DateTime, Utc};
use derive_new::new;

/// What a single `<path>` entry of the log export touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    File,
    Directory,
}

impl Kind {
    pub fn as_str(&self) -> &str {
        match self {
            Kind::File => "file",
            Kind::Directory => "dir",
        }
    }
}

impl TryFrom<&str> for Kind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "file" => Ok(Kind::File),
            "dir" => Ok(Kind::Directory),
            _ => Err(anyhow::anyhow!("invalid update kind '{}'", value)),
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The action recorded for a path, from the single-letter code in the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add,
    Delete,
    Modify,
    Replace,
}

impl Action {
    pub fn as_str(&self) -> &str {
        match self {
            Action::Add => "ADD",
            Action::Delete => "DELETE",
            Action::Modify => "MODIFY",
            Action::Replace => "REPLACE",
        }
    }
}

impl TryFrom<&str> for Action {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "A" => Ok(Action::Add),
            "D" => Ok(Action::Delete),
            "M" => Ok(Action::Modify),
            "R" => Ok(Action::Replace),
            _ => Err(anyhow::anyhow!("invalid update action '{}'", value)),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One path update within a revision.
///
/// `copy_source` is only present when the export recorded both a copy-from
/// path and a copy-from revision; the parser drops partial copy information.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Update {
    kind: Kind,
    action: Action,
    path: String,
    copy_source: Option<RevisionPath>,
    text_modified: bool,
}

impl Update {
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_copy(&self) -> bool {
        self.copy_source.is_some()
    }

    pub fn copy_source(&self) -> Option<&RevisionPath> {
        self.copy_source.as_ref()
    }

    /// A file update flagged with text modifications, which the export uses
    /// to mark merges.
    pub fn is_text_modification(&self) -> bool {
        self.text_modified
    }

    /// Tells whether this update touches the given path prefix.
    pub fn is_on_path(&self, path: &str) -> bool {
        self.path.starts_with(path)
    }

    /// A significant update either merges text into a file or creates or
    /// replaces a root directory (the trunk, a branch or a tag). Ordinary
    /// edits inside an existing root carry no lineage information.
    pub fn is_significant(&self) -> bool {
        if self.kind == Kind::File && self.text_modified {
            return true;
        }

        if self.kind != Kind::Directory {
            return false;
        }
        if self.action == Action::Modify || self.action == Action::Delete {
            return false;
        }

        layout::is_trunk_path(&self.path)
            || layout::is_branch_path(&self.path)
            || layout::is_tag_path(&self.path)
    }
}

/// One log entry of the export: a revision and the updates it carried.
#[derive(Debug, Clone, new)]
pub struct Revision {
    number: u64,
    author: Option<String>,
    date: DateTime<Utc>,
    message: Option<String>,
    updates: Vec<Update>,
}

impl Revision {
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn updates(&self) -> &[Update] {
        &self.updates
    }

    /// Tells whether any update of this revision touches the given path prefix.
    pub fn is_on_path(&self, path: &str) -> bool {
        self.updates.iter().any(|update| update.is_on_path(path))
    }

    pub fn is_significant(&self) -> bool {
        self.updates.iter().any(Update::is_significant)
    }

    /// The significant updates, in their original order.
    pub fn significant_updates(&self) -> impl Iterator<Item = &Update> {
        self.updates.iter().filter(|update| update.is_significant())
    }
}
