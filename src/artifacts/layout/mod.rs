use regex::Regex;
use std::sync::LazyLock;

pub const BRANCH_DIR_REGEX: &str = r"^.*/branches/([^/]+)$";
pub const TAG_DIR_REGEX: &str = r"^.*/tags/([^/]+)$";
pub const TRUNK_ROOT_REGEX: &str = r"^(.*/trunk)(/.*)?$";
pub const BRANCH_ROOT_REGEX: &str = r"^(.*/branches/([^/]+))(/.*)?$";
pub const TAG_ROOT_REGEX: &str = r"^(.*/tags/([^/]+))(/.*)?$";
pub const MODULE_REGEX: &str = r"^.*/([^/]+)/(?:trunk|branches|tags)/.*$";

static BRANCH_DIR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BRANCH_DIR_REGEX).expect("invalid branch directory regex"));
static TAG_DIR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TAG_DIR_REGEX).expect("invalid tag directory regex"));
static TRUNK_ROOT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TRUNK_ROOT_REGEX).expect("invalid trunk root regex"));
static BRANCH_ROOT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BRANCH_ROOT_REGEX).expect("invalid branch root regex"));
static TAG_ROOT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TAG_ROOT_REGEX).expect("invalid tag root regex"));
static MODULE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MODULE_REGEX).expect("invalid module regex"));

/// The logical root a repository path belongs to, under the conventional
/// `trunk` / `branches/<name>` / `tags/<name>` layout.
///
/// Paths outside the convention (the module directory itself, nonstandard
/// layouts) have no root; call sites carry that as `Option<Root>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Root {
    Trunk,
    Branch(String),
    Tag(String),
}

impl Root {
    pub fn name(&self) -> &str {
        match self {
            Root::Trunk => "trunk",
            Root::Branch(name) | Root::Tag(name) => name,
        }
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Root::Tag(_))
    }
}

impl std::fmt::Display for Root {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Tells whether the path is a trunk directory itself.
///
/// Directory paths carry no trailing slash, so `/module/trunk` is the trunk
/// while `/module/trunk/src` is a path under it (see [`classify`]).
pub fn is_trunk_path(path: &str) -> bool {
    path.ends_with("/trunk")
}

pub fn is_branch_path(path: &str) -> bool {
    branch_name(path).is_some()
}

/// The branch name iff the path is a branch directory itself (`.../branches/<name>`).
pub fn branch_name(path: &str) -> Option<&str> {
    BRANCH_DIR_PATTERN
        .captures(path)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str())
}

pub fn is_tag_path(path: &str) -> bool {
    tag_name(path).is_some()
}

/// The tag name iff the path is a tag directory itself (`.../tags/<name>`).
pub fn tag_name(path: &str) -> Option<&str> {
    TAG_DIR_PATTERN
        .captures(path)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str())
}

/// Classifies a path under the trunk/branches/tags convention.
///
/// Precedence, checked in order: the trunk directory itself, a branch
/// directory itself, a tag directory itself, a path under trunk, a path
/// under a branch, a path under a tag. Root directories win over deep
/// matches, and trunk wins over branches and tags, so an oddly named
/// `/module/branches/trunk` classifies as trunk.
pub fn classify(path: &str) -> Option<Root> {
    if is_trunk_path(path) {
        return Some(Root::Trunk);
    }
    if let Some(name) = branch_name(path) {
        return Some(Root::Branch(name.to_string()));
    }
    if let Some(name) = tag_name(path) {
        return Some(Root::Tag(name.to_string()));
    }
    if path.contains("/trunk/") {
        return Some(Root::Trunk);
    }
    if let Some(name) = under_root_name(&BRANCH_ROOT_PATTERN, path) {
        return Some(Root::Branch(name.to_string()));
    }
    if let Some(name) = under_root_name(&TAG_ROOT_PATTERN, path) {
        return Some(Root::Tag(name.to_string()));
    }

    None
}

/// Canonical root identity of the path: `"trunk"`, a branch name or a tag
/// name, with the same precedence as [`classify`].
pub fn root_name(path: &str) -> Option<&str> {
    if is_trunk_path(path) {
        return Some("trunk");
    }
    if let Some(name) = branch_name(path) {
        return Some(name);
    }
    if let Some(name) = tag_name(path) {
        return Some(name);
    }
    if path.contains("/trunk/") {
        return Some("trunk");
    }
    if let Some(name) = under_root_name(&BRANCH_ROOT_PATTERN, path) {
        return Some(name);
    }

    under_root_name(&TAG_ROOT_PATTERN, path)
}

/// The root-relative prefix the path belongs to, e.g. `/module/branches/<name>`
/// for any path at or under that branch directory.
pub fn root_path(path: &str) -> Option<&str> {
    root_prefix(&TRUNK_ROOT_PATTERN, path)
        .or_else(|| root_prefix(&BRANCH_ROOT_PATTERN, path))
        .or_else(|| root_prefix(&TAG_ROOT_PATTERN, path))
}

/// The module directory owning the trunk/branches/tags subtree, when the
/// path reaches inside one (`/repo/<module>/trunk/... -> <module>`).
pub fn module_name(path: &str) -> Option<&str> {
    MODULE_PATTERN
        .captures(path)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str())
}

fn under_root_name<'p>(pattern: &Regex, path: &'p str) -> Option<&'p str> {
    pattern
        .captures(path)
        .and_then(|captures| captures.get(2))
        .map(|name| name.as_str())
}

fn root_prefix<'p>(pattern: &Regex, path: &'p str) -> Option<&'p str> {
    pattern
        .captures(path)
        .and_then(|captures| captures.get(1))
        .map(|prefix| prefix.as_str())
}
