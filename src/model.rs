use std::collections::BTreeMap;
use std::fmt;

/// Opaque identifier of a host user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId(id)
    }
}

/// Lifecycle status of a content item
///
/// The host may define statuses beyond the built-in ones; those are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentStatus {
    Publish,
    Draft,
    Pending,
    Private,
    Future,
    AutoDraft,
    Trash,
    Other(String),
}

impl ContentStatus {
    /// Parses a host status slug
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "publish" => ContentStatus::Publish,
            "draft" => ContentStatus::Draft,
            "pending" => ContentStatus::Pending,
            "private" => ContentStatus::Private,
            "future" => ContentStatus::Future,
            "auto-draft" => ContentStatus::AutoDraft,
            "trash" => ContentStatus::Trash,
            other => ContentStatus::Other(other.to_string()),
        }
    }

    pub fn as_slug(&self) -> &str {
        match self {
            ContentStatus::Publish => "publish",
            ContentStatus::Draft => "draft",
            ContentStatus::Pending => "pending",
            ContentStatus::Private => "private",
            ContentStatus::Future => "future",
            ContentStatus::AutoDraft => "auto-draft",
            ContentStatus::Trash => "trash",
            ContentStatus::Other(slug) => slug.as_str(),
        }
    }

    pub fn is_trash(&self) -> bool {
        matches!(self, ContentStatus::Trash)
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_slug())
    }
}

/// Content record handed to the pre-save hook
///
/// Only `content_type` and `status` drive quota decisions. Everything else
/// passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDraft {
    /// Existing item ID, `None` for a brand new item
    pub id: Option<u64>,
    /// Content type slug, e.g. `post`
    pub content_type: String,
    /// Status the item is about to be saved with
    pub status: ContentStatus,
    /// Author recorded on the item, when the host supplies it
    pub author: Option<UserId>,
    /// Host fields the enforcer never inspects
    pub fields: BTreeMap<String, String>,
}

impl ContentDraft {
    pub fn new(content_type: impl Into<String>, status: ContentStatus) -> Self {
        Self {
            id: None,
            content_type: content_type.into(),
            status,
            author: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_author(mut self, author: UserId) -> Self {
        self.author = Some(author);
        self
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Scalar value stored in the per-user metadata table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl MetaValue {
    /// Whether the host would consider this value empty
    pub fn is_empty(&self) -> bool {
        match self {
            MetaValue::Int(_) => false,
            MetaValue::Bool(b) => !b,
            MetaValue::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Int(n) => write!(f, "{n}"),
            MetaValue::Bool(b) => write!(f, "{}", if *b { "1" } else { "" }),
            MetaValue::Text(s) => f.write_str(s),
        }
    }
}

/// Permissions the enforcer asks the host about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Administer users in general
    EditUsers,
    /// Edit one specific user, checked together with a target
    EditUser,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::EditUsers => "edit_users",
            Capability::EditUser => "edit_user",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request-local capability flags of one content type
///
/// The host resolves this once per request and hands it to the init hook.
/// Changing it never touches persisted capability configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilitySet {
    pub content_type: String,
    pub create: bool,
    pub publish: bool,
    pub edit: bool,
    pub delete: bool,
}

impl CapabilitySet {
    /// All flags granted
    pub fn granted(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            create: true,
            publish: true,
            edit: true,
            delete: true,
        }
    }
}
