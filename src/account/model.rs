//! Account model types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique identifier for an account.
///
/// Ids are opaque, caller-supplied strings; the store never generates or
/// validates them beyond uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    /// Create a new account ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Directory backing an account's credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountKind {
    /// Account authenticated against an LDAP directory.
    #[serde(rename = "LDAP")]
    Ldap,
    /// Locally defined account with its own password.
    #[default]
    Local,
}

impl AccountKind {
    /// Get display name for the account kind.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Ldap => "LDAP",
            Self::Local => "Local",
        }
    }
}

/// A single display label attached to an account.
///
/// Labels are kept in insertion order; the order is meaningful for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label text.
    pub text: String,
}

impl Label {
    /// Create a label from its text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Three-valued password field.
///
/// The snapshot format distinguishes a field that was never provided from one
/// that was explicitly cleared:
/// - [`Password::Unset`] — never provided; omitted from the serialized record.
/// - [`Password::Cleared`] — explicitly cleared; serialized as `null`.
/// - [`Password::Set`] — serialized as the plain string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Password {
    /// No password has ever been provided.
    #[default]
    Unset,
    /// The password was explicitly cleared.
    Cleared,
    /// A password is set.
    Set(String),
}

impl Password {
    /// Whether the password has never been provided.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// The password string, if one is set.
    #[must_use]
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Self::Unset | Self::Cleared => None,
            Self::Set(password) => Some(password),
        }
    }
}

// `Unset` is normally skipped at the field level; a `Password` serialized on
// its own collapses to `null`, same as `Cleared`.
impl Serialize for Password {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Unset | Self::Cleared => serializer.serialize_none(),
            Self::Set(password) => serializer.serialize_some(password),
        }
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<String>::deserialize(deserializer)? {
            None => Self::Cleared,
            Some(password) => Self::Set(password),
        })
    }
}

/// A credential-account record.
///
/// The record is flat and carries no invariants of its own; the store enforces
/// id uniqueness across records. Field names follow the snapshot wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, caller-supplied.
    pub id: AccountId,
    /// Display labels, in display order.
    pub labels: Vec<Label>,
    /// Directory kind.
    #[serde(rename = "type")]
    pub kind: AccountKind,
    /// Login name. Absent is distinct from empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    /// Password, see [`Password`] for the three-valued semantics.
    #[serde(default, skip_serializing_if = "Password::is_unset")]
    pub password: Password,
    /// Transient text-entry buffer holding labels before they are parsed.
    /// Carried in the snapshot but has no invariant relating it to `labels`.
    #[serde(rename = "labelsInput", default, skip_serializing_if = "Option::is_none")]
    pub labels_input: Option<String>,
}

impl Account {
    /// Create an account with the given id and kind, no labels, and unset
    /// login and password.
    #[must_use]
    pub fn new(id: impl Into<AccountId>, kind: AccountKind) -> Self {
        Self {
            id: id.into(),
            labels: Vec::new(),
            kind,
            login: None,
            password: Password::Unset,
            labels_input: None,
        }
    }

    /// Set the login name.
    #[must_use]
    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    /// Set the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Password::Set(password.into());
        self
    }

    /// Replace the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = Label>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }
}
