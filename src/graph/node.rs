//! Node identity in the transition graph

use serde::{Deserialize, Serialize};

/// Separator that marks a type name as canonical (IRI-like).
const SCHEME_SEPARATOR: &str = "://";

/// Identifier of a concrete semantic type.
///
/// Either a short vocabulary key (`"mesh_disease_id"`) or a canonical,
/// IRI-like type string (`"http://identifiers.org/mesh/disease/id"`).
/// Serializes as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Create a TypeName from any string
    pub fn from_string(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the name carries a scheme, i.e. is already in canonical form
    pub fn is_canonical(&self) -> bool {
        is_canonical(&self.0)
    }
}

/// True if `name` carries a scheme separator.
pub fn is_canonical(name: &str) -> bool {
    name.contains(SCHEME_SEPARATOR)
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for TypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}
