//! Identifiers and object names.

use core::fmt;

/// A canonicalized SQL identifier.
///
/// The value has been case-folded by the session policy exactly once;
/// quoted identifiers keep their written form and re-emit with quotes.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ident {
    /// The canonical value.
    pub value: String,
    /// Whether the identifier was written quoted.
    pub quoted: bool,
}

impl Ident {
    /// An unquoted identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
        }
    }

    /// A quoted identifier.
    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: true,
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "\"{}\"", self.value.replace('"', "\"\""))
        } else {
            f.write_str(&self.value)
        }
    }
}

/// A possibly qualified object name: `catalog.schema.object`, `schema.object`
/// or `object`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectName(pub Vec<Ident>);

impl ObjectName {
    /// A name from unquoted segments.
    pub fn new<S: Into<String>>(segments: Vec<S>) -> Self {
        Self(segments.into_iter().map(Ident::new).collect())
    }

    /// The unqualified trailing segment.
    pub fn unqualified(&self) -> &Ident {
        self.0.last().expect("object names have at least one segment")
    }

    /// The schema qualifier, when present.
    pub fn schema(&self) -> Option<&Ident> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(&self.0[n - 2]),
        }
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::utils::display_separated(&self.0, "."))
    }
}
