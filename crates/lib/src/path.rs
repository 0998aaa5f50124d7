//! Dotted paths for deep attribute access.
//!
//! A path such as `"user.roles.0.name"` walks records by attribute name and
//! lists by position: a component that parses as an unsigned integer indexes
//! into a list when the value reached so far is a list, and is used as a key
//! otherwise.
//!
//! ```rust
//! use dotwiz::path::PathBuf;
//! use std::str::FromStr;
//!
//! // Construct from string (automatically normalized)
//! let path = PathBuf::from_str(".user..roles.0.")?;
//! assert_eq!(path.as_str(), "user.roles.0");
//!
//! // Build incrementally
//! let path = PathBuf::new().push("user").push("roles").push("0");
//! assert_eq!(path.components().collect::<Vec<_>>(), vec!["user", "roles", "0"]);
//! # Ok::<(), std::convert::Infallible>(())
//! ```

use std::{fmt, str::FromStr};

/// Normalizes a path string by dropping empty components.
///
/// - Empty string "" → empty string
/// - Leading dots ".user" → "user"
/// - Trailing dots "user." → "user"
/// - Consecutive dots "user..profile" → "user.profile"
///
/// ```rust
/// # use dotwiz::path::normalize_path;
/// assert_eq!(normalize_path(".user"), "user");
/// assert_eq!(normalize_path("user..profile."), "user.profile");
/// assert_eq!(normalize_path("..."), "");
/// ```
pub fn normalize_path(input: &str) -> String {
    input
        .split('.')
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// One step of a path walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Attribute or key name
    Key(&'a str),
    /// Component that may address a list element
    Index(usize, &'a str),
}

impl<'a> Step<'a> {
    /// Classifies a single component.
    pub fn parse(component: &'a str) -> Self {
        match component.parse::<usize>() {
            Ok(index) => Step::Index(index, component),
            Err(_) => Step::Key(component),
        }
    }

    /// The component text, usable as a key for either variant.
    pub fn as_key(&self) -> &'a str {
        match self {
            Step::Key(key) | Step::Index(_, key) => key,
        }
    }
}

/// An owned, normalized dotted path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathBuf {
    inner: String,
}

impl PathBuf {
    /// Creates a new empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a path by normalizing the input string.
    pub fn normalize(path: &str) -> Self {
        Self {
            inner: normalize_path(path),
        }
    }

    /// Appends one or more components, normalizing the input.
    pub fn push(mut self, path: impl AsRef<str>) -> Self {
        let normalized = normalize_path(path.as_ref());
        if normalized.is_empty() {
            return self;
        }
        if !self.inner.is_empty() {
            self.inner.push('.');
        }
        self.inner.push_str(&normalized);
        self
    }

    /// Joins this path with another path.
    pub fn join(self, other: &PathBuf) -> Self {
        self.push(&other.inner)
    }

    /// Returns an iterator over the path components.
    pub fn components(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.inner.split('.').filter(|s| !s.is_empty())
    }

    /// Returns an iterator over the classified path components.
    pub fn steps(&self) -> impl Iterator<Item = Step<'_>> {
        self.components().map(Step::parse)
    }

    /// Returns the number of components in the path.
    pub fn len(&self) -> usize {
        self.components().count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the parent path, or `None` for single-component and empty paths.
    pub fn parent(&self) -> Option<PathBuf> {
        self.inner.rfind('.').map(|last_dot| PathBuf {
            inner: self.inner[..last_dot].to_string(),
        })
    }

    /// Returns the last component of the path, or `None` if empty.
    pub fn last(&self) -> Option<&str> {
        self.components().next_back()
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl FromStr for PathBuf {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::normalize(s))
    }
}

impl From<&str> for PathBuf {
    fn from(s: &str) -> Self {
        Self::normalize(s)
    }
}

impl From<String> for PathBuf {
    fn from(s: String) -> Self {
        Self::normalize(&s)
    }
}

impl From<&PathBuf> for PathBuf {
    fn from(path: &PathBuf) -> Self {
        path.clone()
    }
}

impl AsRef<str> for PathBuf {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for PathBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.is_empty() {
            write!(f, "(empty path)")
        } else {
            write!(f, "{}", self.inner)
        }
    }
}

/// Builds a [`PathBuf`] from components.
///
/// - `path!()` - empty path
/// - `path!("user.roles")` - a single (normalized) string
/// - `path!("user", idx, "name")` - components joined with dots; anything
///   implementing `Display` is accepted
///
/// ```rust
/// # use dotwiz::path;
/// let idx = 2;
/// let p = path!("user", "roles", idx);
/// assert_eq!(p.as_str(), "user.roles.2");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::path::PathBuf::new()
    };
    ($($component:expr),+ $(,)?) => {{
        let path = $crate::path::PathBuf::new();
        $(let path = path.push(::std::string::ToString::to_string(&$component));)+
        path
    }};
}
