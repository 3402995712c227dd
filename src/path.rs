//! Absolute node paths within a group/dataset hierarchy.
//!
//! A [`NodePath`] is always absolute and `/`-delimited. The root is `/` and
//! no other path contains an empty segment or ends with a slash.

use std::fmt;

use crate::error::{Error, Result};

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// A validated absolute path such as `/`, `/a` or `/a/x`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(String);

impl NodePath {
    /// The root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self(SEPARATOR.to_string())
    }

    /// Parse an absolute path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for relative paths, empty segments
    /// (`/a//b`) and trailing slashes other than the root itself.
    pub fn parse(s: &str) -> Result<Self> {
        if !s.starts_with(SEPARATOR) {
            return Err(Error::invalid_path(s, "path must be absolute"));
        }
        if s.len() == 1 {
            return Ok(Self::root());
        }
        if s[1..].split(SEPARATOR).any(str::is_empty) {
            return Err(Error::invalid_path(s, "empty path segment"));
        }
        Ok(Self(s.to_string()))
    }

    /// Append a child name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the name is empty or contains `/`.
    pub fn join(&self, name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::invalid_path(name, "empty child name"));
        }
        if name.contains(SEPARATOR) {
            return Err(Error::invalid_path(name, "child name contains '/'"));
        }
        let mut joined = self.0.clone();
        if !self.is_root() {
            joined.push(SEPARATOR);
        }
        joined.push_str(name);
        Ok(Self(joined))
    }

    /// The parent path, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind(SEPARATOR) {
            Some(0) | None => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
        }
    }

    /// Final segment; the root's basename is `/`.
    #[must_use]
    pub fn basename(&self) -> &str {
        if self.is_root() {
            return &self.0;
        }
        self.0
            .rsplit(SEPARATOR)
            .next()
            .unwrap_or(self.0.as_str())
    }

    /// Whether this is `/`.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Number of segments below the root (root is 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.matches(SEPARATOR).count()
        }
    }

    /// Iterate over the segments below the root.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0[1..].split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// The path as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NodePath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NodePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
