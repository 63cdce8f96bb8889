use std::{fmt, ops::Deref};

use serde::Serialize;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Ordered segments addressing a command, e.g. `["git", "commit"]`.
///
/// The empty path is the root, which is never itself a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CommandPath(Vec<String>);

impl CommandPath {
    /// The root path.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Builds a path from segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Parses a dotted path. Empty segments are dropped, so `""` is the root.
    pub fn parse(dotted: &str) -> Self {
        Self::new(
            dotted
                .split(PATH_SEPARATOR)
                .filter(|segment| !segment.is_empty()),
        )
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// This path extended by `name`.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    /// The last segment, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl Deref for CommandPath {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for CommandPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(&PATH_SEPARATOR.to_string()))
    }
}

impl From<&str> for CommandPath {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}
