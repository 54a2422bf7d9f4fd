//! Dot-separated token paths

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::PathError;

/// Location of a token inside the merged document, e.g. `color.brand.primary`.
///
/// Paths order segment by segment, which keeps every emitted file sorted
/// the same way on every run.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenPath {
    segments: Vec<String>,
}

impl TokenPath {
    /// Build a path from already split segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        if let Some(pos) = segments.iter().position(|s| s.is_empty()) {
            return Err(PathError::EmptySegment {
                path: segments.join("."),
                index: pos,
            });
        }
        Ok(Self { segments })
    }

    /// Parse a dot-string such as `motion.duration.fast`.
    pub fn parse(src: &str) -> Result<Self, PathError> {
        let src = src.trim();
        if src.is_empty() {
            return Err(PathError::Empty);
        }
        Self::from_segments(src.split('.'))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment; decides which output category a token lands in.
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// Last segment (the token's own name).
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// New path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// True if any segment equals `name`, ignoring ASCII case.
    pub fn has_segment(&self, name: &str) -> bool {
        self.segments.iter().any(|s| s.eq_ignore_ascii_case(name))
    }
}

impl Display for TokenPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for TokenPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
