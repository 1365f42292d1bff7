use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PathError;

/// A location inside a nested document, independent of any document instance.
///
/// Always holds at least one segment. `["user", "address", "city"]` addresses
/// the same value as the dotted path `user.address.city` on the root document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Projection {
    segments: Vec<String>,
}

impl Projection {
    /// Single-segment projection. The name is not validated; dots or `$` in
    /// it end up in the rendered path verbatim.
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// Parse a dotted path such as `"a.b.c"`.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        check_segments(path, &segments)?;
        Ok(Self { segments })
    }

    /// New projection with `segment` in front of this one's segments.
    pub fn prepend(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.push(segment.into());
        segments.extend(self.segments.iter().cloned());
        Self { segments }
    }

    /// The dotted field path addressing this location from the root.
    pub fn to_key(&self) -> String {
        self.segments.join(".")
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

fn check_segments(path: &str, segments: &[String]) -> Result<(), PathError> {
    if segments.is_empty() {
        return Err(PathError::Empty);
    }
    match segments.iter().position(String::is_empty) {
        Some(position) => Err(PathError::EmptySegment {
            path: path.to_string(),
            position,
        }),
        None => Ok(()),
    }
}

impl TryFrom<Vec<String>> for Projection {
    type Error = PathError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        check_segments(&segments.join("."), &segments)?;
        Ok(Self { segments })
    }
}

impl From<Projection> for Vec<String> {
    fn from(p: Projection) -> Self {
        p.segments
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key())
    }
}
