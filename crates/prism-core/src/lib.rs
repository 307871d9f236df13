//! Shared name types used across the Prism crates.

use std::fmt;

use smol_str::SmolStr;

/// A lightweight owned name.
///
/// This is backed by [`smol_str::SmolStr`], which stores short strings inline
/// and avoids heap allocation in many common cases.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Name(SmolStr);

impl Name {
    #[inline]
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self(text.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Name").field(&self.0.as_str()).finish()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A dotted, fully qualified type name, e.g. `java.lang.String` or
/// `kotlin.Int`.
///
/// Declaration identity throughout the bridge is by qualified name: the
/// symbol oracle may hand back fresh handles per call, so adapters never lean
/// on handle identity when comparing elements.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(Vec<Name>);

impl QualifiedName {
    pub fn from_dotted(path: &str) -> Self {
        Self(path.split('.').map(Name::from).collect())
    }

    pub fn from_segments(segments: Vec<Name>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[Name] {
        &self.0
    }

    /// The last segment, e.g. `String` for `java.lang.String`.
    pub fn simple_name(&self) -> &Name {
        self.0.last().expect("qualified name has at least one segment")
    }

    /// Everything before the last segment, or `None` for a single-segment
    /// name.
    pub fn qualifier(&self) -> Option<QualifiedName> {
        if self.0.len() <= 1 {
            return None;
        }
        Some(QualifiedName(self.0[..self.0.len() - 1].to_vec()))
    }

    /// A new name with `segment` appended, e.g. nesting `Container` under an
    /// annotation type.
    pub fn child(&self, segment: impl Into<Name>) -> QualifiedName {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        QualifiedName(segments)
    }

    pub fn to_dotted(&self) -> String {
        self.0
            .iter()
            .map(|n| n.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Debug for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("QualifiedName")
            .field(&self.to_dotted())
            .finish()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            f.write_str(seg.as_str())?;
            first = false;
        }
        Ok(())
    }
}

impl From<&str> for QualifiedName {
    fn from(value: &str) -> Self {
        Self::from_dotted(value)
    }
}
