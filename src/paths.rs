//! Facilities for naming locations within validated instances.
use std::fmt;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PathChunk {
    Name(String),
    Index(usize),
}

/// A lightweight path to the currently validated value.
///
/// Built as a linked list on the stack during recursion, so extending the
/// path with one more segment does not allocate.
#[derive(Debug)]
pub(crate) struct InstancePath<'a> {
    pub(crate) chunk: Option<PathChunk>,
    pub(crate) parent: Option<&'a InstancePath<'a>>,
}

impl<'a> InstancePath<'a> {
    pub(crate) const fn new() -> Self {
        InstancePath {
            chunk: None,
            parent: None,
        }
    }

    pub(crate) fn push(&'a self, chunk: impl Into<PathChunk>) -> Self {
        InstancePath {
            chunk: Some(chunk.into()),
            parent: Some(self),
        }
    }

    pub(crate) fn to_vec(&'a self) -> Vec<PathChunk> {
        // The capacity should be the average depth so we avoid extra allocations
        let mut result = Vec::with_capacity(6);
        let mut current = self;
        if let Some(chunk) = &current.chunk {
            result.push(chunk.clone())
        }
        while let Some(next) = current.parent {
            current = next;
            if let Some(chunk) = &current.chunk {
                result.push(chunk.clone())
            }
        }
        result.reverse();
        result
    }
}

impl From<String> for PathChunk {
    #[inline]
    fn from(value: String) -> Self {
        PathChunk::Name(value)
    }
}
impl From<usize> for PathChunk {
    #[inline]
    fn from(value: usize) -> Self {
        PathChunk::Index(value)
    }
}

/// The logical name of a value inside a validated instance.
///
/// Displays in the dotted form used by diagnostics, e.g. `root.users[3].age`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InstanceName(Vec<PathChunk>);

impl InstanceName {
    /// Name components as strings. Each component is casted to `String`. Consumes `InstanceName`.
    pub fn into_vec(self) -> Vec<String> {
        self.0
            .into_iter()
            .map(|item| match item {
                PathChunk::Name(value) => value,
                PathChunk::Index(idx) => idx.to_string(),
            })
            .collect()
    }
}

impl fmt::Display for InstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for chunk in &self.0 {
            match chunk {
                PathChunk::Name(value) => {
                    f.write_str(".")?;
                    f.write_str(value)?;
                }
                PathChunk::Index(idx) => {
                    f.write_str("[")?;
                    f.write_str(itoa::Buffer::new().format(*idx))?;
                    f.write_str("]")?;
                }
            }
        }
        Ok(())
    }
}

impl<'a> From<&'a InstancePath<'a>> for InstanceName {
    #[inline]
    fn from(path: &'a InstancePath<'a>) -> Self {
        InstanceName(path.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::{InstanceName, InstancePath};

    #[test]
    fn empty_path_is_root() {
        let path = InstancePath::new();
        assert_eq!(InstanceName::from(&path).to_string(), "root");
    }

    #[test]
    fn nested_path() {
        let path = InstancePath::new();
        let users = path.push("users".to_string());
        let third = users.push(3);
        let age = third.push("age".to_string());
        assert_eq!(InstanceName::from(&age).to_string(), "root.users[3].age");
    }

    #[test]
    fn into_vec() {
        let path = InstancePath::new();
        let users = path.push("users".to_string());
        let first = users.push(0);
        assert_eq!(InstanceName::from(&first).into_vec(), vec!["users", "0"]);
    }
}
