//! Owns ingested schema documents and their URI bindings.
use crate::{error::SchemaError, uri::SchemaUri};
use ahash::AHashMap;
use serde_json::Value;

/// Where a bound sub-schema lives: which owned document, and the JSON Pointer
/// to the node inside it. Resolving through the location instead of holding a
/// direct reference keeps cyclic `$ref` graphs plain data.
#[derive(Debug)]
struct Binding {
    document: usize,
    location: String,
}

#[derive(Debug, Default)]
pub(crate) struct SchemaStore {
    documents: Vec<Value>,
    bindings: AHashMap<SchemaUri, Binding>,
    root: Option<usize>,
}

impl SchemaStore {
    pub(crate) fn contains(&self, uri: &SchemaUri) -> bool {
        self.bindings.contains_key(uri)
    }

    /// The sub-schema bound to `uri`, if any.
    pub(crate) fn resolve(&self, uri: &SchemaUri) -> Option<&Value> {
        let binding = self.bindings.get(uri)?;
        self.documents[binding.document].pointer(&binding.location)
    }

    /// The document ingested under the bare `#`, if any.
    pub(crate) fn root(&self) -> Option<&Value> {
        self.root.map(|document| &self.documents[document])
    }

    /// Take ownership of `document` and bind its sub-schema URIs.
    ///
    /// All-or-nothing: if any URI is already bound, nothing is stored.
    pub(crate) fn commit(
        &mut self,
        document: Value,
        bindings: AHashMap<SchemaUri, String>,
        make_root: bool,
    ) -> Result<(), SchemaError> {
        for uri in bindings.keys() {
            if self.bindings.contains_key(uri) {
                return Err(SchemaError::AlreadyIngested { uri: uri.clone() });
            }
        }
        let slot = self.documents.len();
        self.documents.push(document);
        for (uri, location) in bindings {
            self.bindings.insert(
                uri,
                Binding {
                    document: slot,
                    location,
                },
            );
        }
        if make_root {
            self.root = Some(slot);
        }
        Ok(())
    }
}
