//! Reference resolver. Walks one freshly loaded schema document, assigns every
//! sub-schema its canonical URI and rewrites `$ref` values to absolute form.
use crate::{error::SchemaError, uri::SchemaUri};
use ahash::AHashMap;
use serde_json::Value;
use std::collections::BTreeSet;

/// The outcome of resolving a single document.
#[derive(Debug)]
pub(crate) struct Resolver {
    /// Canonical URI of each sub-schema, mapped to its JSON Pointer location
    /// from the document root.
    pub(crate) bindings: AHashMap<SchemaUri, String>,
    /// References whose base is another document; the caller must ingest
    /// those before validation can follow them.
    pub(crate) external: BTreeSet<SchemaUri>,
}

impl Resolver {
    /// Resolve `schema` as ingested under `uri`.
    ///
    /// Every `$ref` string in the document is rewritten in place to its
    /// canonical absolute form. A reference into the document's own base that
    /// matches no sub-schema is fatal; references to other documents are
    /// collected in [`Resolver::external`].
    pub(crate) fn resolve(schema: &mut Value, uri: &SchemaUri) -> Result<Resolver, SchemaError> {
        let mut bindings = AHashMap::new();
        let mut references = BTreeSet::new();
        let scope = walk(schema, uri.clone(), String::new(), &mut bindings, &mut references)?;

        let mut external = BTreeSet::new();
        for reference in references {
            if bindings.contains_key(&reference) {
                continue;
            }
            if reference.url() == scope.url() {
                // Same base means a sub-schema of this very document, which
                // has not been found
                return Err(SchemaError::MissingLocalReference { reference });
            }
            external.insert(reference);
        }
        Ok(Resolver { bindings, external })
    }
}

/// Pre-order traversal. Records the URI and location of every sub-schema and
/// returns the URI actually used for this node (its `id`, if it declares one).
fn walk(
    schema: &mut Value,
    uri: SchemaUri,
    location: String,
    bindings: &mut AHashMap<SchemaUri, String>,
    references: &mut BTreeSet<SchemaUri>,
) -> Result<SchemaUri, SchemaError> {
    let uri = match schema.get("id").and_then(Value::as_str) {
        Some(id) => uri.derive(id)?,
        None => uri,
    };
    if bindings.contains_key(&uri) {
        return Err(SchemaError::DuplicateSubschema { uri });
    }
    bindings.insert(uri.clone(), location.clone());

    if let Some(object) = schema.as_object_mut() {
        for (key, child) in object.iter_mut() {
            if key == "default" {
                // default values can be objects, but are not schemas
                continue;
            }
            match child {
                Value::Object(_) => {
                    let segment = SchemaUri::escape(key);
                    walk(
                        child,
                        uri.append(&segment),
                        format!("{}/{}", location, segment),
                        bindings,
                        references,
                    )?;
                }
                Value::Array(elements) => {
                    let segment = SchemaUri::escape(key);
                    let child_uri = uri.append(&segment);
                    let child_location = format!("{}/{}", location, segment);
                    for (index, element) in elements.iter_mut().enumerate() {
                        // non-object array elements are not schemas
                        if element.is_object() {
                            walk(
                                element,
                                child_uri.append(&index.to_string()),
                                format!("{}/{}", child_location, index),
                                bindings,
                                references,
                            )?;
                        }
                    }
                }
                Value::String(value) => {
                    if key == "$ref" {
                        let reference = uri.derive(value)?;
                        *value = reference.to_string();
                        references.insert(reference);
                    }
                }
                _ => {}
            }
        }
    }
    Ok(uri)
}
