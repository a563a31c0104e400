//! Schema ingestion and the recursive, schema-directed interpreter that
//! checks instances against the resolved corpus.
use crate::{
    ecma,
    error::{SchemaError, ValidationError},
    helpers,
    paths::{InstanceName, InstancePath},
    primitive_type::PrimitiveType,
    resolver::Resolver,
    store::SchemaStore,
    uri::SchemaUri,
};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Combinator keywords the interpreter refuses rather than silently ignores.
const REFUSED_KEYWORDS: [&str; 4] = ["allOf", "anyOf", "oneOf", "not"];

/// A JSON Schema Draft 4 validator over a corpus of ingested schema documents.
///
/// Schemas are ingested with [`JsonValidator::insert_schema`] (or
/// [`JsonValidator::set_root_schema`] for the common single-document case)
/// until every `$ref` resolves, then any number of instances can be checked
/// with [`JsonValidator::validate`].
///
/// ```rust
/// use json_validator::JsonValidator;
/// use serde_json::json;
///
/// let schema = json!({
///     "type": "object",
///     "properties": {"age": {"type": "integer", "minimum": 0}},
///     "required": ["age"]
/// });
/// let mut validator = JsonValidator::new();
/// validator.set_root_schema(&schema).expect("A valid schema");
///
/// let mut instance = json!({"age": 30});
/// assert!(validator.validate(&mut instance).is_ok());
/// ```
#[derive(Debug, Default)]
pub struct JsonValidator {
    store: SchemaStore,
    insert_default_values: bool,
}

impl JsonValidator {
    /// Create a validator with an empty schema corpus.
    #[must_use]
    pub fn new() -> JsonValidator {
        JsonValidator::default()
    }

    /// Ingest `schema` under the given `uri` and return the set of external
    /// documents it references but the corpus does not know yet.
    ///
    /// A non-empty result means nothing was stored: ingest the missing
    /// documents under the returned URIs, then call this again. An empty
    /// result means the document and all its sub-schema bindings were
    /// committed; ingesting under the bare `#` also makes it the root.
    ///
    /// ```rust
    /// use json_validator::{JsonValidator, SchemaUri};
    /// use serde_json::json;
    ///
    /// let mut validator = JsonValidator::new();
    /// let missing = validator
    ///     .insert_schema(&json!({"$ref": "http://other/s2#"}), SchemaUri::root())
    ///     .expect("A valid schema");
    /// assert_eq!(missing.len(), 1);
    /// ```
    pub fn insert_schema(
        &mut self,
        schema: &Value,
        uri: SchemaUri,
    ) -> Result<BTreeSet<SchemaUri>, SchemaError> {
        let mut document = schema.clone();
        let resolved = Resolver::resolve(&mut document, &uri)?;

        let unknown: BTreeSet<SchemaUri> = resolved
            .external
            .into_iter()
            .filter(|reference| !self.store.contains(reference))
            .collect();
        if !unknown.is_empty() {
            return Ok(unknown);
        }

        self.store
            .commit(document, resolved.bindings, uri == SchemaUri::root())?;
        Ok(BTreeSet::new())
    }

    /// Ingest `schema` as the root document (`#`).
    ///
    /// Unlike [`JsonValidator::insert_schema`] this requires the schema to be
    /// fully closed: any reference to a document the corpus does not hold is
    /// an error.
    pub fn set_root_schema(&mut self, schema: &Value) -> Result<(), SchemaError> {
        let references = self.insert_schema(schema, SchemaUri::root())?;
        if !references.is_empty() {
            return Err(SchemaError::UnresolvedExternal { references });
        }
        Ok(())
    }

    /// Insert missing object properties from schema `default` clauses while
    /// validating. Off by default; when enabled, [`JsonValidator::validate`]
    /// mutates the instance.
    pub fn enable_default_value_insertion(&mut self, enabled: bool) {
        self.insert_default_values = enabled;
    }

    /// Validate `instance` against the root schema.
    ///
    /// Fails fast: the result carries the first violation found, named after
    /// its location in the instance (e.g. `root.users[3].age`). With default
    /// value insertion disabled the instance is never modified.
    pub fn validate(&self, instance: &mut Value) -> Result<(), ValidationError> {
        match self.store.root() {
            Some(schema) => self.validate_node(instance, schema, &InstancePath::new()),
            None => Err(ValidationError::no_root_schema()),
        }
    }

    fn validate_node(
        &self,
        instance: &mut Value,
        schema: &Value,
        path: &InstancePath,
    ) -> Result<(), ValidationError> {
        let mut schema = schema;
        // Chase nested references; every node along the way must itself be
        // free of refused keywords
        loop {
            self.refuse_unsupported(schema, path)?;
            match schema.get("$ref").and_then(Value::as_str) {
                Some(reference) => schema = self.lookup(reference, path)?,
                None => break,
            }
        }

        if let Some(options) = schema.get("enum") {
            if let Some(candidates) = options.as_array() {
                if !candidates
                    .iter()
                    .any(|candidate| helpers::equal(instance, candidate))
                {
                    return Err(ValidationError::enumeration(path.into(), instance, options));
                }
            }
        }

        match PrimitiveType::of(instance) {
            PrimitiveType::Object => self.validate_object(instance, schema, path),
            PrimitiveType::Array => self.validate_array(instance, schema, path),
            PrimitiveType::String => self.validate_string(instance, schema, path),
            kind @ (PrimitiveType::Integer | PrimitiveType::Number) => {
                self.validate_number(instance, schema, path, kind)
            }
            kind @ (PrimitiveType::Boolean | PrimitiveType::Null) => {
                self.check_type(instance, schema, path, kind)
            }
        }
    }

    fn refuse_unsupported(
        &self,
        schema: &Value,
        path: &InstancePath,
    ) -> Result<(), ValidationError> {
        for keyword in REFUSED_KEYWORDS {
            if schema.get(keyword).is_some() {
                return Err(ValidationError::not_implemented(path.into(), keyword));
            }
        }
        Ok(())
    }

    /// Resolve a canonical (already rewritten) `$ref` value in the corpus.
    fn lookup(&self, reference: &str, path: &InstancePath) -> Result<&Value, ValidationError> {
        SchemaUri::parse(reference)
            .ok()
            .and_then(|uri| self.store.resolve(&uri))
            .ok_or_else(|| {
                ValidationError::unresolved_reference(path.into(), reference.to_string())
            })
    }

    fn check_type(
        &self,
        instance: &Value,
        schema: &Value,
        path: &InstancePath,
        kind: PrimitiveType,
    ) -> Result<(), ValidationError> {
        let expected = match schema.get("type") {
            Some(expected) => expected,
            None => return Ok(()),
        };
        let accepted = match expected {
            Value::String(tag) => kind.matches_tag(tag),
            Value::Array(tags) => tags
                .iter()
                .filter_map(Value::as_str)
                .any(|tag| kind.matches_tag(tag)),
            _ => true,
        };
        if accepted {
            Ok(())
        } else {
            Err(ValidationError::type_mismatch(
                path.into(),
                instance,
                expected.clone(),
            ))
        }
    }

    fn validate_object(
        &self,
        instance: &mut Value,
        schema: &Value,
        path: &InstancePath,
    ) -> Result<(), ValidationError> {
        self.check_type(instance, schema, path, PrimitiveType::Object)?;

        let properties = schema.get("properties").and_then(Value::as_object);

        // Insert default values of properties missing from this object.
        // Only literal `default` clauses of the named properties are read;
        // `$ref`ed sub-schemas are not chased here.
        if self.insert_default_values {
            if let (Some(properties), Some(object)) = (properties, instance.as_object_mut()) {
                for (key, subschema) in properties {
                    if object.contains_key(key) {
                        continue;
                    }
                    if let Some(default) = subschema.get("default") {
                        object.insert(key.clone(), default.clone());
                    }
                }
            }
        }

        let size = instance.as_object().map_or(0, Map::len) as u64;
        if let Some(limit) = schema.get("maxProperties").and_then(Value::as_u64) {
            if size > limit {
                return Err(ValidationError::max_properties(path.into(), instance, limit));
            }
        }
        if let Some(limit) = schema.get("minProperties").and_then(Value::as_u64) {
            if size < limit {
                return Err(ValidationError::min_properties(path.into(), instance, limit));
            }
        }

        let additional = schema.get("additionalProperties");
        let mut patterns = Vec::new();
        if let Some(pattern_properties) = schema.get("patternProperties").and_then(Value::as_object)
        {
            for (pattern, subschema) in pattern_properties {
                match ecma::compile(pattern) {
                    Ok(regex) => patterns.push((pattern, regex, subschema)),
                    Err(error) => {
                        return Err(ValidationError::invalid_regex(
                            path.into(),
                            pattern,
                            error.to_string(),
                        ))
                    }
                }
            }
        }

        if let Some(object) = instance.as_object_mut() {
            for (key, child) in object.iter_mut() {
                let child_path = path.push(key.clone());

                // a property described in the schema is validated against its
                // own sub-schema
                if let Some(subschema) = properties.and_then(|properties| properties.get(key)) {
                    self.validate_node(child, subschema, &child_path)?;
                    continue;
                }

                // every matching pattern applies; one match is enough to
                // consider the property handled
                let mut matched = false;
                for (pattern, regex, subschema) in &patterns {
                    let is_match = regex.is_match(key).map_err(|error| {
                        ValidationError::invalid_regex(path.into(), pattern, error.to_string())
                    })?;
                    if is_match {
                        self.validate_node(child, subschema, &child_path)?;
                        matched = true;
                    }
                }
                if matched {
                    continue;
                }

                match additional {
                    Some(Value::Bool(false)) => {
                        return Err(ValidationError::additional_properties(
                            path.into(),
                            child,
                            key.clone(),
                        ))
                    }
                    Some(Value::Bool(true)) | None => {}
                    Some(subschema) => self.validate_node(child, subschema, &child_path)?,
                }
            }
        }

        if let Some(required) = schema.get("required").and_then(Value::as_array) {
            for property in required.iter().filter_map(Value::as_str) {
                if instance.get(property).is_none() {
                    return Err(ValidationError::required(
                        path.into(),
                        instance,
                        property.to_string(),
                    ));
                }
            }
        }

        if let Some(dependencies) = schema.get("dependencies").and_then(Value::as_object) {
            for (key, dependency) in dependencies {
                if instance.get(key).is_none() {
                    continue;
                }
                let dependency_path = path.push(format!("dependency-of-{}", key));
                match dependency {
                    // an array names properties that must accompany `key`
                    Value::Array(names) => {
                        for name in names.iter().filter_map(Value::as_str) {
                            if instance.get(name).is_none() {
                                return Err(ValidationError::required(
                                    InstanceName::from(&dependency_path),
                                    instance,
                                    name.to_string(),
                                ));
                            }
                        }
                    }
                    // a schema applies to the whole current object
                    Value::Object(_) => {
                        self.validate_node(instance, dependency, &dependency_path)?
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn validate_array(
        &self,
        instance: &mut Value,
        schema: &Value,
        path: &InstancePath,
    ) -> Result<(), ValidationError> {
        self.check_type(instance, schema, path, PrimitiveType::Array)?;

        let size = instance.as_array().map_or(0, Vec::len) as u64;
        if let Some(limit) = schema.get("maxItems").and_then(Value::as_u64) {
            if size > limit {
                return Err(ValidationError::max_items(path.into(), instance, limit));
            }
        }
        if let Some(limit) = schema.get("minItems").and_then(Value::as_u64) {
            if size < limit {
                return Err(ValidationError::min_items(path.into(), instance, limit));
            }
        }
        if schema.get("uniqueItems").and_then(Value::as_bool) == Some(true) {
            if let Some(items) = instance.as_array() {
                if !helpers::is_unique(items) {
                    return Err(ValidationError::unique_items(path.into(), instance));
                }
            }
        }

        let additional_items = schema.get("additionalItems");
        match schema.get("items") {
            // one schema for every element
            Some(items @ Value::Object(_)) => {
                if let Some(elements) = instance.as_array_mut() {
                    for (index, element) in elements.iter_mut().enumerate() {
                        let element_path = path.push(index);
                        self.validate_node(element, items, &element_path)?;
                    }
                }
            }
            // positional schemas; `additionalItems` governs the tail
            Some(Value::Array(positional)) => {
                let limit = positional.len();
                let mut extras = false;
                if let Some(elements) = instance.as_array_mut() {
                    for (index, element) in elements.iter_mut().enumerate() {
                        let element_path = path.push(index);
                        if let Some(subschema) = positional.get(index) {
                            self.validate_node(element, subschema, &element_path)?;
                            continue;
                        }
                        match additional_items {
                            Some(subschema @ Value::Object(_)) => {
                                self.validate_node(element, subschema, &element_path)?
                            }
                            Some(Value::Bool(false)) => {
                                extras = true;
                                break;
                            }
                            // `true` or absent: the tail needs no further work
                            _ => break,
                        }
                    }
                }
                if extras {
                    return Err(ValidationError::additional_items(
                        path.into(),
                        instance,
                        limit,
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn validate_string(
        &self,
        instance: &Value,
        schema: &Value,
        path: &InstancePath,
    ) -> Result<(), ValidationError> {
        for keyword in ["format", "pattern"] {
            if schema.get(keyword).is_some() {
                return Err(ValidationError::not_implemented(path.into(), keyword));
            }
        }
        self.check_type(instance, schema, path, PrimitiveType::String)?;

        if let Some(value) = instance.as_str() {
            // length in Unicode scalar values, not bytes
            let length = value.chars().count() as u64;
            if let Some(limit) = schema.get("minLength").and_then(Value::as_u64) {
                if length < limit {
                    return Err(ValidationError::min_length(path.into(), instance, limit));
                }
            }
            if let Some(limit) = schema.get("maxLength").and_then(Value::as_u64) {
                if length > limit {
                    return Err(ValidationError::max_length(path.into(), instance, limit));
                }
            }
        }
        Ok(())
    }

    fn validate_number(
        &self,
        instance: &Value,
        schema: &Value,
        path: &InstancePath,
        kind: PrimitiveType,
    ) -> Result<(), ValidationError> {
        self.check_type(instance, schema, path, kind)?;

        let value = match instance.as_f64() {
            Some(value) => value,
            None => return Ok(()),
        };
        // Constraints are evaluated in `f64`; magnitudes beyond 2^53 lose
        // precision, and `multipleOf` on non-terminating binary fractions is
        // subject to rounding
        if let Some(multiple_of) = schema.get("multipleOf").and_then(Value::as_f64) {
            if value % multiple_of != 0.0 {
                return Err(ValidationError::multiple_of(
                    path.into(),
                    instance,
                    multiple_of,
                ));
            }
        }
        if let Some(limit) = schema.get("maximum").and_then(Value::as_f64) {
            // Draft 4 reads `exclusiveMaximum` as a boolean sibling
            let exclusive = schema.get("exclusiveMaximum").and_then(Value::as_bool) == Some(true);
            if (exclusive && value >= limit) || (!exclusive && value > limit) {
                return Err(ValidationError::maximum(
                    path.into(),
                    instance,
                    limit,
                    exclusive,
                ));
            }
        }
        if let Some(limit) = schema.get("minimum").and_then(Value::as_f64) {
            let exclusive = schema.get("exclusiveMinimum").and_then(Value::as_bool) == Some(true);
            if (exclusive && value <= limit) || (!exclusive && value < limit) {
                return Err(ValidationError::minimum(
                    path.into(),
                    instance,
                    limit,
                    exclusive,
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::tests_util;
    use serde_json::{json, Value};
    use test_case::test_case;

    #[test_case(&json!(0))]
    #[test_case(&json!(9))]
    fn integer_within_exclusive_bounds(instance: &Value) {
        let schema = json!({"type": "integer", "minimum": 0, "maximum": 10, "exclusiveMaximum": true});
        tests_util::is_valid(&schema, instance);
    }

    #[test_case(&json!(10))]
    #[test_case(&json!(-1))]
    fn integer_outside_exclusive_bounds(instance: &Value) {
        let schema = json!({"type": "integer", "minimum": 0, "maximum": 10, "exclusiveMaximum": true});
        tests_util::is_not_valid(&schema, instance);
    }

    #[test]
    fn exclusive_minimum_rejects_the_bound_itself() {
        let schema = json!({"minimum": 2, "exclusiveMinimum": true});
        tests_util::is_valid(&schema, &json!(3));
        tests_util::is_not_valid(&schema, &json!(2));
    }

    #[test]
    fn non_boolean_exclusive_sibling_reads_as_inclusive() {
        let schema = json!({"maximum": 10, "exclusiveMaximum": 10});
        tests_util::is_valid(&schema, &json!(10));
    }

    #[test_case(&json!(10), true)]
    #[test_case(&json!(7.5), true)]
    #[test_case(&json!(7), false)]
    fn multiple_of(instance: &Value, expected: bool) {
        let schema = json!({"multipleOf": 2.5});
        if expected {
            tests_util::is_valid(&schema, instance);
        } else {
            tests_util::is_not_valid(&schema, instance);
        }
    }

    #[test]
    fn integers_satisfy_the_number_tag() {
        tests_util::is_valid(&json!({"type": "number"}), &json!(42));
        tests_util::is_not_valid(&json!({"type": "integer"}), &json!(42.5));
    }

    #[test]
    fn type_arrays_accept_any_listed_tag() {
        let schema = json!({"type": ["string", "null"]});
        tests_util::is_valid(&schema, &json!("foo"));
        tests_util::is_valid(&schema, &json!(null));
        tests_util::is_not_valid(&schema, &json!(1));
    }

    #[test]
    fn enum_uses_deep_equality() {
        let schema = json!({"enum": [{"a": 1}, [1, 2], "x", 3]});
        tests_util::is_valid(&schema, &json!({"a": 1.0}));
        tests_util::is_valid(&schema, &json!(3.0));
        tests_util::is_not_valid(&schema, &json!({"a": 2}));
    }

    #[test]
    fn string_length_counts_characters_not_bytes() {
        let schema = json!({"minLength": 3, "maxLength": 3});
        tests_util::is_valid(&schema, &json!("äöü"));
        tests_util::is_not_valid(&schema, &json!("äö"));
    }

    #[test_case("allOf")]
    #[test_case("anyOf")]
    #[test_case("oneOf")]
    #[test_case("not")]
    fn combinators_are_refused(keyword: &str) {
        let schema = json!({ (keyword): [{"type": "string"}] });
        tests_util::expect_error(
            &schema,
            &json!("foo"),
            &format!("root: '{}' is not yet implemented", keyword),
        );
    }

    #[test_case("format", "date-time")]
    #[test_case("pattern", "^a")]
    fn string_keywords_are_refused(keyword: &str, value: &str) {
        let schema = json!({"type": "string", (keyword): value});
        tests_util::expect_error(
            &schema,
            &json!("foo"),
            &format!("root: '{}' is not yet implemented", keyword),
        );
    }

    #[test]
    fn refused_keywords_are_detected_behind_references() {
        let schema = json!({
            "$ref": "#/definitions/combined",
            "definitions": {
                "combined": {"not": {"type": "string"}}
            }
        });
        tests_util::expect_error(&schema, &json!(1), "root: 'not' is not yet implemented");
    }

    #[test]
    fn nested_references_are_chased_to_the_end() {
        let schema = json!({
            "$ref": "#/definitions/c",
            "definitions": {
                "a": {"type": "integer"},
                "b": {"$ref": "#/definitions/a"},
                "c": {"$ref": "#/definitions/b"}
            }
        });
        tests_util::is_valid(&schema, &json!(42));
        tests_util::is_not_valid(&schema, &json!("42"));
    }

    #[test]
    fn unknown_properties_are_rejected_when_additional_forbidden() {
        let schema = json!({"properties": {"a": {}}, "additionalProperties": false});
        tests_util::is_valid(&schema, &json!({"a": 1}));
        tests_util::expect_error(
            &schema,
            &json!({"a": 1, "b": 2}),
            "root: unknown property 'b'",
        );
    }

    #[test]
    fn additional_properties_schema_applies_to_unmatched_keys() {
        let schema = json!({"properties": {"a": {}}, "additionalProperties": {"type": "integer"}});
        tests_util::is_valid(&schema, &json!({"a": "anything", "b": 2}));
        tests_util::is_not_valid(&schema, &json!({"b": "not an integer"}));
    }

    #[test]
    fn every_matching_pattern_applies() {
        let schema = json!({
            "patternProperties": {
                "^a": {"minLength": 2},
                "b$": {"maxLength": 3}
            }
        });
        tests_util::is_valid(&schema, &json!({"ab": "xy"}));
        tests_util::is_not_valid(&schema, &json!({"ab": "x"}));
        tests_util::is_not_valid(&schema, &json!({"ab": "too long"}));
    }

    #[test]
    fn malformed_pattern_is_a_fatal_diagnostic() {
        let schema = json!({"patternProperties": {"(": {}}});
        tests_util::is_not_valid(&schema, &json!({"a": 1}));
    }

    #[test]
    fn dependency_array_requires_the_named_properties() {
        let schema = json!({"dependencies": {"credit_card": ["billing_address"]}});
        tests_util::is_valid(&schema, &json!({"name": "John"}));
        tests_util::expect_error(
            &schema,
            &json!({"credit_card": 5555}),
            "root.dependency-of-credit_card: 'billing_address' is a required property",
        );
    }

    #[test]
    fn dependency_schema_applies_to_the_whole_object() {
        let schema = json!({
            "dependencies": {
                "credit_card": {"required": ["billing_address"]}
            }
        });
        tests_util::is_valid(&schema, &json!({"credit_card": 5555, "billing_address": "x"}));
        tests_util::is_not_valid(&schema, &json!({"credit_card": 5555}));
    }

    #[test]
    fn property_cardinality() {
        let schema = json!({"minProperties": 1, "maxProperties": 2});
        tests_util::is_not_valid(&schema, &json!({}));
        tests_util::is_valid(&schema, &json!({"a": 1, "b": 2}));
        tests_util::is_not_valid(&schema, &json!({"a": 1, "b": 2, "c": 3}));
    }

    #[test]
    fn item_cardinality_and_uniqueness() {
        let schema = json!({"minItems": 1, "maxItems": 3, "uniqueItems": true});
        tests_util::is_not_valid(&schema, &json!([]));
        tests_util::is_valid(&schema, &json!([1, 2]));
        tests_util::is_not_valid(&schema, &json!([1, 1]));
        tests_util::is_not_valid(&schema, &json!([1, 2, 3, 4]));
    }

    #[test]
    fn single_items_schema_applies_to_every_element() {
        let schema = json!({"items": {"type": "integer"}});
        tests_util::is_valid(&schema, &json!([1, 2, 3]));
        tests_util::expect_error(
            &schema,
            &json!([1, "2", 3]),
            "root[1]: '\"2\"' is not of type 'integer'",
        );
    }

    #[test]
    fn additional_items_true_stops_positional_checking() {
        let schema = json!({"items": [{"type": "string"}], "additionalItems": true});
        tests_util::is_valid(&schema, &json!(["a", 1, true, null]));
    }

    #[test]
    fn additional_items_schema_validates_the_tail() {
        let schema = json!({"items": [{"type": "string"}], "additionalItems": {"type": "integer"}});
        tests_util::is_valid(&schema, &json!(["a", 1, 2]));
        tests_util::is_not_valid(&schema, &json!(["a", 1, "nope"]));
    }

    #[test]
    fn inapplicable_constraints_do_not_reject_other_kinds() {
        // a string constraint puts no bound on a number, and vice versa
        tests_util::is_valid(&json!({"maxLength": 3}), &json!(123456));
        tests_util::is_valid(&json!({"maximum": 3}), &json!("123456"));
    }

    mod default_insertion {
        use crate::tests_util;
        use serde_json::json;

        #[test]
        fn disabled_by_default() {
            let validator =
                tests_util::validator_for(&json!({"properties": {"width": {"default": 20}}}));
            let mut instance = json!({});
            validator.validate(&mut instance).unwrap();
            assert_eq!(instance, json!({}));
        }

        #[test]
        fn fills_missing_properties_only() {
            let mut validator =
                tests_util::validator_for(&json!({"properties": {
                    "width": {"type": "integer", "default": 20},
                    "height": {"type": "integer", "default": 10}
                }}));
            validator.enable_default_value_insertion(true);
            let mut instance = json!({"width": 5});
            validator.validate(&mut instance).unwrap();
            assert_eq!(instance, json!({"width": 5, "height": 10}));
        }

        #[test]
        fn inserted_defaults_are_validated_like_present_properties() {
            // insertion happens before the property loop, so a bad default
            // is caught there
            let mut validator = tests_util::validator_for(
                &json!({"properties": {"width": {"type": "string", "default": 20}}}),
            );
            validator.enable_default_value_insertion(true);
            let mut instance = json!({});
            assert!(validator.validate(&mut instance).is_err());
        }

        #[test]
        fn defaults_behind_references_are_not_inserted() {
            let mut validator = tests_util::validator_for(&json!({
                "properties": {"width": {"$ref": "#/definitions/width"}},
                "definitions": {"width": {"default": 20}}
            }));
            validator.enable_default_value_insertion(true);
            let mut instance = json!({});
            validator.validate(&mut instance).unwrap();
            assert_eq!(instance, json!({}));
        }

        #[test]
        fn nested_defaults_apply_when_the_sub_object_is_present() {
            let mut validator = tests_util::validator_for(&json!({
                "properties": {
                    "size": {"properties": {"width": {"default": 20}}}
                }
            }));
            validator.enable_default_value_insertion(true);

            let mut present = json!({"size": {}});
            validator.validate(&mut present).unwrap();
            assert_eq!(present, json!({"size": {"width": 20}}));

            // an absent sub-object is not conjured up
            let mut absent = json!({});
            validator.validate(&mut absent).unwrap();
            assert_eq!(absent, json!({}));
        }
    }
}
