//! Canonical identifiers for schemas and their nested sub-schemas.
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use std::fmt;
use url::Url;

pub(crate) const DEFAULT_ROOT_URL: &str = "json-schema:///";

pub(crate) static DEFAULT_SCOPE: Lazy<Url> =
    Lazy::new(|| Url::parse(DEFAULT_ROOT_URL).expect("Is a valid URL"));

/// An absolute address of a (sub-)schema: a base URL plus a fragment pointer.
///
/// The bare root document is identified by `#`; sub-schemas get fragments of
/// the shape `#/properties/street`, and documents with their own `id` carry
/// it as the base, e.g. `http://example.com/address#/properties/street`.
///
/// Equality, ordering and hashing follow the canonical `(base, pointer)`
/// form, so `SchemaUri` can serve as a mapping key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaUri {
    base: Url,
    fragment: String,
}

impl SchemaUri {
    /// The identifier of the root document, `#`.
    pub fn root() -> SchemaUri {
        SchemaUri {
            base: DEFAULT_SCOPE.clone(),
            fragment: String::new(),
        }
    }

    /// Parse an identifier, resolving it against the default document scope.
    pub fn parse(input: &str) -> Result<SchemaUri, url::ParseError> {
        SchemaUri::root().derive(input)
    }

    /// Resolve a possibly-relative `reference` against this identifier.
    ///
    /// A `#`-only reference keeps the current base and replaces the fragment;
    /// a reference with its own authority or path replaces the base and
    /// resets the fragment to the referenced one (or empty if absent).
    pub fn derive(&self, reference: &str) -> Result<SchemaUri, url::ParseError> {
        let resolved = Url::options().base_url(Some(&self.base)).parse(reference)?;
        Ok(SchemaUri::from_url(resolved))
    }

    /// Extend the fragment pointer by one segment. The segment must already
    /// be escaped via [`SchemaUri::escape`].
    #[must_use]
    pub fn append(&self, segment: &str) -> SchemaUri {
        let mut fragment = String::with_capacity(self.fragment.len() + segment.len() + 1);
        fragment.push_str(&self.fragment);
        fragment.push('/');
        fragment.push_str(segment);
        SchemaUri {
            base: self.base.clone(),
            fragment,
        }
    }

    /// Turn an object key into a fragment pointer segment (`~` -> `~0`, `/` -> `~1`).
    #[must_use]
    pub fn escape(key: &str) -> String {
        key.replace('~', "~0").replace('/', "~1")
    }

    /// The base URL, without the fragment. Two identifiers with the same
    /// base address sub-schemas of the same document.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.base
    }

    /// The fragment pointer, e.g. `/properties/street` (empty for a document root).
    #[must_use]
    pub fn pointer(&self) -> &str {
        &self.fragment
    }

    fn from_url(mut url: Url) -> SchemaUri {
        let fragment = match url.fragment() {
            None | Some("") => String::new(),
            Some(encoded) => percent_decode_str(encoded).decode_utf8_lossy().into_owned(),
        };
        url.set_fragment(None);
        SchemaUri {
            base: url,
            fragment,
        }
    }
}

impl fmt::Display for SchemaUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.base != *DEFAULT_SCOPE {
            f.write_str(self.base.as_str())?;
        }
        f.write_str("#")?;
        f.write_str(&self.fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::SchemaUri;
    use test_case::test_case;

    #[test_case("", ""; "tilde and slash free keys are unchanged")]
    #[test_case("street", "street")]
    #[test_case("~tilde", "~0tilde")]
    #[test_case("a/b", "a~1b")]
    #[test_case("~/", "~0~1")]
    fn escaping(key: &str, expected: &str) {
        assert_eq!(SchemaUri::escape(key), expected);
    }

    #[test]
    fn root_displays_as_bare_fragment() {
        assert_eq!(SchemaUri::root().to_string(), "#");
        assert_eq!(SchemaUri::parse("#").unwrap(), SchemaUri::root());
    }

    #[test]
    fn append_extends_the_pointer() {
        let uri = SchemaUri::root()
            .append("properties")
            .append("street")
            .append("0");
        assert_eq!(uri.to_string(), "#/properties/street/0");
    }

    #[test]
    fn fragment_only_reference_keeps_the_base() {
        let base = SchemaUri::parse("http://example.com/address#/a").unwrap();
        let derived = base.derive("#/definitions/street").unwrap();
        assert_eq!(
            derived.to_string(),
            "http://example.com/address#/definitions/street"
        );
        assert_eq!(derived.url(), base.url());
    }

    #[test]
    fn absolute_reference_replaces_base_and_fragment() {
        let base = SchemaUri::parse("http://example.com/address#/a").unwrap();
        let derived = base.derive("http://other/s2").unwrap();
        assert_eq!(derived.to_string(), "http://other/s2#");
        assert_eq!(derived.pointer(), "");
    }

    #[test]
    fn relative_path_reference_joins_against_the_base() {
        let base = SchemaUri::parse("http://example.com/folder/address").unwrap();
        let derived = base.derive("street.json#/a").unwrap();
        assert_eq!(derived.to_string(), "http://example.com/folder/street.json#/a");
    }

    #[test]
    fn empty_fragment_is_normalized() {
        assert_eq!(
            SchemaUri::parse("http://other/s2#").unwrap(),
            SchemaUri::parse("http://other/s2").unwrap()
        );
    }

    #[test]
    fn ordering_is_total_on_base_then_pointer() {
        let mut uris = vec![
            SchemaUri::parse("http://b/#/x").unwrap(),
            SchemaUri::parse("http://a/#/y").unwrap(),
            SchemaUri::parse("http://a/#/x").unwrap(),
        ];
        uris.sort();
        let rendered: Vec<String> = uris.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["http://a/#/x", "http://a/#/y", "http://b/#/x"]);
    }
}
