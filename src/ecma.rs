//! Translation of ECMA 262 regular expressions, the dialect `patternProperties`
//! keys are written in, to the syntax understood by the backtracking engine.
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Index;

static CONTROL_GROUPS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\c[A-Za-z]").expect("Is a valid regex"));

/// ECMA 262 has differences in what class escapes mean; the engine itself is
/// `fancy_regex`, whose backtracking covers the lookaround constructs the
/// `regex` crate rejects.
pub(crate) fn compile(pattern: &str) -> Result<fancy_regex::Regex, fancy_regex::Error> {
    let pattern = CONTROL_GROUPS_RE.replace_all(pattern, replace_control_group);
    fancy_regex::Regex::new(
        &pattern
            .replace(r"\d", "[0-9]")
            .replace(r"\D", "[^0-9]")
            .replace(r"\w", "[A-Za-z0-9_]")
            .replace(r"\W", "[^A-Za-z0-9_]")
            .replace(r"\s", "[ \t\n\r\x0b\x0c]")
            .replace(r"\S", "[^ \t\n\r\x0b\x0c]"),
    )
}

fn replace_control_group(captures: &Captures) -> String {
    // There will be no overflow, because the minimum value is 65 (char 'A')
    ((captures
        .index(0)
        .trim_start_matches(r"\c")
        .chars()
        .next()
        .expect("This is always present because of the regex rule. It has [A-Za-z] next")
        .to_ascii_uppercase() as u8
        - 64) as char)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::compile;
    use test_case::test_case;

    #[test_case("^x-", "x-foo", true)]
    #[test_case("^x-", "y-foo", false)]
    #[test_case(r"\d+", "line 42", true)]
    #[test_case(r"^\w+$", "snake_case_1", true)]
    #[test_case(r"^\w+$", "kebab-case", false)]
    #[test_case(r"\cJ", "\n", true; "control group")]
    #[test_case("a(?!b)", "ac", true; "negative lookahead")]
    fn translated_patterns(pattern: &str, text: &str, expected: bool) {
        let re = compile(pattern).expect("A valid pattern");
        assert_eq!(re.is_match(text).expect("Match never fails here"), expected);
    }

    #[test]
    fn rejects_malformed_patterns() {
        assert!(compile("(unclosed").is_err());
    }
}
