//! Boundary-aware keyword matching.
//!
//! Compiles the configured keyword list into a single case-insensitive
//! alternation and classifies free text against it. Word boundaries use
//! Unicode-aware classes so a keyword never matches inside a larger token:
//! "apple" does not match "pineapple". Growth to the right is allowed per
//! rule, so "apple" with the suffix policy enabled does match "applesauce".

use crate::{Error, Result};
use regex::Regex;

/// Left boundary: start of text or a non-word character.
const LEFT_BOUNDARY: &str = r"(?:^|[^\p{L}\p{N}_])";
/// Right boundary: end of text or a non-word character.
const RIGHT_BOUNDARY: &str = r"(?:$|[^\p{L}\p{N}_])";
/// Open-ended tail of word characters for suffix-allowing rules.
const SUFFIX_CLASS: &str = r"[\p{L}\p{N}_]*";

/// A literal trigger phrase plus its suffix-matching policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRule {
    /// The literal word or phrase to match.
    pub phrase: String,
    /// Whether the phrase may grow to the right inside a larger token
    /// ("apple" matching "applesauce"). When `false` only the exact token
    /// matches.
    pub allow_suffix: bool,
}

impl KeywordRule {
    /// Creates a rule that allows suffix growth.
    #[must_use]
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            allow_suffix: true,
        }
    }

    /// Creates a rule that matches only the exact token.
    #[must_use]
    pub fn exact(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            allow_suffix: false,
        }
    }
}

/// Compiled topic matcher.
///
/// Built once from the configured rules at startup; immutable afterwards.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    /// Compiled alternation over all rules.
    regex: Regex,
    /// Rules that survived trimming, in configuration order.
    rules: Vec<KeywordRule>,
}

impl KeywordMatcher {
    /// Compiles the given rules into a matcher.
    ///
    /// Phrases are trimmed and blank entries discarded. Rule order is
    /// preserved as alternation order, so when two rules could match at the
    /// same position the one listed first wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when no rules remain after trimming.
    pub fn compile(rules: &[KeywordRule]) -> Result<Self> {
        let kept: Vec<KeywordRule> = rules
            .iter()
            .filter(|rule| !rule.phrase.trim().is_empty())
            .map(|rule| KeywordRule {
                phrase: rule.phrase.trim().to_string(),
                allow_suffix: rule.allow_suffix,
            })
            .collect();

        if kept.is_empty() {
            return Err(Error::Config(
                "keyword list is empty after trimming blanks".to_string(),
            ));
        }

        let pattern = build_pattern(&kept);
        let regex = Regex::new(&pattern)
            .map_err(|e| Error::Config(format!("keyword pattern failed to compile: {e}")))?;

        Ok(Self { regex, rules: kept })
    }

    /// Classifies `text`, returning the first matched span in scan order.
    ///
    /// The span is the keyword (plus any allowed suffix) exactly as it
    /// appears in the input, original casing included; boundary characters
    /// are not part of it. Empty and whitespace-only text never matches.
    #[must_use]
    pub fn classify<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|span| span.as_str())
    }

    /// Returns the rules this matcher was compiled from.
    #[must_use]
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Returns the compiled pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Builds the alternation pattern over all rules.
///
/// Each phrase is literal-escaped with internal whitespace folded to `\s+`,
/// followed by the open suffix class unless the rule is exact. The boundary
/// assertions wrap the whole group once, not each alternative.
fn build_pattern(rules: &[KeywordRule]) -> String {
    let alternation = rules
        .iter()
        .map(|rule| {
            let literal = rule
                .phrase
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+");
            if rule.allow_suffix {
                format!("{literal}{SUFFIX_CLASS}")
            } else {
                literal
            }
        })
        .collect::<Vec<_>>()
        .join("|");

    format!("(?i){LEFT_BOUNDARY}({alternation}){RIGHT_BOUNDARY}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn fruit_matcher() -> KeywordMatcher {
        KeywordMatcher::compile(&[KeywordRule::new("apple"), KeywordRule::exact("kiwi")]).unwrap()
    }

    #[test_case("I ate an apple", Some("apple") ; "standalone token")]
    #[test_case("apple", Some("apple") ; "whole text")]
    #[test_case("An APPLE a day", Some("APPLE") ; "span keeps input casing")]
    #[test_case("applesauce for lunch", Some("applesauce") ; "suffix growth allowed")]
    #[test_case("apple_123", Some("apple_123") ; "suffix spans digits and underscore")]
    #[test_case("pineapple pie", None ; "embedded on the left never matches")]
    #[test_case("snapple", None ; "embedded single token")]
    #[test_case("grape and orange", None ; "no keyword present")]
    #[test_case("", None ; "empty text")]
    #[test_case("   \t  ", None ; "whitespace only text")]
    fn test_classify(text: &str, expected: Option<&str>) {
        assert_eq!(fruit_matcher().classify(text), expected);
    }

    #[test_case("one kiwi please", Some("kiwi") ; "exact token matches")]
    #[test_case("kiwis", None ; "exact rule rejects suffix")]
    #[test_case("kiwifruit", None ; "exact rule rejects longer token")]
    fn test_classify_exact_rule(text: &str, expected: Option<&str>) {
        assert_eq!(fruit_matcher().classify(text), expected);
    }

    #[test]
    fn test_leftmost_span_wins_over_rule_order() {
        let matcher =
            KeywordMatcher::compile(&[KeywordRule::new("banana"), KeywordRule::new("apple")])
                .unwrap();

        assert_eq!(matcher.classify("apple before banana"), Some("apple"));
    }

    #[test]
    fn test_first_listed_rule_wins_at_same_position() {
        let longer_first =
            KeywordMatcher::compile(&[KeywordRule::new("apple pie"), KeywordRule::new("apple")])
                .unwrap();
        let shorter_first =
            KeywordMatcher::compile(&[KeywordRule::new("apple"), KeywordRule::new("apple pie")])
                .unwrap();

        assert_eq!(longer_first.classify("fresh apple pie"), Some("apple pie"));
        assert_eq!(shorter_first.classify("fresh apple pie"), Some("apple"));
    }

    #[test]
    fn test_multiword_phrase_folds_whitespace() {
        let matcher = KeywordMatcher::compile(&[KeywordRule::new("apple  pie")]).unwrap();

        assert_eq!(matcher.classify("warm apple pie"), Some("apple pie"));
        assert_eq!(matcher.classify("warm apple \t pie"), Some("apple \t pie"));
        assert_eq!(matcher.classify("applepie"), None);
    }

    #[test]
    fn test_metacharacters_match_literally() {
        let matcher = KeywordMatcher::compile(&[KeywordRule::exact("c++")]).unwrap();

        assert_eq!(matcher.classify("we write c++ here"), Some("c++"));
        assert_eq!(matcher.classify("cpp only"), None);
    }

    #[test]
    fn test_unicode_word_boundaries() {
        let matcher = KeywordMatcher::compile(&[KeywordRule::new("яблок")]).unwrap();

        assert_eq!(matcher.classify("запахло яблоками"), Some("яблоками"));
        assert_eq!(matcher.classify("тут ЯБЛОКО"), Some("ЯБЛОКО"));
        assert_eq!(matcher.classify("подъяблоко"), None);
    }

    #[test]
    fn test_compile_rejects_empty_rule_list() {
        assert!(matches!(
            KeywordMatcher::compile(&[]),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            KeywordMatcher::compile(&[KeywordRule::new("  "), KeywordRule::new("")]),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_blank_rules_are_dropped_not_matched() {
        let matcher =
            KeywordMatcher::compile(&[KeywordRule::new(" "), KeywordRule::new("apple")]).unwrap();

        assert_eq!(matcher.rules().len(), 1);
        assert_eq!(matcher.classify("an apple"), Some("apple"));
    }

    #[test]
    fn test_pattern_is_case_insensitive_and_grouped() {
        let matcher = fruit_matcher();

        assert!(matcher.pattern().starts_with("(?i)"));
        assert!(matcher.pattern().contains('|'));
    }
}
