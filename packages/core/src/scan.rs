//! Locate `sigtail:` tokens inside free text (bios, posts, comments).
//!
//! Recognition is deliberately narrower than [`decode`](crate::assertion::decode):
//! in running text the location id is limited to ASCII letters and digits
//! so that surrounding punctuation is not swallowed into the match.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::assertion::{self, Assertion};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"sigtail:[A-Za-z0-9]+::[A-Za-z0-9+/]+={0,2}").expect("invalid token regex")
});

/// A token found in text, with its byte range in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundAssertion {
    pub range: Range<usize>,
    pub assertion: Assertion,
}

/// Every well-formed token in `text`, in order of appearance.
///
/// Candidates that match the pattern but fail to decode (for example a
/// truncated signature) are skipped.
pub fn find_assertions(text: &str) -> Vec<FoundAssertion> {
    TOKEN_RE
        .find_iter(text)
        .filter_map(|m| match assertion::decode(m.as_str()) {
            Ok(assertion) => Some(FoundAssertion {
                range: m.range(),
                assertion,
            }),
            Err(e) => {
                tracing::debug!(at = m.start(), error = %e, "skipping token candidate");
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::encode;

    #[test]
    fn finds_token_in_bio() {
        let token = encode("abc123", &[5u8; 64]);
        let text = format!("Rustacean. Proof: {token} (ask me)");
        let found = find_assertions(&text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].range.clone()], token);
        assert_eq!(found[0].assertion.location().as_str(), "abc123");
    }

    #[test]
    fn finds_multiple_tokens_in_order() {
        let a = encode("first", &[1u8; 64]);
        let b = encode("second", &[2u8; 64]);
        let text = format!("{a}\n---\n{b}.");
        let found = find_assertions(&text);
        let ids: Vec<_> = found.iter().map(|f| f.assertion.location().as_str()).collect();
        assert_eq!(ids, ["first", "second"]);
    }

    #[test]
    fn skips_truncated_signature() {
        let token = encode("abc", &[3u8; 64]);
        let truncated = &token[..token.len() - 10];
        assert!(find_assertions(truncated).is_empty());
    }

    #[test]
    fn ignores_plain_text() {
        assert!(find_assertions("no tokens here, sigtail: maybe later").is_empty());
    }

    #[test]
    fn ids_with_punctuation_are_not_recognised_in_text() {
        let token = encode("a-b", &[4u8; 64]);
        assert!(find_assertions(&token).is_empty());
    }
}
