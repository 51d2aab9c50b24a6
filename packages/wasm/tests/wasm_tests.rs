//! wasm-bindgen-test integration tests for the SigTail WASM bindings.
//!
//! Run with:
//!   wasm-pack test packages/wasm --node
//!
//! These tests compile to WASM and execute in a Node.js process, verifying
//! the exported API surface works end-to-end in a JavaScript host.

use wasm_bindgen_test::*;

// Configure all tests in this file to run in Node.js (no browser required).
wasm_bindgen_test_configure!(run_in_node_experimental);

use sigtail::{to_jwk, Assertion, KeyPair};
use sigtail_wasm::{find_tokens, normalize_location, page_message, parse_token, verify_token};

fn signed(message: &str) -> (String, String) {
    let key = KeyPair::from_seed(&[11u8; 32]);
    let token = Assertion::issue(&key, &sigtail::normalize("abc123"), message)
        .unwrap()
        .to_string();
    (to_jwk(&key.public_key()).to_json_pretty(), token)
}

// ---------------------------------------------------------------------------
// parseToken()
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn parse_token_returns_location() {
    let (_, token) = signed("https://example.com/me");
    let json = parse_token(&token).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["location"].as_str(), Some("abc123"));
    assert_eq!(parsed["rawUrl"].as_str(), Some("https://pastebin.com/raw/abc123"));
}

#[wasm_bindgen_test]
fn parse_token_rejects_garbage() {
    assert!(parse_token("not-a-token").is_err());
}

// ---------------------------------------------------------------------------
// verifyToken()
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn verify_token_accepts_matching_message() {
    let (jwk, token) = signed("https://example.com/me");
    assert_eq!(verify_token(&jwk, &token, "https://example.com/me").unwrap(), true);
}

#[wasm_bindgen_test]
fn verify_token_rejects_other_message() {
    let (jwk, token) = signed("https://example.com/me");
    assert_eq!(verify_token(&jwk, &token, "https://example.com/you").unwrap(), false);
}

#[wasm_bindgen_test]
fn verify_token_throws_on_bad_jwk() {
    let (_, token) = signed("m");
    assert!(verify_token("{}", &token, "m").is_err());
}

// ---------------------------------------------------------------------------
// findTokens() / pageMessage() / normalizeLocation()
// ---------------------------------------------------------------------------

#[wasm_bindgen_test]
fn find_tokens_reports_offsets() {
    let (_, token) = signed("m");
    let text = format!("bio: {token}");
    let parsed: serde_json::Value = serde_json::from_str(&find_tokens(&text)).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["start"].as_u64(), Some(5));
    assert_eq!(arr[0]["token"].as_str(), Some(token.as_str()));
}

#[wasm_bindgen_test]
fn page_message_strips_query() {
    assert_eq!(
        page_message("https://x.com/me/?s=1").unwrap(),
        "https://x.com/me"
    );
}

#[wasm_bindgen_test]
fn normalize_location_strips_prefix() {
    assert_eq!(normalize_location("https://pastebin.com/raw/abc123/"), "abc123");
}

#[wasm_bindgen_test]
fn normalize_location_is_safe_to_call_repeatedly() {
    // Each call runs the one-time setup again.
    for _ in 0..3 {
        assert_eq!(normalize_location("  "), "<pastebin_path>");
    }
}
