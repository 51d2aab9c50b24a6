//! WebAssembly bindings for the SigTail verifier.
//!
//! Everything a browser extension or userscript needs to check tokens on a
//! page, except the HTTP fetch of the published JWK, which stays with the
//! host.
//!
//! ```js
//! import init, { findTokens, pageMessage, verifyToken } from './sigtail_wasm.js';
//! await init();
//!
//! const message = pageMessage(window.location.href);
//! for (const t of JSON.parse(findTokens(document.body.innerText))) {
//!   const jwk = await fetch(t.rawUrl).then(r => r.text());
//!   const ok = verifyToken(jwk, t.token, message);
//! }
//! ```

use wasm_bindgen::prelude::*;

/// One-time initialisation called at the start of every exported function.
///
/// Installs the `console_error_panic_hook` when the feature is enabled so
/// that Rust panics are forwarded to the browser console as readable errors
/// rather than appearing as generic "unreachable" WASM traps.
fn setup() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_err(e: sigtail::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse a `sigtail:` token and return a JSON string:
///
/// ```json
/// { "location": "abc123", "rawUrl": "https://pastebin.com/raw/abc123" }
/// ```
///
/// Throws a descriptive string if the token is malformed.
#[wasm_bindgen(js_name = parseToken)]
pub fn parse_token(token: &str) -> Result<String, JsValue> {
    setup();
    let assertion = sigtail::assertion::decode(token).map_err(js_err)?;
    let obj = serde_json::json!({
        "location": assertion.location().as_str(),
        "rawUrl":   assertion.location().raw_url(),
    });
    Ok(obj.to_string())
}

/// Find every token in `text` and return a JSON array:
///
/// ```json
/// [{ "start": 12, "end": 114, "token": "sigtail:…", "location": "abc123",
///    "rawUrl": "https://pastebin.com/raw/abc123" }]
/// ```
///
/// `start`/`end` are UTF-8 byte offsets into `text`.
#[wasm_bindgen(js_name = findTokens)]
pub fn find_tokens(text: &str) -> String {
    setup();
    let found: Vec<serde_json::Value> = sigtail::find_assertions(text)
        .into_iter()
        .map(|f| {
            serde_json::json!({
                "start":    f.range.start,
                "end":      f.range.end,
                "token":    &text[f.range.clone()],
                "location": f.assertion.location().as_str(),
                "rawUrl":   f.assertion.location().raw_url(),
            })
        })
        .collect();
    serde_json::Value::Array(found).to_string()
}

/// The message tokens on `page_url` are expected to sign: origin plus path,
/// without query, fragment, or a non-root trailing slash.
#[wasm_bindgen(js_name = pageMessage)]
pub fn page_message(page_url: &str) -> Result<String, JsValue> {
    setup();
    sigtail::verifier::page_message(page_url).map_err(js_err)
}

/// Verify `token` over `message` using the fetched JWK document.
///
/// Returns `false` for a signature mismatch. Throws if the token or the JWK
/// is malformed.
#[wasm_bindgen(js_name = verifyToken)]
pub fn verify_token(jwk_json: &str, token: &str, message: &str) -> Result<bool, JsValue> {
    setup();
    let assertion = sigtail::assertion::decode(token).map_err(js_err)?;
    sigtail::verifier::verify_with_jwk(jwk_json, &assertion, message).map_err(js_err)
}

/// Normalize a user-entered publish location to its id.
#[wasm_bindgen(js_name = normalizeLocation)]
pub fn normalize_location(raw: &str) -> String {
    setup();
    sigtail::normalize(raw).to_string()
}
