//! Transport envelope codec.
//!
//! Encodes a claim into the `x-payment` header value and a payload into the
//! request body, and decodes a raw HTTP response into a [`RequestResult`].

use serde_json::Value;
use tracing::warn;

use crate::error::X402Result;
use crate::result::{HttpResponse, Payload, RequestResult, ResponseHeaders};
use crate::types::{PaymentClaim, CONTENT_TYPE_JSON};

/// Body sent when the caller supplies no payload.
pub const EMPTY_BODY: &str = "{}";

/// Serialize a claim to compact single-line JSON for the `x-payment` header.
///
/// Control characters inside string fields are JSON-escaped, so the result
/// never contains a raw newline. Non-ASCII characters are written as
/// `\uXXXX` escapes (surrogate pairs above the BMP), so the value is plain
/// ASCII and decodes to the same claim.
pub fn encode_header(claim: &PaymentClaim) -> X402Result<String> {
    Ok(escape_non_ascii(&serde_json::to_string(claim)?))
}

/// Replace every non-ASCII char in serialized JSON with `\uXXXX` escapes.
///
/// Non-ASCII only occurs inside JSON strings, where the escape is equivalent.
fn escape_non_ascii(json: &str) -> String {
    if json.is_ascii() {
        return json.to_string();
    }

    let mut out = String::with_capacity(json.len() + 16);
    let mut units = [0u16; 2];
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}

/// Serialize a request body, defaulting to `{}`.
///
/// `None`, JSON `null` and an empty object all encode as `{}`.
pub fn encode_body(data: Option<&Value>) -> X402Result<String> {
    match data {
        None | Some(Value::Null) => Ok(EMPTY_BODY.to_string()),
        Some(Value::Object(map)) if map.is_empty() => Ok(EMPTY_BODY.to_string()),
        Some(value) => Ok(serde_json::to_string(value)?),
    }
}

/// Whether a content-type header value declares a JSON body.
fn is_json_content_type(value: &str) -> bool {
    value
        .trim_start()
        .to_ascii_lowercase()
        .starts_with(CONTENT_TYPE_JSON)
}

/// Look up a header by case-insensitive name.
fn header_value<'a>(headers: &'a ResponseHeaders, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Decode a raw HTTP response.
///
/// Success is strictly `status == 200`. The payload is parsed JSON when the
/// `content-type` header starts with `application/json`; otherwise, or if
/// the declared JSON does not parse, it is the raw text.
pub fn decode_response(status: u16, headers: ResponseHeaders, raw_body: String) -> RequestResult {
    let declares_json = header_value(&headers, "content-type")
        .map(is_json_content_type)
        .unwrap_or(false);

    let payload = if declares_json {
        match serde_json::from_str::<Value>(&raw_body) {
            Ok(value) => Payload::Json(value),
            Err(e) => {
                warn!(status, error = %e, "Response declared JSON but did not parse");
                Payload::Text(raw_body)
            }
        }
    } else {
        Payload::Text(raw_body)
    };

    RequestResult::from_response(HttpResponse {
        status_code: status,
        payload,
        headers,
    })
}
