//! HTTP protocol binding for CloudEvents.
//!
//! Supports the binary content mode (attributes in `ce-*` headers, data in the
//! body) and the structured content mode (`application/cloudevents+json`).
//! A request that is neither yields no event.

use axum::http::{HeaderMap, header::CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, warn};

use crate::base::types::CloudEvent;

const STRUCTURED_CONTENT_TYPE: &str = "application/cloudevents+json";

/// Decodes a CloudEvent from an HTTP request, if the request carries one.
pub fn from_http(headers: &HeaderMap, body: &[u8]) -> Option<CloudEvent> {
    let content_type = header(headers, CONTENT_TYPE.as_str());

    if content_type.is_some_and(|ct| ct.starts_with(STRUCTURED_CONTENT_TYPE)) {
        return match serde_json::from_slice::<CloudEvent>(body) {
            Ok(event) => Some(event),
            Err(err) => {
                warn!("Malformed structured CloudEvent: {}", err);
                None
            }
        };
    }

    let (Some(id), Some(source), Some(specversion), Some(ty)) = (header(headers, "ce-id"), header(headers, "ce-source"), header(headers, "ce-specversion"), header(headers, "ce-type")) else {
        debug!("Request does not carry CloudEvent attributes.");
        return None;
    };

    Some(CloudEvent {
        id: id.to_string(),
        source: source.to_string(),
        specversion: specversion.to_string(),
        ty: ty.to_string(),
        datacontenttype: content_type.map(str::to_string),
        data: decode_data(content_type, body),
    })
}

/// Reads the body of a binary mode event.
fn decode_data(content_type: Option<&str>, body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }

    let is_json = content_type.is_none_or(|ct| ct.contains("json"));
    if is_json && let Ok(value) = serde_json::from_slice(body) {
        return value;
    }

    Value::String(String::from_utf8_lossy(body).into_owned())
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

// Tests.
