//! Messages exchanged with the host across the worker boundary.

use crate::error::ProtocolError;
use crate::render::{FeatureCollection, RenderRequest};
use crate::topology::TopoJson;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Inbound {
    Init(TopoJson),
    RequestRender(RenderRequest),
}

impl Inbound {
    /// Strict decoding of a loosely typed JSON message.
    ///
    /// # Errors
    /// Returns an error if the value does not match any inbound message shape.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Outbound {
    AddLoadingItem,
    RemoveLoadingItem,
    FinishedInit,
    Rendered(FeatureCollection),
    /// A message was rejected before reaching the pipeline
    Error(ErrorReport),
}

impl Outbound {
    pub fn error(err: &impl std::fmt::Display) -> Self {
        Self::Error(ErrorReport {
            message: err.to_string(),
        })
    }
}

/// Wire codec that hands plain JS objects across the worker boundary.
///
/// Values go through JSON text so hosts written in plain JS can post ordinary
/// objects to the worker.
#[cfg(target_arch = "wasm32")]
pub struct JsonCodec;

#[cfg(target_arch = "wasm32")]
impl gloo_worker::Codec for JsonCodec {
    fn encode<I: Serialize>(input: I) -> wasm_bindgen::JsValue {
        // Only crate-defined message types are encoded, and they always serialize
        let text = serde_json::to_string(&input).expect("JSON encode failed");
        js_sys::JSON::parse(&text).unwrap_or_else(|_| wasm_bindgen::JsValue::from_str(&text))
    }

    fn decode<O: for<'de> Deserialize<'de>>(input: wasm_bindgen::JsValue) -> O {
        let text = input
            .as_string()
            .or_else(|| js_sys::JSON::stringify(&input).ok().and_then(|s| s.as_string()))
            .unwrap_or_default();
        // Unreadable payloads decode as null so the protocol layer can reject them
        serde_json::from_str(&text)
            .or_else(|_| serde_json::from_value(serde_json::Value::Null))
            .expect("JSON decode failed")
    }
}
