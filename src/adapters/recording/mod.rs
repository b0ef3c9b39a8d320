//! Recording adapters that capture interactions to cassettes.

pub mod caption_generator;
pub mod image_generator;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
///
/// A value that fails to serialize is logged and left out of the cassette;
/// recording never changes the result the caller sees.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let serialized = serde_json::to_value(input).and_then(|input_json| {
        let output_json = match result {
            Ok(v) => serde_json::json!({ "Ok": serde_json::to_value(v)? }),
            Err(e) => serde_json::json!({ "Err": e.to_string() }),
        };
        Ok((input_json, output_json))
    });

    let (input_json, output_json) = match serialized {
        Ok(pair) => pair,
        Err(e) => {
            warn!(port, method, error = %e, "skipping unserializable interaction");
            return;
        }
    };

    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input_json, output_json),
        Err(e) => warn!(port, method, error = %e, "recorder lock poisoned"),
    }
}
