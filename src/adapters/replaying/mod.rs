//! Replaying adapters that serve recorded interactions from cassettes.

pub mod caption_generator;
pub mod image_generator;

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::MemeError;

/// Retrieve the next recorded output for a given port and method.
///
/// # Errors
///
/// Returns an error if the cassette has no more interactions for the port.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, MemeError> {
    let mut guard =
        replayer.lock().map_err(|e| MemeError::Config(format!("replayer lock poisoned: {e}")))?;
    guard
        .next_interaction(port, method)
        .map(|interaction| interaction.output.clone())
        .map_err(MemeError::Config)
}

/// Deserialize a replayed output as `Result<T, MemeError>`.
///
/// A recorded `Err` replays as [`MemeError::Api`] with status 0, carrying
/// the original error text.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, MemeError> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let message = err_val.as_str().unwrap_or("replayed error").to_string();
        return Err(MemeError::Api { status: 0, message });
    }
    let payload = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(payload)
        .map_err(|e| MemeError::Config(format!("Malformed cassette output: {e}")))
}
