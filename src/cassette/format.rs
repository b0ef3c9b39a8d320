//! On-disk cassette format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session: every port call made during one `memeforge` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Session name, usually `<timestamp>-memeforge`.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Interactions in call order.
    pub interactions: Vec<Interaction>,
}

/// One port call and its result.
///
/// `output` uses the `{"Ok": ..}` / `{"Err": ".."}` convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Global sequence number within the cassette.
    pub seq: u64,
    /// Port name, e.g. `image_generator`.
    pub port: String,
    /// Method name on the port.
    pub method: String,
    /// Serialized request.
    pub input: serde_json::Value,
    /// Serialized result.
    pub output: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_hand_written_yaml() {
        let yaml = r#"
name: fixture
recorded_at: "2026-02-01T00:00:00Z"
commit: test
interactions:
  - seq: 0
    port: caption_generator
    method: complete
    input: {}
    output:
      Ok:
        text: "A|B|C"
"#;
        let cassette: Cassette = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cassette.name, "fixture");
        assert_eq!(cassette.interactions.len(), 1);
        assert_eq!(cassette.interactions[0].port, "caption_generator");
        assert_eq!(cassette.interactions[0].output, json!({"Ok": {"text": "A|B|C"}}));
    }
}
