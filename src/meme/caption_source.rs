//! Caption requests and `TOP|BOTTOM|HASHTAGS` parsing.

use tracing::{debug, warn};

use super::{CaptionSet, Sourced};
use crate::error::MemeError;
use crate::ports::{CaptionGenerator, CaptionRequest};

/// Delimiter between the three caption fields in the model's answer.
pub const CAPTION_DELIMITER: char = '|';

/// Build the caption instruction for a topic.
#[must_use]
pub fn caption_prompt(topic: &str) -> String {
    format!(
        "Create a funny meme about {topic}. Provide:\n    \
         - Top text (short, bold)\n    \
         - Bottom text (punchline)\n    \
         - 3 hashtags\n    \
         Format: TOP_TEXT|BOTTOM_TEXT|HASHTAGS"
    )
}

/// Parse `TOP|BOTTOM|HASHTAGS`.
///
/// Fields are trimmed. Segments after the third are dropped, so hashtags
/// containing `|` are truncated at it. Empty fields are kept as they are.
///
/// # Errors
///
/// Returns [`MemeError::MalformedCaption`] when fewer than three segments
/// are present.
pub fn parse_captions(text: &str) -> Result<CaptionSet, MemeError> {
    let segments: Vec<&str> = text.split(CAPTION_DELIMITER).collect();
    let [top, bottom, hashtags, rest @ ..] = segments.as_slice() else {
        return Err(MemeError::MalformedCaption { segments: segments.len() });
    };
    if !rest.is_empty() {
        debug!(dropped = rest.len(), "ignoring extra caption segments");
    }
    Ok(CaptionSet {
        top: top.trim().to_string(),
        bottom: bottom.trim().to_string(),
        hashtags: hashtags.trim().to_string(),
    })
}

/// Requests captions for a topic; never fails.
pub struct CaptionSource {
    generator: Box<dyn CaptionGenerator>,
}

impl CaptionSource {
    /// Wrap a caption generator port.
    #[must_use]
    pub fn new(generator: Box<dyn CaptionGenerator>) -> Self {
        Self { generator }
    }

    /// Request and parse captions for `topic`.
    ///
    /// Provider errors and malformed answers yield [`CaptionSet::fallback`]
    /// as a [`Sourced::Fallback`]. One request per call.
    pub async fn request_captions(&self, topic: &str) -> Sourced<CaptionSet> {
        match self.fetch(topic).await {
            Ok(captions) => Sourced::Generated(captions),
            Err(e) => {
                warn!(topic, error = %e, "caption provider failed, using fallback captions");
                Sourced::Fallback { value: CaptionSet::fallback(), reason: e.to_string() }
            }
        }
    }

    async fn fetch(&self, topic: &str) -> Result<CaptionSet, MemeError> {
        let request = CaptionRequest { prompt: caption_prompt(topic) };
        let response = self.generator.complete(&request).await?;
        parse_captions(&response.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeCaptions;
    use std::sync::atomic::Ordering;

    fn captions(top: &str, bottom: &str, hashtags: &str) -> CaptionSet {
        CaptionSet { top: top.into(), bottom: bottom.into(), hashtags: hashtags.into() }
    }

    #[test]
    fn prompt_names_topic_and_format() {
        let prompt = caption_prompt("zoom fatigue");
        assert!(prompt.starts_with("Create a funny meme about zoom fatigue. Provide:"));
        assert!(prompt.contains("- 3 hashtags"));
        assert!(prompt.ends_with("Format: TOP_TEXT|BOTTOM_TEXT|HASHTAGS"));
    }

    #[test]
    fn parses_and_trims_three_segments() {
        let parsed = parse_captions("  ZOOM IS LIFE | MUTE YOURSELF |#wfh #zoom #2020\n").unwrap();
        assert_eq!(parsed, captions("ZOOM IS LIFE", "MUTE YOURSELF", "#wfh #zoom #2020"));
    }

    #[test]
    fn extra_segments_are_dropped() {
        assert_eq!(parse_captions("A|B|C|D").unwrap(), captions("A", "B", "C"));
        assert_eq!(parse_captions("A|B|#x|#y|#z").unwrap(), captions("A", "B", "#x"));
    }

    #[test]
    fn empty_fields_are_kept() {
        assert_eq!(parse_captions("||").unwrap(), captions("", "", ""));
    }

    #[test]
    fn short_responses_are_malformed() {
        assert!(matches!(
            parse_captions("only one segment"),
            Err(MemeError::MalformedCaption { segments: 1 })
        ));
        assert!(matches!(
            parse_captions("TOP|BOTTOM"),
            Err(MemeError::MalformedCaption { segments: 2 })
        ));
        assert!(parse_captions("").is_err());
    }

    #[tokio::test]
    async fn generated_captions_are_parsed() {
        let fake = FakeCaptions::returning("ZOOM IS LIFE|MUTE YOURSELF|#wfh #zoom #2020");
        let last = fake.last_request();
        let source = CaptionSource::new(Box::new(fake));

        let result = source.request_captions("zoom fatigue").await;
        assert_eq!(
            result,
            Sourced::Generated(captions("ZOOM IS LIFE", "MUTE YOURSELF", "#wfh #zoom #2020"))
        );
        let request = last.lock().unwrap().clone().unwrap();
        assert_eq!(request.prompt, caption_prompt("zoom fatigue"));
    }

    #[tokio::test]
    async fn malformed_answer_falls_back() {
        let source = CaptionSource::new(Box::new(FakeCaptions::returning("only one segment")));
        let (captions, reason) = source.request_captions("cats").await.split();
        assert_eq!(captions, CaptionSet::fallback());
        assert!(reason.unwrap().contains("got 1"));
    }

    #[tokio::test]
    async fn provider_error_falls_back_after_one_call() {
        let fake = FakeCaptions::failing("API key not valid");
        let calls = fake.calls();
        let source = CaptionSource::new(Box::new(fake));

        let result = source.request_captions("cats").await;
        match result {
            Sourced::Fallback { value, reason } => {
                assert_eq!(value, CaptionSet::fallback());
                assert!(reason.contains("API key not valid"));
            }
            Sourced::Generated(_) => panic!("expected fallback"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
