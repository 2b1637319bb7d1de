//! Defensive JSON parsing of model replies.

use serde_json::Value;
use verifact_core::{Judgement, RawVerdict};

/// Parse a model reply into a [`RawVerdict`].
///
/// Tries the whole trimmed reply first, then the span from the first `{` to
/// the last `}` (recovering objects wrapped in prose or code fences). Only a
/// JSON object counts as a parse; anything else ends up as
/// [`RawVerdict::Unparsed`] carrying the trimmed reply.
pub fn parse_reply(reply: &str) -> RawVerdict {
    let trimmed = reply.trim();

    if let Some(judgement) = parse_object(trimmed) {
        return RawVerdict::Structured(judgement);
    }
    if let Some(judgement) = embedded_object(trimmed).and_then(parse_object) {
        return RawVerdict::Structured(judgement);
    }

    RawVerdict::Unparsed {
        raw_response: trimmed.to_string(),
    }
}

fn parse_object(text: &str) -> Option<Judgement> {
    match serde_json::from_str::<Value>(text).ok()? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

fn embedded_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn structured(raw: RawVerdict) -> Judgement {
        match raw {
            RawVerdict::Structured(j) => j,
            other => panic!("expected structured verdict, got {other:?}"),
        }
    }

    #[test]
    fn bare_json_object() {
        let j = structured(parse_reply(
            r#"{"verdict":"REFUTED","explanation":"No.","confidence":92,"sources":["https://www.snopes.com/x"]}"#,
        ));
        assert_eq!(j.verdict, "REFUTED");
        assert_eq!(j.explanation, "No.");
        assert_eq!(j.confidence, 92.0);
        assert_eq!(j.sources, vec!["https://www.snopes.com/x".to_string()]);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let j = structured(parse_reply("\n\n  {\"verdict\":\"SUPPORTED\"}  \n"));
        assert_eq!(j.verdict, "SUPPORTED");
    }

    #[test]
    fn fenced_reply_with_prose_is_recovered() {
        let reply = "Sure! ```json\n{\"verdict\":\"SUPPORTED\",\"explanation\":\"Confirmed by two outlets.\",\"confidence\":85,\"sources\":[\"https://www.bbc.com/a\"]}\n```";
        let j = structured(parse_reply(reply));
        assert_eq!(j.verdict, "SUPPORTED");
        assert_eq!(j.explanation, "Confirmed by two outlets.");
        assert_eq!(j.confidence, 85.0);
    }

    #[test]
    fn nested_braces_use_outermost_span() {
        let reply = "Result: {\"verdict\":\"REFUTED\",\"meta\":{\"k\":1}} done";
        assert_eq!(structured(parse_reply(reply)).verdict, "REFUTED");
    }

    #[test]
    fn prose_only_is_unparsed_and_trimmed() {
        assert_eq!(
            parse_reply("  I cannot determine this.  "),
            RawVerdict::Unparsed {
                raw_response: "I cannot determine this.".into()
            }
        );
    }

    #[test]
    fn broken_json_is_unparsed() {
        let reply = "{\"verdict\": \"SUPPORTED\", \"explanation\": ";
        assert_eq!(
            parse_reply(reply),
            RawVerdict::Unparsed {
                raw_response: reply.trim().into()
            }
        );
    }

    #[test]
    fn reversed_braces_are_unparsed() {
        assert!(matches!(
            parse_reply("} nothing here {"),
            RawVerdict::Unparsed { .. }
        ));
    }

    #[test]
    fn closing_brace_before_opening_brace_is_unparsed() {
        assert_eq!(
            parse_reply("Verdict: } see below { pending"),
            RawVerdict::Unparsed {
                raw_response: "Verdict: } see below { pending".into()
            }
        );
    }

    #[test]
    fn non_object_json_is_unparsed() {
        assert!(matches!(parse_reply("[1, 2, 3]"), RawVerdict::Unparsed { .. }));
        assert!(matches!(parse_reply("\"SUPPORTED\""), RawVerdict::Unparsed { .. }));
    }

    #[test]
    fn empty_reply_is_unparsed_empty() {
        assert_eq!(
            parse_reply(""),
            RawVerdict::Unparsed {
                raw_response: String::new()
            }
        );
    }
}
