//! Prompt construction for the banned-content check.
//!
//! Pure construction: a fixed system instruction enumerating the output
//! contract, plus a user message carrying the serialized request payload.
//! No input is rejected here; non-emptiness checks live at the transport
//! boundary.

use serde_json::json;

use crate::protocol::ChatMessage;
use crate::types::ModerationRequest;

/// System instruction sent with every request. Instructs the model to
/// answer with a single JSON object of the verdict shape.
pub const SYSTEM_PROMPT: &str = "你将收到一个待审核文本和一组可选违禁词。严格按照以下要求输出：\n- 仅输出一个 JSON 对象，不要任何额外文本或解释\n- 结构：{ hasViolation: boolean, matchedTerms: string[], reasoning: string }\n- 规则：\n  1) hasViolation 为 true 当文本直接或变体匹配到违禁，或语义上包含违禁含义\n  2) matchedTerms 为命中的违禁词或其变体（去重，最多 10 个）\n  3) reasoning 用简洁中文说明关键依据，避免复述原文";

/// Build the two-message payload for one classification request.
///
/// `customBanned` is always present in the user payload, defaulting to an
/// empty list, so the model sees a stable shape.
pub fn build_messages(request: &ModerationRequest) -> Vec<ChatMessage> {
    let payload = json!({
        "text": request.text,
        "customBanned": request.custom_banned.clone().unwrap_or_default(),
    });

    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(payload.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_messages_system_first() {
        let messages = build_messages(&ModerationRequest::new("你好"));
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, SYSTEM_PROMPT);
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn test_user_payload_contains_text_and_empty_terms() {
        let messages = build_messages(&ModerationRequest::new("待审核文本"));
        let payload: serde_json::Value = serde_json::from_str(&messages[1].content).unwrap();
        assert_eq!(payload["text"], "待审核文本");
        assert_eq!(payload["customBanned"], serde_json::json!([]));
    }

    #[test]
    fn test_user_payload_forwards_custom_terms() {
        let request = ModerationRequest::new("text")
            .with_custom_banned(vec!["违禁A".to_string(), "违禁B".to_string()]);
        let messages = build_messages(&request);
        let payload: serde_json::Value = serde_json::from_str(&messages[1].content).unwrap();
        assert_eq!(payload["customBanned"], serde_json::json!(["违禁A", "违禁B"]));
    }
}
