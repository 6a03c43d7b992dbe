use super::*;

// ===== chat completions =====

#[test]
fn cc_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "Hello!" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.text, "Hello!");
    assert_eq!(resp.model, "gpt-4o-mini");
    assert_eq!(resp.input_tokens, 10);
    assert_eq!(resp.output_tokens, 5);
}

#[test]
fn cc_parse_missing_choices() {
    let json = serde_json::json!({ "model": "gpt-4o-mini", "choices": [] }).to_string();
    assert!(matches!(parse_chat_completions_response(&json), Err(LlmError::ApiParse(_))));
}

#[test]
fn cc_parse_null_content_is_empty_response() {
    let json = serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": null } }]
    })
    .to_string();
    assert!(matches!(parse_chat_completions_response(&json), Err(LlmError::EmptyResponse)));
}

// ===== responses API =====

#[test]
fn resp_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4o-mini",
        "output": [{
            "type": "message",
            "role": "assistant",
            "content": [
                { "type": "output_text", "text": "Hi " },
                { "type": "output_text", "text": "there" }
            ]
        }],
        "usage": { "input_tokens": 8, "output_tokens": 3 }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.text, "Hi there");
    assert_eq!(resp.input_tokens, 8);
    assert_eq!(resp.output_tokens, 3);
}

#[test]
fn resp_parse_skips_non_message_items() {
    let json = serde_json::json!({
        "output": [
            { "type": "reasoning", "summary": [] },
            { "type": "message", "content": [{ "type": "output_text", "text": "answer" }] }
        ]
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.text, "answer");
}

#[test]
fn resp_parse_output_text_shortcut() {
    let json = serde_json::json!({ "output_text": "short" }).to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.text, "short");
}

#[test]
fn resp_parse_no_text_is_empty_response() {
    let json = serde_json::json!({ "output": [] }).to_string();
    assert!(matches!(parse_responses_response(&json), Err(LlmError::EmptyResponse)));
}

#[test]
fn resp_parse_invalid_json() {
    assert!(matches!(parse_responses_response("{"), Err(LlmError::ApiParse(_))));
}
