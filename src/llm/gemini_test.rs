use super::*;

fn make_response(parts: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": parts },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 34, "totalTokenCount": 46 },
        "modelVersion": "gemini-1.5-flash-002"
    })
    .to_string()
}

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([{ "text": "Gravity is a force." }]));
    let resp = parse_response(&json, "gemini-1.5-flash").unwrap();
    assert_eq!(resp.text, "Gravity is a force.");
    assert_eq!(resp.model, "gemini-1.5-flash-002");
    assert_eq!(resp.input_tokens, 12);
    assert_eq!(resp.output_tokens, 34);
}

#[test]
fn parse_joins_multiple_parts() {
    let json = make_response(serde_json::json!([{ "text": "Hello, " }, { "text": "world" }]));
    let resp = parse_response(&json, "m").unwrap();
    assert_eq!(resp.text, "Hello, world");
}

#[test]
fn parse_missing_model_version_uses_requested_model() {
    let json = serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
    })
    .to_string();
    let resp = parse_response(&json, "gemini-1.5-flash").unwrap();
    assert_eq!(resp.model, "gemini-1.5-flash");
    assert_eq!(resp.input_tokens, 0);
}

#[test]
fn parse_no_candidates_is_empty_response() {
    let json = serde_json::json!({ "candidates": [] }).to_string();
    assert!(matches!(parse_response(&json, "m"), Err(LlmError::EmptyResponse)));
}

#[test]
fn parse_whitespace_only_text_is_empty_response() {
    let json = make_response(serde_json::json!([{ "text": "  \n" }]));
    assert!(matches!(parse_response(&json, "m"), Err(LlmError::EmptyResponse)));
}

#[test]
fn parse_blocked_prompt_is_parse_error() {
    let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    let err = parse_response(&json, "m").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(ref msg) if msg.contains("SAFETY")));
}

#[test]
fn parse_invalid_json() {
    assert!(matches!(parse_response("not json", "m"), Err(LlmError::ApiParse(_))));
}

#[test]
fn request_body_uses_camel_case_wire_names() {
    let body = ApiRequest {
        contents: [ApiContent { role: "user", parts: [ApiPart { text: "hi" }] }],
        generation_config: GenerationConfig { max_output_tokens: 99 },
    };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    assert_eq!(json["generationConfig"]["maxOutputTokens"], 99);
}
