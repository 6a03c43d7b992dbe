use super::*;
use crate::conversation::Role;
use crate::state::test_helpers;

async fn mount(state: &AppState, mode: &str) -> ConversationSnapshot {
    let body = CreateSessionBody { mode: mode.into(), persona: Persona::Page };
    let (status, Json(snapshot)) = create_session(State(state.clone()), Json(body)).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    snapshot
}

#[tokio::test]
async fn create_session_accepts_tech_alias() {
    let state = test_helpers::test_app_state();
    let snapshot = mount(&state, "tech").await;
    assert_eq!(snapshot.mode, Mode::Terminal);
}

#[tokio::test]
async fn create_session_rejects_unknown_mode() {
    let state = test_helpers::test_app_state();
    let body = CreateSessionBody { mode: "gallery".into(), persona: Persona::Page };
    let err = create_session(State(state), Json(body)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.body.code, "E_INVALID_MODE");
}

#[test]
fn create_body_defaults_to_page_persona() {
    let body: CreateSessionBody = serde_json::from_str(r#"{"mode":"art"}"#).unwrap();
    assert_eq!(body.persona, Persona::Page);
}

#[tokio::test]
async fn get_unknown_session_is_404() {
    let state = test_helpers::test_app_state();
    let err = get_session(State(state), Path(Uuid::new_v4())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submit_returns_outcome_and_snapshot() {
    let state = test_helpers::test_app_state_answering("Gravity is a force.");
    let created = mount(&state, "science").await;

    let body = SubmitBody { question: Some("What is gravity?".into()), image: None };
    let Json(response) = submit(State(state), Path(created.session_id), Json(body)).await.unwrap();

    assert!(matches!(response.outcome, SubmitOutcome::Answered { .. }));
    let texts: Vec<&str> = response.snapshot.entries.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts[1..], ["What is gravity?", "Gravity is a force."]);
    assert!(!response.snapshot.pending);
}

#[tokio::test]
async fn submit_without_question_uses_draft() {
    let state = test_helpers::test_app_state_answering("ok");
    let created = mount(&state, "commercial").await;

    let draft = DraftBody { text: "pricing?".into() };
    let Json(snapshot) = put_draft(State(state.clone()), Path(created.session_id), Json(draft)).await.unwrap();
    assert_eq!(snapshot.draft_input, "pricing?");

    let Json(response) = submit(State(state), Path(created.session_id), Json(SubmitBody::default())).await.unwrap();

    let user = &response.snapshot.entries[1];
    assert_eq!((user.role, user.text.as_str()), (Role::User, "pricing?"));
    assert_eq!(response.snapshot.draft_input, "");
}

#[tokio::test]
async fn empty_submit_is_ignored_not_error() {
    let state = test_helpers::test_app_state();
    let created = mount(&state, "art").await;

    let body = SubmitBody { question: Some("  ".into()), image: None };
    let Json(response) = submit(State(state), Path(created.session_id), Json(body)).await.unwrap();

    let json = serde_json::to_value(&response.outcome).unwrap();
    assert_eq!(json, serde_json::json!({ "kind": "ignored", "reason": "empty_input" }));
    assert!(response.snapshot.entries.is_empty());
}

#[tokio::test]
async fn command_reports_navigation() {
    let state = test_helpers::test_app_state();
    let created = mount(&state, "terminal").await;

    let body = CommandBody { line: "cd commercial".into() };
    let Json(response) = command(State(state), Path(created.session_id), Json(body)).await.unwrap();

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["navigate"], "commercial");
    assert_eq!(json["outcome"]["kind"], "answered");
    assert_eq!(response.snapshot.entries.len(), 3);
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let state = test_helpers::test_app_state();
    let created = mount(&state, "science").await;

    let status = delete_session(State(state.clone()), Path(created.session_id)).await.unwrap();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let err = get_session(State(state.clone()), Path(created.session_id)).await.unwrap_err();
    assert_eq!(err.body.code, "E_SESSION_NOT_FOUND");
    let err = delete_session(State(state), Path(created.session_id)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn router_builds() {
    let _router = crate::routes::app(test_helpers::test_app_state());
}
