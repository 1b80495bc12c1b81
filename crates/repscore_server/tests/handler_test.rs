//! Router tests against a scripted provider.

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use repscore_error::{ProviderError, ProviderErrorKind, RepscoreResult};
use repscore_models::{ProviderConfig, ResponsesClient, ResponsesDriver, ResponsesRequest};
use repscore_server::{ApiState, EVALUATE_PATH, Prompts, RepscoreConfig, create_router};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const SCORING_PROMPT: &str = "You are the scoring engine.";
const FEEDBACK_PROMPT: &str = "You are the feedback engine.";

enum Scripted {
    Text(String),
    Failure { status: u16, message: String },
}

/// Driver that replays scripted answers and records every request.
struct ScriptedDriver {
    answers: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ResponsesRequest>>,
}

impl ScriptedDriver {
    fn new(answers: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<ResponsesRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

#[async_trait]
impl ResponsesDriver for ScriptedDriver {
    async fn create_response(&self, request: &ResponsesRequest) -> RepscoreResult<Value> {
        self.requests.lock().expect("lock").push(request.clone());
        let answer = self
            .answers
            .lock()
            .expect("lock")
            .pop_front()
            .expect("unexpected provider call");
        match answer {
            Scripted::Text(text) => Ok(json!({
                "status": "completed",
                "output": [{
                    "type": "message",
                    "content": [{"type": "output_text", "text": text}]
                }]
            })),
            Scripted::Failure { status, message } => {
                Err(ProviderError::new(ProviderErrorKind::Api { status, message }).into())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "test-model"
    }
}

fn test_config() -> RepscoreConfig {
    let mut config = RepscoreConfig::from_toml_str(&format!(
        "[prompts]\nscoring = {:?}\nfeedback = {:?}\n",
        SCORING_PROMPT, FEEDBACK_PROMPT
    ))
    .expect("Valid config");
    config
        .apply_openai_env(Some("sk-test".to_string()), Some("test-model".to_string()))
        .expect("Valid provider");
    config
}

fn app(driver: Arc<dyn ResponsesDriver>) -> Router {
    create_router(ApiState::new(driver, Arc::new(test_config())))
}

async fn send(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("Valid request");
    let response = app.oneshot(request).await.expect("Router responds");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Readable body");
    let value = serde_json::from_slice(&bytes).expect("JSON body");
    (status, value)
}

const SCORING_TEXT: &str = r#"Here is the result:
```json
{"displayedScore": 82, "band": "Strong", "personalBest": true, "badgesAwarded": [{"name": "Closer"}]}
```"#;

const FEEDBACK_TEXT: &str = "Highlights:\n- Clear opener\n- Good discovery questions\n- Calm pacing\n\nGrowth Focus:\n- Confirm the timeline\n\nNext Rep Challenge:\nAsk for the consult before minute five.\n";

#[tokio::test]
async fn test_get_describes_endpoint() {
    let driver = ScriptedDriver::new(Vec::new());
    for uri in [EVALUATE_PATH, "/"] {
        let (status, body) = send(app(driver.clone()), Method::GET, uri, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], json!(true));
        assert!(
            body["message"]
                .as_str()
                .expect("message")
                .starts_with("POST JSON to this endpoint")
        );
    }
    assert!(driver.requests().is_empty());
}

#[tokio::test]
async fn test_other_methods_rejected() {
    let driver = ScriptedDriver::new(Vec::new());
    for method in [Method::PUT, Method::DELETE, Method::PATCH] {
        let (status, body) = send(app(driver.clone()), method, EVALUATE_PATH, "{}").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body,
            json!({"ok": false, "error": "Method Not Allowed. Use POST."})
        );
    }
    assert!(driver.requests().is_empty());
}

#[tokio::test]
async fn test_head_is_not_treated_as_get() {
    let driver = ScriptedDriver::new(Vec::new());
    for uri in [EVALUATE_PATH, "/"] {
        let request = Request::builder()
            .method(Method::HEAD)
            .uri(uri)
            .body(Body::empty())
            .expect("Valid request");
        let response = app(driver.clone())
            .oneshot(request)
            .await
            .expect("Router responds");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
    assert!(driver.requests().is_empty());
}

#[tokio::test]
async fn test_missing_transcript_is_bad_request() {
    let driver = ScriptedDriver::new(Vec::new());
    for payload in ["{}", "", r#"{"transcript": ""}"#, r#"{"transcript": 7}"#] {
        let (status, body) = send(app(driver.clone()), Method::POST, EVALUATE_PATH, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], json!(false));
        assert!(
            body["error"]
                .as_str()
                .expect("error")
                .starts_with("Missing transcript.")
        );
    }
    assert!(driver.requests().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let driver = ScriptedDriver::new(Vec::new());
    let (status, body) = send(app(driver.clone()), Method::POST, EVALUATE_PATH, "{oops").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .expect("error")
            .starts_with("Request body must be valid JSON")
    );
    assert!(driver.requests().is_empty());
}

#[tokio::test]
async fn test_successful_evaluation() {
    let driver = ScriptedDriver::new(vec![
        Scripted::Text(SCORING_TEXT.to_string()),
        Scripted::Text(FEEDBACK_TEXT.to_string()),
    ]);
    let payload = json!({
        "transcript": "USER: Hi, I'm looking at homes.\nAGENT: Great, tell me more.",
        "timing": {"maxSeconds": 300, "actualSeconds": 250},
    });

    let (status, body) = send(
        app(driver.clone()),
        Method::POST,
        EVALUATE_PATH,
        &payload.to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["scoring"]["displayedScore"], json!(82));
    assert_eq!(body["feedbackText"], json!(FEEDBACK_TEXT.trim()));

    let vars = &body["narratorVars"];
    assert_eq!(vars["DISPLAYED_SCORE"], json!(82));
    assert_eq!(vars["BAND"], json!("Strong"));
    assert_eq!(vars["OPTIONAL_PERSONAL_BEST_LINE"], json!("Personal best achieved."));
    assert_eq!(vars["OPTIONAL_BADGE_LINE"], json!("Badge unlocked: Closer"));
    assert_eq!(
        vars["EVALUATION_SUMMARY"],
        json!("Clear opener Good discovery questions")
    );
    assert_eq!(
        vars["EVALUATION_STRENGTHS"],
        json!("Clear opener Good discovery questions Calm pacing")
    );
    assert_eq!(vars["EVALUATION_IMPROVEMENTS"], json!("Confirm the timeline"));
    assert_eq!(
        vars["EVALUATION_NEXT_STEP"],
        json!("Ask for the consult before minute five.")
    );

    let requests = driver.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].instructions(), SCORING_PROMPT);
    assert_eq!(requests[1].instructions(), FEEDBACK_PROMPT);
    for request in &requests {
        assert_eq!(request.model(), "test-model");
        assert_eq!(*request.temperature(), 0.0);
    }

    let scoring_input: Value = serde_json::from_str(requests[0].input()).expect("JSON input");
    assert_eq!(scoring_input["timing"], json!({"maxSeconds": 300, "actualSeconds": 250}));
    assert_eq!(scoring_input["scenario"]["idealCTA"], json!("Schedule a buyer consult and lender pre-approval intro."));

    let feedback_input: Value = serde_json::from_str(requests[1].input()).expect("JSON input");
    assert_eq!(feedback_input["session"], scoring_input);
    assert_eq!(feedback_input["scoring"]["band"], json!("Strong"));
}

#[tokio::test]
async fn test_feedback_without_sections_uses_fallback() {
    let driver = ScriptedDriver::new(vec![
        Scripted::Text(r#"{"displayedScore": 55}"#.to_string()),
        Scripted::Text("Nice try.".to_string()),
    ]);
    let (status, body) = send(
        app(driver),
        Method::POST,
        EVALUATE_PATH,
        r#"{"transcript": "USER: hi"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let vars = &body["narratorVars"];
    assert_eq!(vars["BAND"], Value::Null);
    assert_eq!(vars["OPTIONAL_PERSONAL_BEST_LINE"], json!(""));
    assert_eq!(vars["OPTIONAL_BADGE_LINE"], json!(""));
    assert_eq!(
        vars["EVALUATION_SUMMARY"],
        json!("Solid work. Keep building consistency rep to rep.")
    );
    assert_eq!(vars["EVALUATION_STRENGTHS"], json!(""));
    assert_eq!(vars["EVALUATION_NEXT_STEP"], json!(""));
}

#[tokio::test]
async fn test_scoring_provider_failure_stops_pipeline() {
    let driver = ScriptedDriver::new(vec![Scripted::Failure {
        status: 500,
        message: "upstream exploded".to_string(),
    }]);
    let (status, body) = send(
        app(driver.clone()),
        Method::POST,
        EVALUATE_PATH,
        r#"{"transcript": "USER: hi"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"ok": false, "error": "OpenAI error (500): upstream exploded"})
    );
    assert_eq!(driver.requests().len(), 1);
}

#[tokio::test]
async fn test_unparseable_scoring_output() {
    let driver = ScriptedDriver::new(vec![Scripted::Text(
        "I cannot score this call.".to_string(),
    )]);
    let (status, body) = send(
        app(driver.clone()),
        Method::POST,
        EVALUATE_PATH,
        r#"{"transcript": "USER: hi"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"ok": false, "error": "Could not parse JSON from model output."})
    );
    assert_eq!(driver.requests().len(), 1);
}

#[tokio::test]
async fn test_feedback_failure_discards_scoring() {
    let driver = ScriptedDriver::new(vec![
        Scripted::Text(r#"{"displayedScore": 90}"#.to_string()),
        Scripted::Failure {
            status: 429,
            message: "Rate limit reached".to_string(),
        },
    ]);
    let (status, body) = send(
        app(driver.clone()),
        Method::POST,
        EVALUATE_PATH,
        r#"{"transcript": "USER: hi"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("OpenAI error (429): Rate limit reached"));
    assert!(body.get("scoring").is_none());
    assert_eq!(driver.requests().len(), 2);
}

#[tokio::test]
async fn test_missing_api_key_with_real_client() {
    let config = RepscoreConfig::new(
        Default::default(),
        ProviderConfig::builder()
            .base_url("http://127.0.0.1:9")
            .build()
            .expect("Valid provider"),
        Prompts::new(SCORING_PROMPT, FEEDBACK_PROMPT),
        Default::default(),
        Default::default(),
    );
    let client = Arc::new(ResponsesClient::new(config.provider().clone()));
    let app = create_router(ApiState::new(client, Arc::new(config)));

    let (status, body) = send(
        app,
        Method::POST,
        EVALUATE_PATH,
        r#"{"transcript": "USER: hi"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({"ok": false, "error": "Missing OPENAI_API_KEY environment variable."})
    );
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(
        app(ScriptedDriver::new(Vec::new())),
        Method::GET,
        "/health",
        "",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}
