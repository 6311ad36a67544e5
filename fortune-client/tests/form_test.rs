use async_trait::async_trait;
use fortune_client::{
    ClientError, FormState, FortuneApi, FortuneRequest, HttpFortuneApi, RequestForm,
    EMPTY_STATE_MESSAGE,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Answers from a queue and counts calls.
struct ScriptedApi {
    calls: AtomicUsize,
    replies: Mutex<Vec<Result<String, ClientError>>>,
}

impl ScriptedApi {
    fn new(replies: Vec<Result<String, ClientError>>) -> Self {
        let mut replies = replies;
        replies.reverse();
        Self {
            calls: AtomicUsize::new(0),
            replies: Mutex::new(replies),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FortuneApi for ScriptedApi {
    async fn request_fortune(&self, _input: &FortuneRequest) -> Result<String, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(ClientError::Transport("no scripted reply".to_string())))
    }
}

/// Never answers.
struct PendingApi;

#[async_trait]
impl FortuneApi for PendingApi {
    async fn request_fortune(&self, _input: &FortuneRequest) -> Result<String, ClientError> {
        std::future::pending().await
    }
}

fn request(fortune_type: &str) -> FortuneRequest {
    FortuneRequest {
        birth_date: "1990-05-15".to_string(),
        gender: "female".to_string(),
        fortune_type: fortune_type.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn empty_birth_date_sends_nothing() {
    let mut form = RequestForm::new(ScriptedApi::new(vec![Ok("unused".to_string())]));

    let mut input = request("연애운");
    input.birth_date = String::new();
    let err = form.submit(input).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(err.to_string(), "생년월일을 입력해주세요.");
    assert_eq!(form.api().calls(), 0);
    assert_eq!(form.session().render_active(), EMPTY_STATE_MESSAGE);
}

#[tokio::test]
async fn consecutive_submissions_get_increasing_ids() {
    let mut form = RequestForm::new(ScriptedApi::new(vec![
        Ok("# 첫 번째".to_string()),
        Ok("# 두 번째".to_string()),
    ]));

    assert_eq!(form.submit(request("연애운")).await.unwrap(), 0);
    assert_eq!(form.session().active_index(), Some(0));

    assert_eq!(form.submit(request("재물운")).await.unwrap(), 1);

    let session = form.session();
    let ids: Vec<u64> = session.results().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(session.active_index(), Some(1));
    assert_eq!(session.active().unwrap().fortune_type, "재물운");
    assert_eq!(session.render_active(), "# 두 번째");
    assert_eq!(form.state(), FormState::Idle);
}

#[tokio::test]
async fn failed_submission_leaves_session_unchanged() {
    let mut form = RequestForm::new(ScriptedApi::new(vec![
        Ok("# 첫 번째".to_string()),
        Err(ClientError::Server {
            status: 500,
            error: "Failed to generate fortune".to_string(),
            details: Some("upstream unavailable".to_string()),
        }),
    ]));

    form.submit(request("연애운")).await.unwrap();
    let err = form.submit(request("재물운")).await.unwrap_err();

    assert!(matches!(err, ClientError::Server { status: 500, .. }));
    assert_eq!(form.session().len(), 1);
    assert_eq!(form.session().active_index(), Some(0));
    assert_eq!(form.state(), FormState::Idle);
    assert!(!form.is_generating());
}

#[tokio::test]
async fn status_reports_generating_while_request_is_pending() {
    let mut form = RequestForm::new(PendingApi);
    let mut status = form.status();
    assert_eq!(*status.borrow(), FormState::Idle);

    let observed = {
        let submit = form.submit(request("연애운"));
        tokio::pin!(submit);

        tokio::select! {
            _ = &mut submit => None,
            changed = status.changed() => {
                changed.unwrap();
                Some(*status.borrow_and_update())
            }
        }
    };

    assert_eq!(observed, Some(FormState::Generating));
    assert_eq!(*status.borrow(), FormState::Idle);
    assert!(!form.is_generating());
    assert!(form.session().is_empty());
}

#[tokio::test]
async fn cancelled_submission_returns_to_idle() {
    let mut form = RequestForm::new(PendingApi);
    let status = form.status();

    let outcome = tokio::time::timeout(Duration::from_millis(20), form.submit(request("연애운")))
        .await;

    assert!(outcome.is_err());
    assert_eq!(*status.borrow(), FormState::Idle);
    assert_eq!(form.state(), FormState::Idle);
    assert!(form.session().is_empty());
}

#[tokio::test]
async fn selecting_a_tab_changes_the_rendered_result() {
    let mut form = RequestForm::new(ScriptedApi::new(vec![
        Ok("first".to_string()),
        Ok("second".to_string()),
    ]));
    form.submit(request("연애운")).await.unwrap();
    form.submit(request("재물운")).await.unwrap();

    form.select(0).unwrap();

    assert_eq!(form.session().render_active(), "first");
    assert!(form.session().tabs()[0].active);
}

#[tokio::test]
async fn http_api_posts_the_request_and_returns_the_fortune() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/fortune"))
        .and(body_partial_json(serde_json::json!({
            "birthDate": "1990-05-15",
            "gender": "female",
            "fortuneType": "연애운"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "fortune": "## 좋은 날" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut form = RequestForm::new(HttpFortuneApi::new(format!("{}/", server.uri())));
    form.submit(request("연애운")).await.unwrap();

    assert_eq!(form.session().render_active(), "## 좋은 날");
}

#[tokio::test]
async fn http_api_maps_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/fortune"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "Failed to generate fortune",
            "details": "quota exceeded"
        })))
        .mount(&server)
        .await;

    let api = HttpFortuneApi::new(server.uri());
    let err = api.request_fortune(&request("연애운")).await.unwrap_err();

    match err {
        ClientError::Server {
            status,
            error,
            details,
        } => {
            assert_eq!(status, 500);
            assert_eq!(error, "Failed to generate fortune");
            assert_eq!(details.as_deref(), Some("quota exceeded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn http_api_keeps_non_json_error_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/fortune"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let api = HttpFortuneApi::new(server.uri());
    let err = api.request_fortune(&request("연애운")).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Server { status: 502, ref error, details: None } if error == "Bad Gateway"
    ));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let api = HttpFortuneApi::new("http://127.0.0.1:1");
    let err = api.request_fortune(&request("연애운")).await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
}
