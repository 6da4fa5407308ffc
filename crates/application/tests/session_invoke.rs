//! Integration tests for `ApiSession::invoke` and the endpoint surface.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use aviary_application::ports::{ApiTransport, AuthorizationGateway, Clock, TokenStore};
use aviary_application::{ApiSession, TokenAuthority};
use aviary_domain::{
    AccessToken, ApiError, ApiRequest, ApiResponse, ApiResult, AuthResult, ClientCredentials,
    HttpMethod, Payload, TokenStoreError,
};

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn credentials() -> ClientCredentials {
    ClientCredentials::new(
        "client-1",
        "shh",
        "https://social.example",
        "https://host.example/callback",
        "read write",
        "https://api.social.example/v1.0",
    )
}

fn fresh_token() -> AccessToken {
    AccessToken::from_wire(
        "fresh".to_string(),
        "Bearer".to_string(),
        Some(3_600),
        Some("refresh-1".to_string()),
        now(),
    )
}

fn expired_token() -> AccessToken {
    AccessToken::from_wire(
        "stale".to_string(),
        "Bearer".to_string(),
        Some(60),
        Some("refresh-1".to_string()),
        now() - chrono::Duration::seconds(3_600),
    )
}

struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        now()
    }
}

#[derive(Default)]
struct CountingGateway {
    refresh_calls: AtomicUsize,
}

#[async_trait]
impl AuthorizationGateway for CountingGateway {
    async fn exchange_code(
        &self,
        _credentials: &ClientCredentials,
        _code: &str,
        _state: Option<&str>,
    ) -> AuthResult<AccessToken> {
        panic!("no exchange expected in session tests");
    }

    async fn refresh(
        &self,
        _credentials: &ClientCredentials,
        _refresh_token: &str,
    ) -> AuthResult<AccessToken> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        Ok(AccessToken::from_wire(
            "refreshed".to_string(),
            "Bearer".to_string(),
            Some(7_200),
            Some("refresh-2".to_string()),
            now(),
        ))
    }
}

struct NullStore;

#[async_trait]
impl TokenStore for NullStore {
    async fn persist(&self, _principal: &str, _token: &AccessToken) -> Result<(), TokenStoreError> {
        Ok(())
    }

    async fn load(&self, _principal: &str) -> Result<Option<AccessToken>, TokenStoreError> {
        Ok(None)
    }
}

struct SpyTransport {
    calls: AtomicUsize,
    requests: Mutex<Vec<ApiRequest>>,
    status: u16,
    body: Vec<u8>,
}

impl SpyTransport {
    fn responding(status: u16, body: &[u8]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            status,
            body: body.to_vec(),
        }
    }

    fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("a request was issued")
    }
}

#[async_trait]
impl ApiTransport for SpyTransport {
    async fn execute(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        Ok(ApiResponse::new(self.status, self.body.clone()))
    }
}

fn session(token: AccessToken, transport: &Arc<SpyTransport>) -> ApiSession {
    session_with(token, transport, &Arc::new(CountingGateway::default()))
}

fn session_with(
    token: AccessToken,
    transport: &Arc<SpyTransport>,
    gateway: &Arc<CountingGateway>,
) -> ApiSession {
    let authority = TokenAuthority::new(
        credentials(),
        Arc::clone(gateway) as Arc<dyn AuthorizationGateway>,
        Arc::new(NullStore),
        Arc::new(FixedClock),
    )
    .expect("valid credentials");
    ApiSession::new(
        "alice",
        token,
        Arc::new(authority),
        Arc::clone(transport) as Arc<dyn ApiTransport>,
    )
    .expect("valid api host")
}

#[tokio::test]
async fn body_and_form_together_fail_before_any_network_call() {
    let transport = Arc::new(SpyTransport::responding(200, b"{}"));
    let gateway = Arc::new(CountingGateway::default());
    let mut session = session_with(fresh_token(), &transport, &gateway);

    let err = session
        .invoke(
            aviary_domain::Endpoint::create_post(),
            Some(serde_json::json!({"body": "hi"})),
            Some(vec![aviary_domain::FormPart::text("caption", "hi")]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidRequestShape { .. }));
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    assert_eq!(gateway.refresh_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn followers_url_carries_explicit_cursor_only() {
    let transport = Arc::new(SpyTransport::responding(200, b"[]"));
    let mut session = session(fresh_token(), &transport);

    session.user_followers("alice", Some(5)).await.unwrap();
    assert_eq!(
        transport.last_request().url.as_str(),
        "https://api.social.example/v1.0/users/alice/followers?before=5"
    );

    session.user_followers("alice", None).await.unwrap();
    assert_eq!(
        transport.last_request().url.as_str(),
        "https://api.social.example/v1.0/users/alice/followers"
    );

    session.user_followers("alice", Some(0)).await.unwrap();
    assert_eq!(
        transport.last_request().url.as_str(),
        "https://api.social.example/v1.0/users/alice/followers?before=0"
    );
}

#[tokio::test]
async fn not_found_surfaces_status_and_decoded_body() {
    let transport = Arc::new(SpyTransport::responding(
        404,
        br#"{"error": "no such user"}"#,
    ));
    let mut session = session(fresh_token(), &transport);

    let err = session.user_details("ghost").await.unwrap_err();

    match err {
        ApiError::RemoteApi { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, serde_json::json!({"error": "no such user"}));
        }
        other => panic!("expected RemoteApi, got {other:?}"),
    }
}

#[tokio::test]
async fn successful_call_attaches_authorization_and_decodes_json() {
    let transport = Arc::new(SpyTransport::responding(200, br#"{"username": "alice"}"#));
    let mut session = session(fresh_token(), &transport);

    let body = session.me().await.unwrap();

    assert_eq!(body, serde_json::json!({"username": "alice"}));
    let request = transport.last_request();
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.authorization, "Bearer fresh");
    assert!(request.payload.is_empty());
}

#[tokio::test]
async fn expired_session_token_is_replaced_before_the_call() {
    let transport = Arc::new(SpyTransport::responding(200, b"{}"));
    let gateway = Arc::new(CountingGateway::default());
    let mut session = session_with(expired_token(), &transport, &gateway);

    session.main_feed(None).await.unwrap();

    assert_eq!(gateway.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(session.current_token().access_token, "refreshed");
    assert_eq!(transport.last_request().authorization, "Bearer refreshed");

    // The replacement sticks: the next call reuses it without refreshing.
    session.main_feed(None).await.unwrap();
    assert_eq!(gateway.refresh_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn create_post_sends_json_payload() {
    let transport = Arc::new(SpyTransport::responding(200, b"{}"));
    let mut session = session(fresh_token(), &transport);

    let post = serde_json::json!({"body": "hello world"});
    session.create_post(post.clone()).await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(
        request.url.as_str(),
        "https://api.social.example/v1.0/posts"
    );
    assert_eq!(request.payload, Payload::Json(post));
}

#[tokio::test]
async fn upload_media_sends_a_single_file_part() {
    let transport = Arc::new(SpyTransport::responding(200, b"{}"));
    let mut session = session(fresh_token(), &transport);

    session
        .upload_media(vec![0xFF, 0xD8], "meme.jpg", Some("image/jpeg"))
        .await
        .unwrap();

    let request = transport.last_request();
    assert_eq!(
        request.url.as_str(),
        "https://api.social.example/v1.0/media-attachments/images"
    );
    let Payload::Form(parts) = request.payload else {
        panic!("expected a multipart payload");
    };
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name, "file");
    assert_eq!(parts[0].filename.as_deref(), Some("meme.jpg"));
    assert_eq!(parts[0].content_type.as_deref(), Some("image/jpeg"));
}

#[tokio::test]
async fn toggle_pairs_use_post_and_delete() {
    let transport = Arc::new(SpyTransport::responding(200, b"{}"));
    let mut session = session(fresh_token(), &transport);

    session.upvote_post("p1").await.unwrap();
    assert_eq!(transport.last_request().method, HttpMethod::Post);

    session.remove_upvote("p1").await.unwrap();
    let request = transport.last_request();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(
        request.url.as_str(),
        "https://api.social.example/v1.0/posts/p1/upvote"
    );
}
