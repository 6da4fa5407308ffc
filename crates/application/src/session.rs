//! Per-request API session.
//!
//! An [`ApiSession`] binds one access token to a sequence of remote calls,
//! transparently refreshing it before each call through the shared
//! [`TokenAuthority`]. Token state is session-local: the held token is
//! replaced wholesale after a refresh and never shared between sessions, so
//! concurrent sessions for one principal are independent.

use std::fmt;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use aviary_domain::{
    AccessToken, ApiError, ApiRequest, ApiResult, AuthResult, Endpoint, FormPart, Payload,
};

use crate::authority::TokenAuthority;
use crate::ports::ApiTransport;

/// Default multipart field name for media uploads.
const MEDIA_FIELD: &str = "file";

/// One authenticated call chain against the remote API.
///
/// Construct one per user request from the principal's stored token. Every
/// endpoint method delegates to [`ApiSession::invoke`], which re-validates
/// the token, attaches it, executes the request, and decodes the response.
pub struct ApiSession {
    principal: String,
    current_token: AccessToken,
    authority: Arc<TokenAuthority>,
    transport: Arc<dyn ApiTransport>,
    api_base: Url,
}

impl ApiSession {
    /// Creates a session for a principal holding their current token.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidConfiguration` if the configured API host
    /// is not a usable base URL.
    pub fn new(
        principal: impl Into<String>,
        token: AccessToken,
        authority: Arc<TokenAuthority>,
        transport: Arc<dyn ApiTransport>,
    ) -> AuthResult<Self> {
        let api_base = authority.credentials().api_endpoint()?;
        Ok(Self {
            principal: principal.into(),
            current_token: token,
            authority,
            transport,
            api_base,
        })
    }

    /// The principal this session acts for.
    #[must_use]
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// The token currently held by this session. After a call that
    /// triggered a refresh, this is the replacement token (which has also
    /// been handed to the host's store already).
    #[must_use]
    pub const fn current_token(&self) -> &AccessToken {
        &self.current_token
    }

    /// Issues one API call with the current token attached.
    ///
    /// `body` and `form` are mutually exclusive; supplying both fails with
    /// `InvalidRequestShape` before any network activity. The held token is
    /// validated (and refreshed if expired) first; a 2xx response decodes
    /// to its JSON body, a non-2xx response becomes `RemoteApi` preserving
    /// status and decoded body.
    ///
    /// # Errors
    /// `InvalidRequestShape`, `Auth` (freshness check failed), `Transport`,
    /// or `RemoteApi`.
    pub async fn invoke(
        &mut self,
        endpoint: Endpoint,
        body: Option<serde_json::Value>,
        form: Option<Vec<FormPart>>,
    ) -> ApiResult<serde_json::Value> {
        let payload = match (body, form) {
            (Some(_), Some(_)) => {
                return Err(ApiError::InvalidRequestShape {
                    message: "a request may carry a JSON body or form data, not both".to_string(),
                });
            }
            (Some(body), None) => Payload::Json(body),
            (None, Some(parts)) => Payload::Form(parts),
            (None, None) => Payload::Empty,
        };

        let fresh = self
            .authority
            .ensure_fresh(&self.principal, self.current_token.clone())
            .await?;
        self.current_token = fresh;

        let url = endpoint.url(&self.api_base)?;
        debug!(method = %endpoint.method(), %url, "dispatching API request");

        let request = ApiRequest {
            method: endpoint.method(),
            url,
            authorization: self.current_token.authorization_header(),
            payload,
        };
        let response = self.transport.execute(request).await?;

        if response.is_success() {
            Ok(response.json())
        } else {
            Err(ApiError::RemoteApi {
                status: response.status,
                body: response.json(),
            })
        }
    }

    // USER DETAILS

    /// Details of the logged-in user.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn me(&mut self) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::me(), None, None).await
    }

    /// Details of a user by username.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn user_details(&mut self, username: &str) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::user_details(username), None, None)
            .await
    }

    /// Followers of a user.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn user_followers(
        &mut self,
        username: &str,
        before: Option<u64>,
    ) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::user_followers(username, before), None, None)
            .await
    }

    /// Users a user follows.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn user_following(
        &mut self,
        username: &str,
        before: Option<u64>,
    ) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::user_following(username, before), None, None)
            .await
    }

    // NOTIFICATIONS

    /// Notifications for the logged-in user.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn notifications(&mut self, before: Option<u64>) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::notifications(before), None, None)
            .await
    }

    // FEEDS

    /// A user's feed.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn user_feed(
        &mut self,
        username: &str,
        before: Option<u64>,
    ) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::user_feed(username, before), None, None)
            .await
    }

    /// The logged-in user's main feed.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn main_feed(&mut self, before: Option<u64>) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::main_feed(before), None, None).await
    }

    // POPULAR

    /// The network-wide popular feed.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn popular_feed(&mut self) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::popular_feed(), None, None).await
    }

    /// Popular users.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn popular_users(&mut self) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::popular_users(), None, None).await
    }

    // ENGAGING WITH OTHER USERS

    /// Follow a user by id.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn follow_user(&mut self, user_id: &str) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::follow_user(user_id), None, None).await
    }

    /// Unfollow a user by id.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn unfollow_user(&mut self, user_id: &str) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::unfollow_user(user_id), None, None)
            .await
    }

    // REACTING TO POSTS

    /// Upvote a post.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn upvote_post(&mut self, post_id: &str) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::upvote_post(post_id), None, None).await
    }

    /// Remove an upvote from a post.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn remove_upvote(&mut self, post_id: &str) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::remove_upvote(post_id), None, None)
            .await
    }

    /// Downvote a post.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn downvote_post(&mut self, post_id: &str) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::downvote_post(post_id), None, None)
            .await
    }

    /// Remove a downvote from a post.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn remove_downvote(&mut self, post_id: &str) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::remove_downvote(post_id), None, None)
            .await
    }

    /// Repost a post.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn repost(&mut self, post_id: &str) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::repost(post_id), None, None).await
    }

    /// Remove a repost.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn remove_repost(&mut self, post_id: &str) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::remove_repost(post_id), None, None)
            .await
    }

    /// Details of a post.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn post_details(&mut self, post_id: &str) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::post_details(post_id), None, None)
            .await
    }

    // GROUPS

    /// Popular groups.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn popular_groups(&mut self) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::popular_groups(), None, None).await
    }

    /// Details of a group.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn group_details(&mut self, group_id: &str) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::group_details(group_id), None, None)
            .await
    }

    /// Members of a group.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn group_members(
        &mut self,
        group_id: &str,
        before: Option<u64>,
    ) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::group_members(group_id, before), None, None)
            .await
    }

    /// Moderation log of a group.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn group_moderation_log(&mut self, group_id: &str) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::group_moderation_log(group_id), None, None)
            .await
    }

    // CREATING POSTS

    /// Create a post. The body shape is owned by the remote API and passed
    /// through verbatim.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn create_post(&mut self, post: serde_json::Value) -> ApiResult<serde_json::Value> {
        self.invoke(Endpoint::create_post(), Some(post), None).await
    }

    /// Upload a media attachment image as multipart form data.
    ///
    /// The content type is guessed from the filename when not supplied.
    ///
    /// # Errors
    /// See [`ApiSession::invoke`].
    pub async fn upload_media(
        &mut self,
        data: Vec<u8>,
        filename: &str,
        content_type: Option<&str>,
    ) -> ApiResult<serde_json::Value> {
        let mut part = FormPart::file(MEDIA_FIELD, filename, data);
        if let Some(content_type) = content_type {
            part = part.with_content_type(content_type);
        }
        self.invoke(Endpoint::upload_media(), None, Some(vec![part]))
            .await
    }
}

impl fmt::Debug for ApiSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSession")
            .field("principal", &self.principal)
            .field("current_token", &self.current_token)
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}
