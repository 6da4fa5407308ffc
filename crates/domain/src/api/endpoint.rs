//! The remote endpoint catalogue.
//!
//! Every remote capability is one constructor producing an [`Endpoint`]
//! value: a verb plus path segments plus an optional pagination cursor.
//! Sessions turn these into absolute URLs against the configured API host.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::ApiError;

/// HTTP verbs used by the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP DELETE method
    Delete,
}

impl HttpMethod {
    /// Returns the method as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the endpoint catalogue: verb, path, optional cursor query.
///
/// Path identifiers supplied by callers are stored as raw segments and
/// percent-encoded during URL assembly. The `before` cursor is appended only
/// when explicitly supplied; an explicit `Some(0)` emits `before=0`, while
/// `None` omits the parameter entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    method: HttpMethod,
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Endpoint {
    fn new(method: HttpMethod, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(ToString::to_string).collect(),
            query: Vec::new(),
        }
    }

    fn with_cursor(mut self, before: Option<u64>) -> Self {
        if let Some(before) = before {
            self.query.push(("before".to_string(), before.to_string()));
        }
        self
    }

    /// The HTTP verb of this endpoint.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Raw (unencoded) path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Assembles the absolute request URL on the given API base.
    ///
    /// Segments are percent-encoded; a trailing slash on the base does not
    /// produce an empty segment.
    ///
    /// # Errors
    /// Returns `ApiError::InvalidRequestShape` if the base URL cannot carry
    /// a path (e.g. a `mailto:` URL), which credential validation rules out
    /// for configured hosts.
    pub fn url(&self, base: &Url) -> Result<Url, ApiError> {
        let mut url = base.clone();
        {
            let mut segments =
                url.path_segments_mut()
                    .map_err(|()| ApiError::InvalidRequestShape {
                        message: format!("API host {base} cannot carry a path"),
                    })?;
            segments.pop_if_empty();
            segments.extend(self.segments.iter().map(String::as_str));
        }
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    // USER DETAILS

    /// Details of the logged-in user.
    #[must_use]
    pub fn me() -> Self {
        Self::new(HttpMethod::Get, &["me"])
    }

    /// Details of a user by username.
    #[must_use]
    pub fn user_details(username: &str) -> Self {
        Self::new(HttpMethod::Get, &["users", username])
    }

    /// Followers of a user, newest first.
    #[must_use]
    pub fn user_followers(username: &str, before: Option<u64>) -> Self {
        Self::new(HttpMethod::Get, &["users", username, "followers"]).with_cursor(before)
    }

    /// Users a user follows.
    #[must_use]
    pub fn user_following(username: &str, before: Option<u64>) -> Self {
        Self::new(HttpMethod::Get, &["users", username, "following"]).with_cursor(before)
    }

    // NOTIFICATIONS

    /// Notifications for the logged-in user.
    #[must_use]
    pub fn notifications(before: Option<u64>) -> Self {
        Self::new(HttpMethod::Get, &["notifications"]).with_cursor(before)
    }

    // FEEDS

    /// A user's feed.
    #[must_use]
    pub fn user_feed(username: &str, before: Option<u64>) -> Self {
        Self::new(HttpMethod::Get, &["users", username, "feed"]).with_cursor(before)
    }

    /// The logged-in user's main feed.
    #[must_use]
    pub fn main_feed(before: Option<u64>) -> Self {
        Self::new(HttpMethod::Get, &["feed"]).with_cursor(before)
    }

    // POPULAR

    /// The network-wide popular feed.
    #[must_use]
    pub fn popular_feed() -> Self {
        Self::new(HttpMethod::Get, &["popular", "feed"])
    }

    /// Popular users.
    #[must_use]
    pub fn popular_users() -> Self {
        Self::new(HttpMethod::Get, &["popular", "users"])
    }

    // ENGAGING WITH OTHER USERS

    /// Follow a user by id.
    #[must_use]
    pub fn follow_user(user_id: &str) -> Self {
        Self::new(HttpMethod::Post, &["users", user_id, "follow"])
    }

    /// Unfollow a user by id.
    #[must_use]
    pub fn unfollow_user(user_id: &str) -> Self {
        Self::new(HttpMethod::Delete, &["users", user_id, "follow"])
    }

    // REACTING TO POSTS

    /// Upvote a post.
    #[must_use]
    pub fn upvote_post(post_id: &str) -> Self {
        Self::new(HttpMethod::Post, &["posts", post_id, "upvote"])
    }

    /// Remove an upvote from a post.
    #[must_use]
    pub fn remove_upvote(post_id: &str) -> Self {
        Self::new(HttpMethod::Delete, &["posts", post_id, "upvote"])
    }

    /// Downvote a post.
    #[must_use]
    pub fn downvote_post(post_id: &str) -> Self {
        Self::new(HttpMethod::Post, &["posts", post_id, "downvote"])
    }

    /// Remove a downvote from a post.
    #[must_use]
    pub fn remove_downvote(post_id: &str) -> Self {
        Self::new(HttpMethod::Delete, &["posts", post_id, "downvote"])
    }

    /// Repost a post.
    #[must_use]
    pub fn repost(post_id: &str) -> Self {
        Self::new(HttpMethod::Post, &["posts", post_id, "repost"])
    }

    /// Remove a repost.
    #[must_use]
    pub fn remove_repost(post_id: &str) -> Self {
        Self::new(HttpMethod::Delete, &["posts", post_id, "repost"])
    }

    /// Details of a post.
    #[must_use]
    pub fn post_details(post_id: &str) -> Self {
        Self::new(HttpMethod::Get, &["posts", post_id])
    }

    // GROUPS

    /// Popular groups.
    #[must_use]
    pub fn popular_groups() -> Self {
        Self::new(HttpMethod::Get, &["groups"])
    }

    /// Details of a group.
    #[must_use]
    pub fn group_details(group_id: &str) -> Self {
        Self::new(HttpMethod::Get, &["groups", group_id])
    }

    /// Members of a group.
    #[must_use]
    pub fn group_members(group_id: &str, before: Option<u64>) -> Self {
        Self::new(HttpMethod::Get, &["groups", group_id, "users"]).with_cursor(before)
    }

    /// Moderation log of a group.
    #[must_use]
    pub fn group_moderation_log(group_id: &str) -> Self {
        Self::new(HttpMethod::Get, &["groups", group_id, "moderation-logs"])
    }

    // CREATING POSTS

    /// Create a post.
    #[must_use]
    pub fn create_post() -> Self {
        Self::new(HttpMethod::Post, &["posts"])
    }

    /// Upload a media attachment image.
    #[must_use]
    pub fn upload_media() -> Self {
        Self::new(HttpMethod::Post, &["media-attachments", "images"])
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}", self.method, self.segments.join("/"))?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}
