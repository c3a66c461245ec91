use std::future::Future;

use futures_util::{stream::FuturesOrdered, StreamExt};
use reqwest::{header::AUTHORIZATION, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use types::{
    category::Category,
    post::{DeletePostReq, NewPost, Post, PostDetailsReq, ToggleReactionReq},
};
use url::Url;

use crate::{
    config::ClientConfig,
    projection::AudienceKind,
    consts::endpoints::{
        ALL_POSTS, CATEGORIES, DELETE_POST, DISLIKE_POST, LIKE_POST, NEW_POST, POST_DETAILS,
    },
    Error, Result,
};

use super::ForumBackend;

/// Talks to the forum's REST API
#[derive(Clone, Debug)]
pub struct ForumClient {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
    details: bool,
}

impl ForumClient {
    pub fn new(mut base_url: Url) -> Self {
        // without a trailing slash `join` would replace the last segment
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
            token: None,
            details: false,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Enrich every fetched post with its detail record
    pub fn with_details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }

    /// Community feeds show full post details, subscription feeds the bare listing
    pub fn for_audience(self, kind: AudienceKind) -> Self {
        self.with_details(kind == AudienceKind::Community)
    }

    pub fn fetches_details(&self) -> bool {
        self.details
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let client = Self::new(config.base_url.clone());
        match &config.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let mut req = self.client.request(method, self.endpoint(path)?);
        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, format!("Token {token}"));
        }
        Ok(req)
    }

    async fn send(&self, req: RequestBuilder) -> Result<String> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::from_status(status.as_u16()));
        }
        Ok(resp.text().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.send(self.request(Method::GET, path)?).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String> {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    async fn post_details(&self, post_id: u64) -> Result<Value> {
        let body = self
            .post_json(POST_DETAILS, &PostDetailsReq { post_id })
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Post listing enriched with each post's detail record
    pub async fn fetch_posts_with_details(&self) -> Result<Vec<Post>> {
        let listing: Vec<Value> = self.get_json(ALL_POSTS).await?;
        let merged = enrich_listing(listing, |post_id| self.post_details(post_id)).await;

        merged
            .into_iter()
            .map(|post| serde_json::from_value(post).map_err(Error::from))
            .collect()
    }
}

/// Merges each listing entry with the details `fetch` returns for its id.
/// Details are fetched concurrently and the listing order is kept;
/// an entry whose details fail keeps its listing fields.
pub async fn enrich_listing<F, Fut>(listing: Vec<Value>, fetch: F) -> Vec<Value>
where
    F: Fn(u64) -> Fut,
    Fut: Future<Output = Result<Value>>,
{
    listing
        .into_iter()
        .map(|post| {
            let details = post
                .get("id")
                .and_then(Value::as_u64)
                .map(|post_id| (post_id, fetch(post_id)));
            async move {
                let Some((post_id, details)) = details else {
                    return post;
                };
                match details.await {
                    Ok(details) => merge_details(post, details),
                    Err(e) => {
                        log::warn!("failed to fetch details for post {post_id}: {e}, skipping");
                        post
                    }
                }
            }
        })
        .collect::<FuturesOrdered<_>>()
        .collect::<Vec<_>>()
        .await
}

/// Overlays detail fields on top of the listing fields
pub fn merge_details(mut post: Value, details: Value) -> Value {
    if let (Value::Object(fields), Value::Object(extra)) = (&mut post, details) {
        fields.extend(extra);
    }
    post
}

impl ForumBackend for ForumClient {
    async fn fetch_all_posts(&self) -> Result<Vec<Post>> {
        let posts: Vec<Post> = if self.details {
            self.fetch_posts_with_details().await?
        } else {
            self.get_json(ALL_POSTS).await?
        };
        log::debug!("fetched {} posts", posts.len());
        Ok(posts)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>> {
        self.get_json(CATEGORIES).await
    }

    async fn toggle_like(&self, post_id: u64, user_id: u64, remove: bool) -> Result<()> {
        let req = ToggleReactionReq {
            post_id,
            user_id,
            remove,
        };
        self.post_json(LIKE_POST, &req).await?;
        Ok(())
    }

    async fn toggle_dislike(&self, post_id: u64, user_id: u64, remove: bool) -> Result<()> {
        let req = ToggleReactionReq {
            post_id,
            user_id,
            remove,
        };
        self.post_json(DISLIKE_POST, &req).await?;
        Ok(())
    }

    async fn delete_post(&self, post_id: u64, user_id: u64) -> Result<()> {
        self.post_json(DELETE_POST, &DeletePostReq { post_id, user_id })
            .await?;
        Ok(())
    }

    async fn create_post(&self, post: NewPost) -> Result<()> {
        let res = self.post_json(NEW_POST, &post).await?;
        log::debug!("new post response: {res}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn joins_endpoints_under_base_path() {
        let client = ForumClient::new("http://localhost:8000/api".parse().unwrap());
        assert_eq!(
            client.endpoint(ALL_POSTS).unwrap().as_str(),
            "http://localhost:8000/api/all-posts/"
        );
    }

    #[test]
    fn attaches_token_when_configured() {
        let config = ClientConfig {
            base_url: "http://localhost:8000/".parse().unwrap(),
            token: Some("s3cret".into()),
        };
        let req = ForumClient::from_config(&config)
            .request(Method::GET, ALL_POSTS)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(req.headers()[AUTHORIZATION], "Token s3cret");

        let anon = ForumClient::new(config.base_url.clone())
            .request(Method::GET, ALL_POSTS)
            .unwrap()
            .build()
            .unwrap();
        assert!(anon.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn details_override_listing() {
        let merged = merge_details(
            json!({"id": 4, "title": "q", "likes": []}),
            json!({"likes": [{"profile": "bob"}], "comments": []}),
        );
        let post: Post = serde_json::from_value(merged).unwrap();
        assert_eq!(post.title, "q");
        assert_eq!(post.likes.len(), 1);
    }

    #[test]
    fn non_object_details_are_ignored() {
        let listing = json!({"id": 4});
        assert_eq!(merge_details(listing.clone(), json!("oops")), listing);
    }

    #[test]
    fn community_client_fetches_details() {
        let client = ForumClient::new("http://localhost:8000/".parse().unwrap());
        assert!(!client.fetches_details());
        assert!(!client.clone().for_audience(AudienceKind::Subscribed).fetches_details());
        assert!(client.for_audience(AudienceKind::Community).fetches_details());
    }

    #[tokio::test]
    async fn failed_details_keep_listing_entry() {
        let listing = vec![
            json!({"id": 1, "title": "a"}),
            json!({"id": 2, "title": "b"}),
            json!({"title": "no id"}),
            json!({"id": 3, "title": "c"}),
        ];
        let requested = std::sync::Mutex::new(vec![]);

        let merged = enrich_listing(listing, |post_id| {
            requested.lock().unwrap().push(post_id);
            async move {
                if post_id == 2 {
                    return Err(Error::Status(500));
                }
                Ok(json!({"likes": [{"profile": post_id}]}))
            }
        })
        .await;

        assert_eq!(*requested.lock().unwrap(), vec![1, 2, 3]);
        let posts: Vec<Post> = merged
            .into_iter()
            .filter(|p| p.get("id").is_some())
            .map(|p| serde_json::from_value(p).unwrap())
            .collect();
        let summary: Vec<_> = posts
            .iter()
            .map(|p| (p.id, p.title.as_str(), p.likes.len()))
            .collect();
        assert_eq!(summary, vec![(1, "a", 1), (2, "b", 0), (3, "c", 1)]);
    }

    #[test]
    fn status_codes_map_to_typed_errors() {
        assert!(matches!(Error::from_status(401), Error::Unauthorized));
        assert!(matches!(Error::from_status(403), Error::Forbidden));
        assert!(matches!(Error::from_status(404), Error::NotFound));
        assert!(matches!(Error::from_status(502), Error::Status(502)));
    }
}
