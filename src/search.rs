//! Reddit search API integration
//!
//! Sends one GET per submission and maps the listing JSON into [`Post`]s.
//! Failures never escape as panics or bare errors: the caller always gets
//! a [`SearchOutcome`] and can tell "no results" apart from "request failed".

use reqwest::Client;
use serde::Deserialize;

use crate::error::FetchError;
use crate::query::SearchQuery;

/// A single search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub title: String,
    pub selftext: String,
    pub url: String,
    pub subreddit: String,
    pub score: i64,
    pub preview_image_url: Option<String>,
}

/// Result of one search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Request succeeded; may be empty
    Posts(Vec<Post>),
    /// Request failed; the detail is for display and logs
    Failed(String),
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: RawPost,
}

/// Listing child payload; Reddit sends `null` for some fields, so every
/// field tolerates both absence and null
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPost {
    title: Option<String>,
    selftext: Option<String>,
    url: Option<String>,
    subreddit: Option<String>,
    score: Option<i64>,
    preview: Option<Preview>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Preview {
    images: Option<Vec<PreviewImage>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PreviewImage {
    source: Option<ImageSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImageSource {
    url: Option<String>,
}

impl From<RawPost> for Post {
    fn from(raw: RawPost) -> Self {
        let preview_image_url = raw
            .preview
            .and_then(|p| p.images)
            .and_then(|images| images.into_iter().next())
            .and_then(|image| image.source)
            .and_then(|source| source.url);

        Post {
            title: raw.title.unwrap_or_default(),
            selftext: raw.selftext.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            subreddit: raw.subreddit.unwrap_or_default(),
            score: raw.score.unwrap_or_default(),
            preview_image_url,
        }
    }
}

/// Search Reddit for `query`
///
/// Errors are logged and folded into [`SearchOutcome::Failed`].
pub async fn reddit_search(client: &Client, endpoint: &str, query: &SearchQuery) -> SearchOutcome {
    match fetch_posts(client, endpoint, query).await {
        Ok(posts) => {
            tracing::info!(
                term = %query.term,
                sort = query.sort_by.as_param(),
                limit = query.limit,
                count = posts.len(),
                "search finished"
            );
            SearchOutcome::Posts(posts)
        }
        Err(err) => {
            tracing::warn!(term = %query.term, error = %err, "search failed");
            SearchOutcome::Failed(err.to_string())
        }
    }
}

async fn fetch_posts(
    client: &Client,
    endpoint: &str,
    query: &SearchQuery,
) -> Result<Vec<Post>, FetchError> {
    let url = query.url(endpoint);
    tracing::debug!(%url, "sending search request");

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    parse_listing(&body)
}

/// Parse a listing body into posts, keeping the API's order
fn parse_listing(body: &str) -> Result<Vec<Post>, FetchError> {
    let listing: Listing = serde_json::from_str(body)?;
    Ok(listing
        .data
        .children
        .into_iter()
        .map(|child| Post::from(child.data))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortBy;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn listing_json() -> serde_json::Value {
        json!({
            "kind": "Listing",
            "data": {
                "children": [
                    { "kind": "t3", "data": {
                        "title": "First",
                        "selftext": "body one",
                        "url": "https://example.com/1",
                        "subreddit": "rust",
                        "score": 42,
                        "preview": { "images": [ { "source": { "url": "https://i.redd.it/a.jpg" } } ] }
                    }},
                    { "kind": "t3", "data": {
                        "title": "Second",
                        "selftext": "",
                        "url": "https://example.com/2",
                        "subreddit": "programming",
                        "score": -3
                    }}
                ]
            }
        })
    }

    fn query(term: &str) -> SearchQuery {
        SearchQuery {
            term: term.to_string(),
            sort_by: SortBy::New,
            limit: 10,
        }
    }

    #[test]
    fn test_parse_listing_keeps_order_and_preview() {
        let posts = parse_listing(&listing_json().to_string()).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "First");
        assert_eq!(posts[0].preview_image_url.as_deref(), Some("https://i.redd.it/a.jpg"));
        assert_eq!(posts[1].title, "Second");
        assert_eq!(posts[1].score, -3);
        assert_eq!(posts[1].preview_image_url, None);
    }

    #[test]
    fn test_parse_listing_tolerates_missing_fields() {
        let body = json!({ "data": { "children": [ { "data": { "preview": { "images": [] } } } ] } });
        let posts = parse_listing(&body.to_string()).unwrap();
        assert_eq!(posts[0].title, "");
        assert_eq!(posts[0].score, 0);
        assert_eq!(posts[0].preview_image_url, None);
    }

    #[test]
    fn test_parse_listing_tolerates_null_fields() {
        let body = json!({ "data": { "children": [
            { "data": { "title": null, "selftext": null, "url": "https://example.com/1",
                        "subreddit": "rust", "score": null, "preview": null } },
            { "data": { "title": "Valid", "selftext": "text", "url": "https://example.com/2",
                        "subreddit": "rust", "score": 5 } }
        ] } });
        let posts = parse_listing(&body.to_string()).unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "");
        assert_eq!(posts[0].selftext, "");
        assert_eq!(posts[0].score, 0);
        assert_eq!(posts[0].preview_image_url, None);
        assert_eq!(posts[1].title, "Valid");
        assert_eq!(posts[1].score, 5);
    }

    #[test]
    fn test_parse_listing_preview_without_source() {
        let body = json!({ "data": { "children": [
            { "data": { "title": "No source", "preview": { "images": [
                { "resolutions": [ { "url": "https://i.redd.it/small.jpg", "width": 108 } ] }
            ] } } }
        ] } });
        let posts = parse_listing(&body.to_string()).unwrap();

        assert_eq!(posts[0].title, "No source");
        assert_eq!(posts[0].preview_image_url, None);
    }

    #[test]
    fn test_parse_listing_rejects_wrong_shape() {
        let err = parse_listing(r#"{"error": 404}"#).unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_search_sends_encoded_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("q", "rust & go"))
            .and(query_param("sort", "new"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing_json()))
            .expect(1)
            .mount(&server)
            .await;

        let endpoint = format!("{}/search.json", server.uri());
        let outcome = reddit_search(&Client::new(), &endpoint, &query("rust & go")).await;

        match outcome {
            SearchOutcome::Posts(posts) => {
                let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
                assert_eq!(titles, ["First", "Second"]);
            }
            SearchOutcome::Failed(detail) => panic!("unexpected failure: {detail}"),
        }
    }

    #[tokio::test]
    async fn test_empty_listing_is_not_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "children": [] } })),
            )
            .mount(&server)
            .await;

        let endpoint = format!("{}/search.json", server.uri());
        let outcome = reddit_search(&Client::new(), &endpoint, &query("nothing")).await;
        assert_eq!(outcome, SearchOutcome::Posts(Vec::new()));
    }

    #[tokio::test]
    async fn test_http_error_status_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let endpoint = format!("{}/search.json", server.uri());
        let outcome = reddit_search(&Client::new(), &endpoint, &query("rust")).await;
        assert_eq!(
            outcome,
            SearchOutcome::Failed("search endpoint returned status 429".to_string())
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
            .mount(&server)
            .await;

        let endpoint = format!("{}/search.json", server.uri());
        let outcome = reddit_search(&Client::new(), &endpoint, &query("rust")).await;
        assert!(matches!(outcome, SearchOutcome::Failed(ref d) if d.starts_with("parse error")));
    }

    #[tokio::test]
    async fn test_connection_refused_is_failure() {
        let outcome = reddit_search(
            &Client::new(),
            "http://127.0.0.1:1/search.json",
            &query("rust"),
        )
        .await;
        assert!(matches!(outcome, SearchOutcome::Failed(_)));
    }
}
