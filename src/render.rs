//! Card rendering
//!
//! Turns posts into cards. The terminal draws [`Card`]s directly; the
//! same cards serialize to Bootstrap-style HTML for export.

use anyhow::{Context, Result};
use std::path::Path;

use crate::search::Post;

/// Image shown on cards whose post has no preview
pub const PLACEHOLDER_IMAGE: &str =
    "https://cdn.comparitech.com/wp-content/uploads/2017/08/reddit-1.jpg";

/// Characters of body text kept before cutting at the next space
pub const BODY_TRUNCATE_AT: usize = 100;

/// Cut `text` at the first space at or after character `limit`
///
/// Returns `text` unchanged when there is no such space.
pub fn truncate(text: &str, limit: usize) -> &str {
    text.char_indices()
        .skip(limit)
        .find(|&(_, c)| c == ' ')
        .map_or(text, |(idx, _)| &text[..idx])
}

/// The visual unit for one post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub image_url: String,
    pub title: String,
    pub body: String,
    pub url: String,
    pub subreddit: String,
    pub score: i64,
}

impl Card {
    pub fn from_post(post: &Post) -> Self {
        Card {
            image_url: post
                .preview_image_url
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            title: post.title.clone(),
            body: truncate(&post.selftext, BODY_TRUNCATE_AT).to_string(),
            url: post.url.clone(),
            subreddit: post.subreddit.clone(),
            score: post.score,
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            r#"
<div class="card">
  <img class="card-img-top" src="{image}" alt="Card image cap">
  <div class="card-body">
    <h5 class="card-title">{title}</h5>
    <p class="card-text">{body}</p>
    <a href="{url}" target="_blank" class="btn btn-primary">Read More..</a>
    <hr>
    <span class="badge badge-secondary">Subreddit: {subreddit}</span>
    <span class="badge badge-secondary">Score: {score}</span>
  </div>
</div>
"#,
            image = self.image_url,
            title = self.title,
            body = self.body,
            url = self.url,
            subreddit = self.subreddit,
            score = self.score,
        )
    }
}

/// Contents of the results area, always replaced as a whole
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsView {
    pub cards: Vec<Card>,
    pub html: String,
}

/// Build the results view for `posts`, one card per post in order
pub fn render(posts: &[Post]) -> ResultsView {
    let cards: Vec<Card> = posts.iter().map(Card::from_post).collect();

    let mut html = String::from(r#"<div class="card-columns">"#);
    for card in &cards {
        html.push_str(&card.to_html());
    }
    html.push_str("</div>");

    ResultsView { cards, html }
}

/// Write the current results markup to `path`
pub async fn export_html(path: &Path, view: &ResultsView) -> Result<()> {
    tokio::fs::write(path, &view.html)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), cards = view.cards.len(), "exported results");
    Ok(())
}
