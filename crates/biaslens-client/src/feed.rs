//! One-shot article fetch for display layers.

use biaslens_core::Article;

use crate::ArticlesClient;

/// Fetch the article list once, for a view that is being initialised.
///
/// Any failure is logged and replaced by an empty list, which display layers
/// render as "no articles found". There is no retry.
pub async fn load_articles(client: &ArticlesClient) -> Vec<Article> {
    match client.list_articles().await {
        Ok(articles) => {
            tracing::debug!(count = articles.len(), "fetched articles");
            articles
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                base_url = %client.base_url(),
                "error fetching articles; showing an empty list"
            );
            Vec::new()
        }
    }
}
