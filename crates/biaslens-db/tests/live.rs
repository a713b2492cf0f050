//! Live integration tests for biaslens-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. `"../../migrations"` resolves to the workspace
//! migration directory.

use biaslens_core::Article;
use biaslens_db::{
    count_articles, get_article_by_id, list_articles, list_sitemap_articles, upsert_article,
    UpsertOutcome,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_article(id: &str, source: Option<&str>, bias: Option<&str>) -> Article {
    Article {
        id: id.to_string(),
        title: Some(format!("Title {id}")),
        description: Some(format!("Description {id}")),
        source: source.map(ToOwned::to_owned),
        sentiment: Some("Neutral".to_string()),
        sentiment_score: Some(0.1),
        political_bias: bias.map(ToOwned::to_owned),
        url: Some(format!("https://news.example.com/{id}")),
        published: None,
    }
}

// ---------------------------------------------------------------------------
// articles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn list_articles_preserves_insertion_order(pool: sqlx::PgPool) {
    for id in ["c", "a", "b"] {
        upsert_article(&pool, &make_article(id, Some("Wire"), Some("Center")))
            .await
            .expect("upsert");
    }

    let ids: Vec<String> = list_articles(&pool)
        .await
        .expect("list")
        .into_iter()
        .map(|row| row.id)
        .collect();
    assert_eq!(ids, ["c", "a", "b"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_articles_on_empty_table_is_empty(pool: sqlx::PgPool) {
    let rows = list_articles(&pool).await.expect("list");
    assert!(rows.is_empty());
    assert_eq!(count_articles(&pool).await.expect("count"), 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn upsert_updates_existing_article_in_place(pool: sqlx::PgPool) {
    let first = make_article("first", Some("Wire"), Some("Left"));
    let second = make_article("second", Some("Wire"), Some("Right"));

    assert_eq!(
        upsert_article(&pool, &first).await.expect("insert first"),
        UpsertOutcome::Inserted
    );
    upsert_article(&pool, &second).await.expect("insert second");

    let mut revised = first.clone();
    revised.title = Some("Revised headline".to_string());
    revised.political_bias = Some("Center".to_string());
    assert_eq!(
        upsert_article(&pool, &revised).await.expect("update first"),
        UpsertOutcome::Updated
    );

    let rows = list_articles(&pool).await.expect("list");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "first");
    assert_eq!(rows[0].title.as_deref(), Some("Revised headline"));
    assert_eq!(rows[0].political_bias.as_deref(), Some("Center"));
    assert!(rows[0].updated_at >= rows[0].created_at);
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_article_by_id_returns_row_or_none(pool: sqlx::PgPool) {
    upsert_article(&pool, &make_article("known", None, None))
        .await
        .expect("upsert");

    let found = get_article_by_id(&pool, "known").await.expect("query");
    let article = Article::from(found.expect("row exists"));
    assert_eq!(article.display_source(), "Unknown Source");
    assert!(article.political_bias.is_none());

    let missing = get_article_by_id(&pool, "unknown").await.expect("query");
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn sitemap_articles_carry_update_times(pool: sqlx::PgPool) {
    for id in ["one", "two"] {
        upsert_article(&pool, &make_article(id, Some("Wire"), None))
            .await
            .expect("upsert");
    }

    let entries = list_sitemap_articles(&pool).await.expect("sitemap rows");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "one");
    assert!(entries.iter().all(|e| e.last_modified.is_some()));
}
