//! Import of analysed articles from the upstream pipeline's JSON output.

use std::path::Path;

use anyhow::Context;
use biaslens_core::{Article, UpstreamRecord};
use biaslens_db::UpsertOutcome;

/// Articles ready for upsert, plus the number of records that were dropped.
#[derive(Debug, Default)]
pub(crate) struct ImportBatch {
    pub articles: Vec<Article>,
    pub skipped: usize,
}

/// Parse a JSON array of article records into an [`ImportBatch`].
///
/// Alternate collector field names are normalised and wrong-typed fields read
/// as absent. Only elements that are not objects, or that have no URL to
/// derive an id from, are logged and skipped. A `source` label, when given,
/// replaces each record's own source. A document that is not a JSON array is
/// an error.
pub(crate) fn prepare_batch(raw: &str, source: Option<&str>) -> anyhow::Result<ImportBatch> {
    let records: Vec<serde_json::Value> =
        serde_json::from_str(raw).context("expected a JSON array of article objects")?;

    let mut batch = ImportBatch::default();
    for (index, record) in records.into_iter().enumerate() {
        if !record.is_object() {
            tracing::warn!(index, "skipping non-object article record");
            batch.skipped += 1;
            continue;
        }
        let draft = match serde_json::from_value::<UpstreamRecord>(record) {
            Ok(record) => record.into_draft(source),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed article record");
                batch.skipped += 1;
                continue;
            }
        };

        match draft.into_article() {
            Ok(article) => batch.articles.push(article),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping article record");
                batch.skipped += 1;
            }
        }
    }

    Ok(batch)
}

fn read_batch(path: &Path, source: Option<&str>) -> anyhow::Result<ImportBatch> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    prepare_batch(&raw, source)
}

pub(crate) fn run_import_dry_run(path: &Path, source: Option<&str>) -> anyhow::Result<()> {
    let batch = read_batch(path, source)?;
    println!(
        "dry-run: would import {} article(s), {} skipped",
        batch.articles.len(),
        batch.skipped
    );
    for article in &batch.articles {
        println!("  {}  {}", article.id, article.display_title());
    }
    Ok(())
}

/// Upsert every article in `path` into the store.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array.
/// Per-article write failures are logged and counted, not returned.
pub(crate) async fn run_import(
    pool: &sqlx::PgPool,
    path: &Path,
    source: Option<&str>,
) -> anyhow::Result<()> {
    let batch = read_batch(path, source)?;

    let mut inserted = 0usize;
    let mut updated = 0usize;
    let mut failed = 0usize;

    for article in &batch.articles {
        match biaslens_db::upsert_article(pool, article).await {
            Ok(UpsertOutcome::Inserted) => {
                tracing::debug!(id = %article.id, "inserted article");
                inserted += 1;
            }
            Ok(UpsertOutcome::Updated) => {
                tracing::debug!(id = %article.id, "updated article");
                updated += 1;
            }
            Err(e) => {
                tracing::error!(id = %article.id, error = %e, "error uploading article");
                failed += 1;
            }
        }
    }

    let total = biaslens_db::count_articles(pool).await?;
    tracing::info!(
        inserted,
        updated,
        failed,
        skipped = batch.skipped,
        total,
        "article import complete"
    );
    println!(
        "imported {inserted} new, {updated} updated, {failed} failed, {} skipped",
        batch.skipped
    );
    Ok(())
}
