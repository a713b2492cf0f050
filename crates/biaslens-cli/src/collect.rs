//! Feed collection: fetch a feed and write an import file.

use std::path::Path;

use anyhow::Context;
use biaslens_client::FeedCollector;
use biaslens_core::ArticleDraft;

fn write_drafts(output: &Path, drafts: &[ArticleDraft]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(drafts)?;
    std::fs::write(output, json).with_context(|| format!("failed to write {}", output.display()))
}

pub(crate) async fn run_collect_rss(
    url: &str,
    source: &str,
    output: &Path,
    timeout_secs: u64,
) -> anyhow::Result<()> {
    let collector = FeedCollector::new(timeout_secs)?;
    let drafts = collector
        .collect(url, source)
        .await
        .with_context(|| format!("failed to collect feed {url}"))?;

    write_drafts(output, &drafts)?;

    tracing::info!(
        entries = drafts.len(),
        source,
        path = %output.display(),
        "feed collected"
    );
    println!("fetched {} article(s) from {url}", drafts.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_drafts_are_importable() {
        let dir = tempfile::tempdir().expect("temp dir");
        let output = dir.path().join("rss_articles.json");
        let drafts = vec![
            ArticleDraft {
                title: Some("Council approves budget".to_string()),
                source: Some("RSS".to_string()),
                url: Some("https://wire.example.com/council-budget".to_string()),
                ..ArticleDraft::default()
            },
            ArticleDraft {
                title: Some("Linkless".to_string()),
                ..ArticleDraft::default()
            },
        ];

        write_drafts(&output, &drafts).expect("write");
        let raw = std::fs::read_to_string(&output).expect("read back");
        let batch = crate::import::prepare_batch(&raw, None).expect("importable array");

        assert_eq!(batch.articles.len(), 1);
        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.articles[0].id, "wire.example.com_council-budget");
        assert_eq!(batch.articles[0].display_source(), "RSS");
    }

    #[test]
    fn write_drafts_reports_unwritable_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = write_drafts(&dir.path().join("missing/out.json"), &[]).unwrap_err();
        assert!(err.to_string().contains("failed to write"));
    }
}
