//! Terminal rendering of the article list and grouped views.

use biaslens_client::{load_articles, ArticlesClient};
use biaslens_core::{
    derive_view, toggle_expansion, Article, ArticleView, BiasFilter, ExpansionState, SourceGroup,
    ViewMode, ViewQuery,
};

const BAR_WIDTH: usize = 20;
const EMPTY_MESSAGE: &str = "No articles found.";

#[derive(Debug, Clone, Default)]
pub(crate) struct BrowseOptions {
    pub search: String,
    pub bias: String,
    pub grouped: bool,
    pub expand: Vec<String>,
    pub expand_all: bool,
}

impl BrowseOptions {
    fn view_query(&self) -> ViewQuery {
        ViewQuery {
            search: self.search.clone(),
            bias: BiasFilter::parse(&self.bias),
            mode: if self.grouped {
                ViewMode::Grouped
            } else {
                ViewMode::List
            },
        }
    }

    /// Starting expansion state, with each `--expand` applied as a toggle.
    fn expansion(&self, groups: &[SourceGroup<'_>]) -> ExpansionState {
        let initial = if self.expand_all {
            ExpansionState::all_expanded(groups.iter().map(|g| g.source))
        } else {
            ExpansionState::new()
        };

        self.expand
            .iter()
            .fold(initial, |state, source| toggle_expansion(&state, source))
    }
}

pub(crate) async fn run_browse(
    api_url: &str,
    timeout_secs: u64,
    options: &BrowseOptions,
) -> anyhow::Result<()> {
    let client = ArticlesClient::new(api_url, timeout_secs)?;
    let articles = load_articles(&client).await;
    print!("{}", render(&articles, options));
    Ok(())
}

/// Render the view selected by `options` as plain text.
pub(crate) fn render(articles: &[Article], options: &BrowseOptions) -> String {
    let view = derive_view(articles, &options.view_query());
    if view.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    let mut out = String::new();
    match view {
        ArticleView::List(list) => {
            for article in list {
                out.push_str(&card(article, ""));
            }
        }
        ArticleView::Grouped(groups) => {
            let expansion = options.expansion(&groups);
            for group in &groups {
                let expanded = expansion.is_expanded(group.source);
                let marker = if expanded { '▼' } else { '▶' };
                out.push_str(&format!("{marker} {} ({})\n", group.source, group.len()));
                if expanded {
                    for article in &group.articles {
                        out.push_str(&card(article, "    "));
                    }
                }
            }
        }
    }
    out
}

/// One article card, each line prefixed by `indent`, followed by a blank line.
fn card(article: &Article, indent: &str) -> String {
    let mut lines = vec![
        format!("[{}] {}", article.bias_class(), article.display_title()),
        format!("  Source: {}", article.display_source()),
    ];

    let description = article.display_description();
    if !description.is_empty() {
        lines.push(format!("  {description}"));
    }

    let label = article.sentiment.as_deref().unwrap_or("Unknown");
    lines.push(format!(
        "  Sentiment: {label} {}",
        sentiment_bar(article.sentiment_fraction())
    ));

    if let Some(url) = article.url.as_deref() {
        lines.push(format!("  {url}"));
    }

    let mut out: String = lines
        .iter()
        .map(|line| format!("{indent}{line}\n"))
        .collect();
    out.push('\n');
    out
}

/// Fixed-width bar with `fraction` of its cells filled.
fn sentiment_bar(fraction: f64) -> String {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
