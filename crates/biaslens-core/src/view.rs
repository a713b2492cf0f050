//! Derived views over a flat article list.
//!
//! Everything here is pure and recomputed on every input change: filtering by
//! search term and bias label, grouping by source, and the per-source
//! expand/collapse state owned by whichever display layer renders the groups.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::article::Article;

/// Bias filter selected in the UI: the `"all"` wildcard or a lower-cased label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BiasFilter {
    #[default]
    All,
    Label(String),
}

impl BiasFilter {
    /// Parse a raw filter value. `"all"` in any case, and an empty value, are
    /// the wildcard.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            BiasFilter::All
        } else {
            BiasFilter::Label(raw.to_lowercase())
        }
    }

    #[must_use]
    pub fn matches(&self, article: &Article) -> bool {
        match self {
            BiasFilter::All => true,
            BiasFilter::Label(label) => {
                article.political_bias.as_deref().unwrap_or("").to_lowercase() == *label
            }
        }
    }
}

fn matches_search(article: &Article, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let title = article.title.as_deref().unwrap_or("").to_lowercase();
    let description = article.description.as_deref().unwrap_or("").to_lowercase();
    title.contains(needle) || description.contains(needle)
}

/// Keep the articles whose title or description contains `search_term`
/// (case-insensitively) and whose bias label matches `bias_filter`.
///
/// Input order is preserved. A filter that matches nothing yields an empty
/// vector.
#[must_use]
pub fn filter_articles<'a>(
    articles: &'a [Article],
    search_term: &str,
    bias_filter: &str,
) -> Vec<&'a Article> {
    filter_with(articles, search_term, &BiasFilter::parse(bias_filter))
}

fn filter_with<'a>(
    articles: &'a [Article],
    search_term: &str,
    bias_filter: &BiasFilter,
) -> Vec<&'a Article> {
    let needle = search_term.to_lowercase();
    articles
        .iter()
        .filter(|article| matches_search(article, &needle) && bias_filter.matches(article))
        .collect()
}

/// Articles sharing one source label, in their original relative order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceGroup<'a> {
    pub source: &'a str,
    pub articles: Vec<&'a Article>,
}

impl SourceGroup<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// Partition articles by source label.
///
/// Groups appear in order of first appearance; articles without a source
/// land under `"Unknown Source"`. Groups are never empty.
pub fn group_by_source<'a, I>(articles: I) -> Vec<SourceGroup<'a>>
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    articles
        .into_iter()
        .fold(Vec::new(), |mut groups: Vec<SourceGroup<'a>>, article| {
            let source = article.display_source();
            if let Some(&slot) = index.get(source) {
                groups[slot].articles.push(article);
            } else {
                index.insert(source, groups.len());
                groups.push(SourceGroup {
                    source,
                    articles: vec![article],
                });
            }
            groups
        })
}

/// Per-source expand/collapse state for the grouped view.
///
/// Sources that were never toggled are collapsed. Only expanded sources are
/// stored, so toggling a source twice yields a state equal to the original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State with every given source expanded.
    #[must_use]
    pub fn all_expanded<'a, I>(sources: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            expanded: sources.into_iter().map(ToOwned::to_owned).collect(),
        }
    }

    #[must_use]
    pub fn is_expanded(&self, source: &str) -> bool {
        self.expanded.contains(source)
    }

    /// Return a copy with `source` flipped; `self` is left untouched.
    #[must_use]
    pub fn toggled(&self, source: &str) -> Self {
        let mut next = self.clone();
        if !next.expanded.remove(source) {
            next.expanded.insert(source.to_owned());
        }
        next
    }
}

/// Flip the expansion flag for `source_key`, returning the new state.
#[must_use]
pub fn toggle_expansion(state: &ExpansionState, source_key: &str) -> ExpansionState {
    state.toggled(source_key)
}

/// Map a sentiment score in `[-1, 1]` onto `[0, 1]` for bar display.
///
/// Out-of-range scores are clamped. A missing or non-finite score sits at the
/// neutral midpoint.
#[must_use]
pub fn sentiment_bar_fraction(score: Option<f64>) -> f64 {
    match score {
        Some(score) if score.is_finite() => (score.clamp(-1.0, 1.0) + 1.0) / 2.0,
        _ => 0.5,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Grouped,
}

/// UI parameters that drive [`derive_view`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub bias: BiasFilter,
    pub mode: ViewMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArticleView<'a> {
    List(Vec<&'a Article>),
    Grouped(Vec<SourceGroup<'a>>),
}

impl ArticleView<'_> {
    /// Number of articles in the view, across all groups.
    #[must_use]
    pub fn article_count(&self) -> usize {
        match self {
            ArticleView::List(articles) => articles.len(),
            ArticleView::Grouped(groups) => groups.iter().map(SourceGroup::len).sum(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.article_count() == 0
    }
}

/// Filter, then group when the query asks for the grouped view.
#[must_use]
pub fn derive_view<'a>(articles: &'a [Article], query: &ViewQuery) -> ArticleView<'a> {
    let filtered = filter_with(articles, &query.search, &query.bias);
    match query.mode {
        ViewMode::List => ArticleView::List(filtered),
        ViewMode::Grouped => ArticleView::Grouped(group_by_source(filtered)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, source: Option<&str>, bias: Option<&str>) -> Article {
        Article {
            id: id.to_string(),
            title: Some(format!("Story {id}")),
            description: None,
            source: source.map(ToOwned::to_owned),
            sentiment: None,
            sentiment_score: None,
            political_bias: bias.map(ToOwned::to_owned),
            url: None,
            published: None,
        }
    }

    fn ids(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|a| a.id.clone()).collect()
    }

    fn sample() -> Vec<Article> {
        vec![
            article("1", Some("A"), Some("Left")),
            article("2", Some("A"), Some("Right")),
            article("3", Some("B"), Some("Left")),
        ]
    }

    fn mixed() -> Vec<Article> {
        let mut climate = article("4", Some("C"), Some("Center"));
        climate.title = Some("Climate Summit Opens".to_string());
        let mut markets = article("5", None, Some("right"));
        markets.title = None;
        markets.description = Some("Markets react to the CLIMATE deal".to_string());
        let mut sports = article("6", Some("A"), None);
        sports.description = Some("Cup final".to_string());
        let mut all = sample();
        all.extend([climate, markets, sports]);
        all
    }

    #[test]
    fn empty_filters_return_everything_in_order() {
        let articles = mixed();
        let filtered = filter_articles(&articles, "", "all");
        assert_eq!(filtered, articles.iter().collect::<Vec<_>>());
    }

    #[test]
    fn bias_filter_selects_matching_labels() {
        let articles = sample();
        let filtered = filter_articles(&articles, "", "left");
        assert_eq!(ids(&filtered), ["1", "3"]);
    }

    #[test]
    fn bias_filter_value_is_case_insensitive() {
        let articles = mixed();
        assert_eq!(ids(&filter_articles(&articles, "", "RIGHT")), ["2", "5"]);
        assert_eq!(filter_articles(&articles, "", "ALL").len(), articles.len());
    }

    #[test]
    fn bias_filter_parse_decides_wildcard_and_case() {
        assert_eq!(BiasFilter::parse(""), BiasFilter::All);
        assert_eq!(BiasFilter::parse("  All "), BiasFilter::All);
        assert_eq!(
            BiasFilter::parse(" Left"),
            BiasFilter::Label("left".to_string())
        );
    }

    #[test]
    fn search_matches_title_or_description_ignoring_case() {
        let articles = mixed();
        let filtered = filter_articles(&articles, "climate", "all");
        assert_eq!(ids(&filtered), ["4", "5"]);
    }

    #[test]
    fn search_and_bias_combine() {
        let articles = mixed();
        let filtered = filter_articles(&articles, "climate", "center");
        assert_eq!(ids(&filtered), ["4"]);
    }

    #[test]
    fn search_does_not_match_display_defaults() {
        let mut untitled = article("x", None, None);
        untitled.title = None;
        assert!(filter_articles(&[untitled], "untitled", "all").is_empty());
    }

    #[test]
    fn filter_agrees_with_predicates_for_every_article() {
        let articles = mixed();
        for term in ["", "story", "climate", "cup", "zzz"] {
            for bias in ["all", "left", "right", "center", "unknown"] {
                let kept = filter_articles(&articles, term, bias);
                let filter = BiasFilter::parse(bias);
                for candidate in &articles {
                    let expected = matches_search(candidate, &term.to_lowercase())
                        && filter.matches(candidate);
                    let present = kept.iter().any(|a| a.id == candidate.id);
                    assert_eq!(present, expected, "term={term} bias={bias} id={}", candidate.id);
                }
            }
        }
    }

    #[test]
    fn filter_on_empty_input_is_empty() {
        assert!(filter_articles(&[], "anything", "left").is_empty());
    }

    #[test]
    fn groups_by_source_in_first_appearance_order() {
        let articles = sample();
        let groups = group_by_source(&articles);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].source, "A");
        assert_eq!(ids(&groups[0].articles), ["1", "2"]);
        assert_eq!(groups[1].source, "B");
        assert_eq!(ids(&groups[1].articles), ["3"]);
    }

    #[test]
    fn missing_source_groups_under_unknown_source() {
        let articles = vec![article("1", None, None), article("2", Some(""), None)];
        let groups = group_by_source(&articles);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].source, "Unknown Source");
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn grouping_keeps_every_article_exactly_once() {
        let articles = mixed();
        let groups = group_by_source(&articles);
        let total: usize = groups.iter().map(SourceGroup::len).sum();
        assert_eq!(total, articles.len());
        assert!(groups.iter().all(|g| !g.is_empty()));

        let mut seen: Vec<&str> = groups
            .iter()
            .flat_map(|g| g.articles.iter().map(|a| a.id.as_str()))
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), articles.len());
    }

    #[test]
    fn grouping_empty_input_yields_no_groups() {
        assert!(group_by_source(Vec::<&Article>::new()).is_empty());
    }

    #[test]
    fn first_toggle_expands() {
        let state = ExpansionState::new();
        let next = toggle_expansion(&state, "A");
        assert!(next.is_expanded("A"));
        assert!(!next.is_expanded("B"));
    }

    #[test]
    fn toggle_leaves_input_state_untouched() {
        let state = ExpansionState::new().toggled("A");
        let next = toggle_expansion(&state, "B");
        assert!(state.is_expanded("A"));
        assert!(!state.is_expanded("B"));
        assert!(next.is_expanded("A"));
        assert!(next.is_expanded("B"));
    }

    #[test]
    fn toggle_is_self_inverse() {
        let start = ExpansionState::all_expanded(["A"]);
        for key in ["A", "B"] {
            let twice = toggle_expansion(&toggle_expansion(&start, key), key);
            assert_eq!(twice.is_expanded(key), start.is_expanded(key));
            assert_eq!(twice, start);
        }
    }

    #[test]
    fn sentiment_fraction_maps_and_clamps() {
        assert!((sentiment_bar_fraction(Some(-1.0)) - 0.0).abs() < f64::EPSILON);
        assert!((sentiment_bar_fraction(Some(0.0)) - 0.5).abs() < f64::EPSILON);
        assert!((sentiment_bar_fraction(Some(1.0)) - 1.0).abs() < f64::EPSILON);
        assert!((sentiment_bar_fraction(Some(0.5)) - 0.75).abs() < f64::EPSILON);
        assert!((sentiment_bar_fraction(Some(3.0)) - 1.0).abs() < f64::EPSILON);
        assert!((sentiment_bar_fraction(None) - 0.5).abs() < f64::EPSILON);
        assert!((sentiment_bar_fraction(Some(f64::NAN)) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn derive_view_groups_filtered_articles() {
        let articles = sample();
        let query = ViewQuery {
            search: String::new(),
            bias: BiasFilter::parse("left"),
            mode: ViewMode::Grouped,
        };
        let ArticleView::Grouped(groups) = derive_view(&articles, &query) else {
            panic!("expected grouped view");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(ids(&groups[0].articles), ["1"]);
        assert_eq!(ids(&groups[1].articles), ["3"]);
    }

    #[test]
    fn derive_view_list_counts_articles() {
        let articles = mixed();
        let view = derive_view(&articles, &ViewQuery::default());
        assert_eq!(view.article_count(), articles.len());
        assert!(!view.is_empty());
    }
}
