use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use biaslens_core::{derive_view, Article, ArticleView, BiasFilter, ViewMode, ViewQuery};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ArticleViewQuery {
    pub search: Option<String>,
    pub bias: Option<String>,
    pub view: Option<ViewMode>,
}

impl ArticleViewQuery {
    fn into_view_query(self) -> ViewQuery {
        ViewQuery {
            search: self.search.unwrap_or_default(),
            bias: BiasFilter::parse(self.bias.as_deref().unwrap_or_default()),
            mode: self.view.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct GroupItem<'a> {
    source: &'a str,
    count: usize,
    articles: Vec<&'a Article>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
enum ArticleViewData<'a> {
    List {
        count: usize,
        articles: Vec<&'a Article>,
    },
    Grouped {
        count: usize,
        groups: Vec<GroupItem<'a>>,
    },
}

impl<'a> From<ArticleView<'a>> for ArticleViewData<'a> {
    fn from(view: ArticleView<'a>) -> Self {
        let count = view.article_count();
        match view {
            ArticleView::List(articles) => ArticleViewData::List { count, articles },
            ArticleView::Grouped(groups) => ArticleViewData::Grouped {
                count,
                groups: groups
                    .into_iter()
                    .map(|group| GroupItem {
                        source: group.source,
                        count: group.len(),
                        articles: group.articles,
                    })
                    .collect(),
            },
        }
    }
}

async fn load_all(state: &AppState) -> Result<Vec<Article>, biaslens_db::DbError> {
    let rows = biaslens_db::list_articles(&state.pool).await?;
    Ok(rows.into_iter().map(Article::from).collect())
}

/// `GET /api/articles`: the whole collection as a bare array.
///
/// A store failure still answers with an empty array, alongside a 500.
pub(super) async fn list_articles(State(state): State<AppState>) -> Response {
    match load_all(&state).await {
        Ok(articles) => Json(articles).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "error fetching articles");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::<Article>::new())).into_response()
        }
    }
}

pub(super) async fn get_article(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let row = biaslens_db::get_article_by_id(&state.pool, &id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    match row {
        Some(row) => Ok(Json(Article::from(row))),
        None => Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("article '{id}' not found"),
        )),
    }
}

pub(super) async fn article_view(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ArticleViewQuery>,
) -> Result<Response, ApiError> {
    let articles = load_all(&state)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let view_query = query.into_view_query();
    let data = ArticleViewData::from(derive_view(&articles, &view_query));

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
    .into_response())
}
