// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{CreateArticleCommand, DeleteArticleCommand, UpdateArticleCommand},
    dto::ArticleDto,
    queries::articles::{GetArticleByIdQuery, ListArticlesQuery},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::openapi::ArticleListResponse;
use crate::presentation::http::state::HttpState;
use crate::presentation::http::uploads::ArticleForm;
use axum::{
    Extension, Json,
    extract::{Multipart, Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ArticleListParams {
    /// Only articles associated with this category.
    #[serde(default)]
    pub category: Option<i64>,
    /// Page size; defaults to the configured value, capped at 100.
    #[serde(default)]
    pub limit: Option<u32>,
    /// 1-based page number.
    #[serde(default)]
    pub page: Option<u32>,
}

/// Multipart body accepted by create and update. Documentation only; the
/// handlers read the fields straight from the stream.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ArticleUploadForm {
    pub title: String,
    pub content: String,
    #[schema(value_type = String, format = Binary)]
    pub banner: Vec<u8>,
    #[schema(value_type = Vec<String>)]
    pub media: Vec<Vec<u8>>,
    pub category: Vec<i64>,
}

#[utoipa::path(
    get,
    path = "/api/v1/articles",
    params(ArticleListParams),
    responses(
        (status = 200, description = "A page of articles, newest first.", body = ArticleListResponse),
        (status = 400, description = "Malformed filter.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Unexpected server error.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ArticleListParams>,
) -> HttpResult<Json<ArticleListResponse>> {
    let query = ListArticlesQuery {
        category: params.category,
        page: params.page.unwrap_or(1),
        page_size: params.limit.unwrap_or(state.default_page_size),
    };

    state
        .services
        .article_queries
        .list_articles(query)
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "The article with its categories and media.", body = ArticleDto),
        (status = 404, description = "Article not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article_by_id(GetArticleByIdQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/articles",
    request_body(content = ArticleUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Article created.", body = ArticleDto),
        (status = 422, description = "Invalid fields.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Unexpected server error.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    multipart: Multipart,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let form = ArticleForm::from_multipart(multipart).await?;
    let command = CreateArticleCommand {
        category_ids: form.category_ids()?,
        title: form.title.unwrap_or_default(),
        content: form.content.unwrap_or_default(),
        banner: form.banner,
        media: form.media,
    };

    let created = state
        .services
        .article_commands
        .create_article(command)
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article identifier")),
    request_body(content = ArticleUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Article updated. Omitted banner or media keep their current files.", body = ArticleDto),
        (status = 404, description = "Article not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 422, description = "Invalid fields.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Unexpected server error.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> HttpResult<Json<ArticleDto>> {
    let form = ArticleForm::from_multipart(multipart).await?;
    let command = UpdateArticleCommand {
        id,
        category_ids: form.category_ids()?,
        title: form.title.unwrap_or_default(),
        content: form.content.unwrap_or_default(),
        banner: form.banner,
        media: form.media,
    };

    state
        .services
        .article_commands
        .update_article(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/articles/{id}",
    params(("id" = i64, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "Article deleted; the body is its last snapshot.", body = ArticleDto),
        (status = 404, description = "Article not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Unexpected server error.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_commands
        .delete_article(DeleteArticleCommand { id })
        .await
        .into_http()
        .map(Json)
}
