use crate::server::AppContext;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use mediadex_common::MediaItem;
use serde::Deserialize;

pub fn catalog_routes() -> Router<AppContext> {
    Router::new()
        .route("/movies", get(movies_by_genre))
        .route("/movies/popular", get(popular_movies))
        .route("/movies/classics", get(classic_movies))
        .route("/movies/:id", get(movie_details))
        .route("/series", get(series_by_genre))
        .route("/series/popular", get(popular_series))
        .route("/series/nostalgia", get(nostalgia_series))
        .route("/games/popular", get(popular_games))
        .route("/games/search", get(search_games))
        .route("/games/:id", get(game_details))
        .route("/search", get(search_screens))
}

#[derive(Debug, Default, Deserialize)]
struct PageQuery {
    page: Option<u32>,
}

impl PageQuery {
    fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenreQuery {
    #[serde(default)]
    genres: String,
    page: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct GamePageQuery {
    page: Option<u32>,
    page_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
    page: Option<u32>,
}

fn detail(item: Option<MediaItem>) -> Response {
    match item {
        Some(item) => Json(item).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Item not found"})),
        )
            .into_response(),
    }
}

async fn popular_movies(
    State(ctx): State<AppContext>,
    Query(params): Query<PageQuery>,
) -> impl IntoResponse {
    Json(ctx.catalog.popular_movies(params.page()).await)
}

async fn classic_movies(
    State(ctx): State<AppContext>,
    Query(params): Query<PageQuery>,
) -> impl IntoResponse {
    Json(ctx.catalog.classic_movies(params.page()).await)
}

async fn movies_by_genre(
    State(ctx): State<AppContext>,
    Query(params): Query<GenreQuery>,
) -> impl IntoResponse {
    let page = params.page.unwrap_or(1);
    Json(ctx.catalog.movies_by_genre(&params.genres, page).await)
}

async fn movie_details(State(ctx): State<AppContext>, Path(id): Path<String>) -> Response {
    detail(ctx.catalog.movie_details(&id).await)
}

async fn popular_series(
    State(ctx): State<AppContext>,
    Query(params): Query<PageQuery>,
) -> impl IntoResponse {
    Json(ctx.catalog.popular_series(params.page()).await)
}

async fn nostalgia_series(
    State(ctx): State<AppContext>,
    Query(params): Query<PageQuery>,
) -> impl IntoResponse {
    Json(ctx.catalog.nostalgia_series(params.page()).await)
}

async fn series_by_genre(
    State(ctx): State<AppContext>,
    Query(params): Query<GenreQuery>,
) -> impl IntoResponse {
    let page = params.page.unwrap_or(1);
    Json(ctx.catalog.series_by_genre(&params.genres, page).await)
}

async fn popular_games(
    State(ctx): State<AppContext>,
    Query(params): Query<GamePageQuery>,
) -> impl IntoResponse {
    let page = params.page.unwrap_or(1);
    Json(ctx.catalog.popular_games(page, params.page_size).await)
}

async fn search_games(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    let page = params.page.unwrap_or(1);
    Json(ctx.catalog.search_games(&params.q, page).await)
}

async fn game_details(State(ctx): State<AppContext>, Path(id): Path<String>) -> Response {
    detail(ctx.catalog.game_details(&id).await)
}

async fn search_screens(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    let page = params.page.unwrap_or(1);
    Json(ctx.catalog.search_screens(&params.q, page).await)
}
