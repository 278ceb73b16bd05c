use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::sync::Mutex;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::board::{Board, BoardStore, ColumnStatus, ColumnView};
use crate::card::Card;
use crate::column::ScrollMetrics;
use crate::config::Config;
use crate::fetcher::Fetcher;

pub struct AppState {
    pub config: Config,
    pub fetcher: Fetcher,
    pub boards: Mutex<BoardStore>,
}

impl AppState {
    pub fn new(config: Config, fetcher: Fetcher) -> Self {
        Self {
            config,
            fetcher,
            boards: Mutex::new(BoardStore::default()),
        }
    }
}

// Template structs
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub sources: Vec<String>,
}

#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub board_id: u64,
    pub columns: Vec<ColumnView>,
}

#[derive(Template)]
#[template(path = "cards.html")]
pub struct CardsTemplate {
    pub cards: Vec<Card>,
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/board", get(board))
        .route("/boards/:board_id/columns/:slot/more", get(column_more))
        .route("/health", get(health))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Route handlers
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let sources = state
        .config
        .columns
        .iter()
        .map(|c| c.name.clone())
        .collect();

    HtmlTemplate(IndexTemplate { sources })
}

/// Full reload: fetches every feed and starts a new load cycle with its own
/// board.
pub async fn board(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut fresh = Board::load(&state.fetcher, &state.config.columns).await;
    let columns = fresh.views();

    let board_id = state.boards.lock().await.insert(fresh);
    info!("Board {} loaded with {} columns", board_id, columns.len());

    HtmlTemplate(BoardTemplate { board_id, columns })
}

pub async fn column_more(
    State(state): State<Arc<AppState>>,
    Path((board_id, slot)): Path<(u64, usize)>,
    Query(metrics): Query<ScrollMetrics>,
) -> Response {
    let cards = state
        .boards
        .lock()
        .await
        .get_mut(board_id)
        .and_then(|board| board.scroll(slot, metrics));

    match cards {
        Some(cards) => HtmlTemplate(CardsTemplate { cards }).into_response(),
        None => (StatusCode::NOT_FOUND, "Column not found").into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
