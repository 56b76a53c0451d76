//! HTTP handlers. Store calls run on the blocking pool.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, RawQuery, State};
use serde::Serialize;
use serde_json::{Value, json};

use super::ServerState;
use super::error::ApiError;
use crate::core::{Brief, BriefStatus, EditorProfile, PortfolioItem, RatingSummary, Review, UserPublic};
use crate::error::{EditoraError, Result};
use crate::search::{self, EditorDetail, FilterSpec, SearchResponse, editor_detail};
use crate::storage::Database;

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

async fn blocking<T, F>(state: &ServerState, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&Database) -> Result<T> + Send + 'static,
{
    let db = Arc::clone(&state.db);
    let value = tokio::task::spawn_blocking(move || f(&db))
        .await
        .map_err(|err| EditoraError::Server(format!("worker task failed: {err}")))??;
    Ok(Json(value))
}

fn require_profile(db: &Database, id: i64) -> Result<EditorProfile> {
    db.get_profile(id)?
        .ok_or_else(|| EditoraError::not_found("profile", id))
}

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn search_editors(
    State(state): State<ServerState>,
    RawQuery(query): RawQuery,
) -> ApiResult<SearchResponse> {
    let filters = FilterSpec::from_query(query.as_deref().unwrap_or_default());
    let settings = state.settings;
    blocking(&state, move |db| search::run(db, &filters, &settings)).await
}

pub async fn editor(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> ApiResult<EditorDetail> {
    blocking(&state, move |db| editor_detail(db, id)).await
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    pub id: i64,
    pub view_count: u64,
    pub contact_click_count: u64,
}

impl From<EditorProfile> for Counters {
    fn from(profile: EditorProfile) -> Self {
        Self {
            id: profile.id,
            view_count: profile.view_count,
            contact_click_count: profile.contact_click_count,
        }
    }
}

pub async fn record_view(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> ApiResult<Counters> {
    blocking(&state, move |db| db.increment_view_count(id).map(Counters::from)).await
}

pub async fn record_contact_click(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> ApiResult<Counters> {
    blocking(&state, move |db| {
        db.increment_contact_clicks(id).map(Counters::from)
    })
    .await
}

pub async fn portfolio(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<PortfolioItem>> {
    blocking(&state, move |db| {
        require_profile(db, id)?;
        db.list_portfolio_items(id)
    })
    .await
}

#[derive(Debug, Serialize)]
pub struct ReviewsBody {
    pub reviews: Vec<Review>,
    pub summary: RatingSummary,
}

pub async fn reviews(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> ApiResult<ReviewsBody> {
    blocking(&state, move |db| {
        require_profile(db, id)?;
        let reviews = db.list_reviews(id)?;
        let summary = RatingSummary::from_reviews(&reviews);
        Ok(ReviewsBody { reviews, summary })
    })
    .await
}

pub async fn user(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> ApiResult<UserPublic> {
    blocking(&state, move |db| {
        db.get_user(id)?
            .map(UserPublic::from)
            .ok_or_else(|| EditoraError::not_found("user", id))
    })
    .await
}

pub async fn open_briefs(State(state): State<ServerState>) -> ApiResult<Vec<Brief>> {
    blocking(&state, |db| db.list_briefs_by_status(BriefStatus::Open)).await
}
