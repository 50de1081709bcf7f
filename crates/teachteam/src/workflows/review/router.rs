use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::Rank;
use super::panel::{ReviewError, ReviewPanel};
use super::roster::RosterQuery;
use super::selection::SelectionError;
use crate::storage::KeyValueStore;

/// Panel shared across handlers. The lock is held for the whole mutation including the
/// synchronous write-back, so a slow backend blocks other review requests on the same worker.
pub type SharedPanel<S> = Arc<Mutex<ReviewPanel<S>>>;

/// Router builder exposing the review panel over HTTP.
pub fn review_router<S>(panel: SharedPanel<S>) -> Router
where
    S: KeyValueStore + 'static,
{
    Router::new()
        .route("/api/v1/review/applicants", get(list_handler::<S>))
        .route(
            "/api/v1/review/applicants/:name/toggle",
            post(toggle_handler::<S>),
        )
        .route(
            "/api/v1/review/applicants/:name/comment",
            put(comment_handler::<S>),
        )
        .route(
            "/api/v1/review/applicants/:name/rank",
            put(rank_handler::<S>),
        )
        .route("/api/v1/roster", get(roster_handler::<S>))
        .with_state(panel)
}

#[derive(Debug, Deserialize)]
pub struct CommentUpdate {
    pub comment: String,
}

/// Rank as typed by the reviewer: a string goes through the lenient integer parse, a number
/// is taken as is, anything else is not-a-number.
#[derive(Debug, Deserialize)]
pub struct RankUpdate {
    #[serde(default)]
    pub rank: Value,
}

impl RankUpdate {
    pub fn rank(&self) -> Rank {
        match &self.rank {
            Value::String(raw) => Rank::parse(raw),
            Value::Number(number) => match number.as_i64() {
                Some(value) => Rank::new(value),
                None => number
                    .as_f64()
                    .map_or(Rank::NOT_A_NUMBER, |value| Rank::parse(&value.to_string())),
            },
            _ => Rank::NOT_A_NUMBER,
        }
    }
}

pub(crate) async fn list_handler<S>(State(panel): State<SharedPanel<S>>) -> Response
where
    S: KeyValueStore + 'static,
{
    let rows = panel.lock().expect("review panel mutex poisoned").rows();
    (StatusCode::OK, Json(rows)).into_response()
}

pub(crate) async fn toggle_handler<S>(
    State(panel): State<SharedPanel<S>>,
    Path(name): Path<String>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let result = panel.lock().expect("review panel mutex poisoned").toggle(&name);
    selection_response(&name, result)
}

pub(crate) async fn comment_handler<S>(
    State(panel): State<SharedPanel<S>>,
    Path(name): Path<String>,
    Json(update): Json<CommentUpdate>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let result = panel
        .lock()
        .expect("review panel mutex poisoned")
        .update_comment(&name, &update.comment);
    selection_response(&name, result)
}

pub(crate) async fn rank_handler<S>(
    State(panel): State<SharedPanel<S>>,
    Path(name): Path<String>,
    Json(update): Json<RankUpdate>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let result = panel
        .lock()
        .expect("review panel mutex poisoned")
        .update_rank(&name, update.rank());
    selection_response(&name, result)
}

pub(crate) async fn roster_handler<S>(
    State(panel): State<SharedPanel<S>>,
    Query(query): Query<RosterQuery>,
) -> Response
where
    S: KeyValueStore + 'static,
{
    let guard = panel.lock().expect("review panel mutex poisoned");
    let applicants: Vec<_> = guard.roster().search(&query).into_iter().cloned().collect();
    drop(guard);
    (StatusCode::OK, Json(applicants)).into_response()
}

fn selection_response(
    name: &str,
    result: Result<super::domain::Selection, ReviewError>,
) -> Response {
    match result {
        Ok(selection) => {
            let payload = json!({
                "name": name,
                "selected": selection.is_active(),
                "comment": selection.comment,
                "rank": selection.rank,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(
            error @ (ReviewError::NotOnRoster(_)
            | ReviewError::Selection(SelectionError::UnknownApplicant(_))),
        ) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(error @ ReviewError::Persist(_)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
