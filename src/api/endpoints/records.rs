//! Stored-history endpoints.
//!
//! - `GET /records` — every stored consultation, oldest first
//! - `POST /delete/:id` — remove one record
//! - `POST /delete_all` — clear the history

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::{self, PatientRecord};

#[derive(Serialize)]
pub struct RecordsResponse {
    pub records: Vec<PatientRecord>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct DeleteAllResponse {
    pub deleted: usize,
}

/// `GET /records` — full history in storage order.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<RecordsResponse>, ApiError> {
    let conn = ctx.state.open_db()?;
    let records = db::get_all_records(&conn)?;
    let count = records.len();

    Ok(Json(RecordsResponse { records, count }))
}

/// `POST /delete/:id` — remove one record. Deleting an id that does not
/// exist is not an error; the response is 204 either way.
pub async fn delete_one(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.state.open_db()?;
    let removed = db::delete_record(&conn, id)?;
    if removed {
        tracing::info!(id, "Record deleted");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// `POST /delete_all` — clear the history, reporting how many rows went.
pub async fn delete_all(
    State(ctx): State<ApiContext>,
) -> Result<Json<DeleteAllResponse>, ApiError> {
    let conn = ctx.state.open_db()?;
    let deleted = db::delete_all_records(&conn)?;
    tracing::info!(deleted, "History cleared");

    Ok(Json(DeleteAllResponse { deleted }))
}
