use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use numbers_types::wire::NumbersResponse;
use tracing::Instrument;
use uuid::Uuid;

pub async fn get_numbers(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<NumbersResponse>, AppError> {
    // A segment that does not decode can never name a configured category
    let Path(category) =
        path.map_err(|rejection| AppError::UnknownCategory(rejection.body_text()))?;

    let request_id = Uuid::now_v7();
    let span = tracing::info_span!("numbers", %request_id, category = %category);

    let response = state.coordinator.handle(&category).instrument(span).await?;
    Ok(Json(response))
}
