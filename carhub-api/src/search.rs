use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::post,
    Json, Router,
};
use carhub_core::{SearchCarsRequest, SearchCarsResponse, SearchQuery};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/frontend-cars", post(search_cars))
        .route("/api/frontend-cars/{page}/{size}", post(search_cars_paged))
}

/// POST /api/frontend-cars
/// Page and size come from the body.
pub async fn search_cars(
    State(state): State<AppState>,
    body: Result<Json<SearchCarsRequest>, JsonRejection>,
) -> Result<Json<SearchCarsResponse>, AppError> {
    let started = Instant::now();
    let result = match body {
        Ok(Json(req)) => run(&state, req).await,
        Err(rejection) => Err(rejection.into()),
    };
    record(&state, &result, started);
    result.map(Json)
}

/// POST /api/frontend-cars/{page}/{size}
/// Path values override any page or size in the body.
pub async fn search_cars_paged(
    State(state): State<AppState>,
    path: Result<Path<(i64, i64)>, PathRejection>,
    body: Result<Json<SearchCarsRequest>, JsonRejection>,
) -> Result<Json<SearchCarsResponse>, AppError> {
    let started = Instant::now();
    let result = match (path, body) {
        (Ok(Path((page, size))), Ok(Json(mut req))) => {
            req.page = Some(page);
            req.size = Some(size);
            run(&state, req).await
        }
        (Err(rejection), _) => Err(rejection.into()),
        (_, Err(rejection)) => Err(rejection.into()),
    };
    record(&state, &result, started);
    result.map(Json)
}

async fn run(state: &AppState, req: SearchCarsRequest) -> Result<SearchCarsResponse, AppError> {
    let query = SearchQuery::try_from(req)?;
    Ok(state.engine.search(query).await?)
}

fn record(state: &AppState, result: &Result<SearchCarsResponse, AppError>, started: Instant) {
    let elapsed = started.elapsed().as_secs_f64();
    match result {
        Ok(response) => state.metrics.observe("ok", elapsed, Some(response.page_info.total_records as u64)),
        Err(err) => {
            tracing::info!("Search rejected: {}", err);
            state.metrics.observe(err.outcome(), elapsed, None)
        }
    }
}
