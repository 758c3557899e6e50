use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    error::AppError,
    models::{DatasetSource, Record},
    services::{
        analysis::{
            self, CategoricalSummary, ChartKind, ChartSelection, ColumnTypes, DatasetOverview,
            NumericSummary, PREVIEW_ROWS,
        },
        file_processor::{self, EXPORT_FILE_NAME},
    },
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/dataset", get(overview))
        .route("/dataset/columns", get(columns))
        .route("/dataset/summary", get(summary))
        .route("/dataset/chart", get(chart))
        .route("/dataset/table", get(table))
        .route("/dataset/preview", get(preview))
        .route("/dataset/export", get(export))
        .route("/dataset/upload", post(upload))
        .route("/dataset/sample", post(reset_sample))
        .layer(cors)
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    numeric: IndexMap<String, NumericSummary>,
    categorical: IndexMap<String, CategoricalSummary>,
}

#[derive(Debug, Deserialize)]
pub struct ChartParams {
    #[serde(default = "default_chart_kind")]
    kind: ChartKind,
    x: Option<String>,
    y: Option<String>,
    category: Option<String>,
}

fn default_chart_kind() -> ChartKind {
    ChartKind::Bar
}

#[derive(Debug, Deserialize)]
pub struct TableParams {
    #[serde(default)]
    search: String,
    page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    file_name: String,
}

async fn overview(State(state): State<Arc<AppState>>) -> Json<DatasetOverview> {
    let loaded = state.datasets.current();
    Json(analysis::dataset_overview(&loaded))
}

async fn columns(State(state): State<Arc<AppState>>) -> Json<ColumnTypes> {
    let loaded = state.datasets.current();
    Json(analysis::classify_columns(&loaded.dataset))
}

async fn summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    let loaded = state.datasets.current();
    Json(SummaryResponse {
        numeric: analysis::numeric_summaries(&loaded.dataset),
        categorical: analysis::categorical_summaries(&loaded.dataset),
    })
}

async fn chart(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ChartParams>,
) -> Result<Json<JsonValue>, AppError> {
    let loaded = state.datasets.current();
    let selection = ChartSelection {
        x_axis: params.x,
        y_axis: params.y,
        category_field: params.category,
    };
    let projection = analysis::build_projection(&loaded.dataset, params.kind, &selection);
    Ok(Json(serde_json::to_value(projection)?))
}

async fn table(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TableParams>,
) -> Result<Json<JsonValue>, AppError> {
    let loaded = state.datasets.current();
    let page = analysis::table_page(&loaded.dataset, &params.search, params.page.unwrap_or(1));
    Ok(Json(serde_json::to_value(page)?))
}

async fn preview(State(state): State<Arc<AppState>>) -> Json<Vec<Record>> {
    let loaded = state.datasets.current();
    Json(analysis::preview(&loaded.dataset, PREVIEW_ROWS).to_vec())
}

async fn export(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let loaded = state.datasets.current();
    let body = file_processor::export_csv(&loaded.dataset)?;
    tracing::info!("Exported {} rows as CSV", loaded.dataset.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        body,
    ))
}

async fn upload(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<Json<DatasetOverview>, AppError> {
    if params.file_name.trim().is_empty() {
        return Err(AppError::InvalidInput("file_name is required".to_string()));
    }

    let dataset = file_processor::load_upload(&params.file_name, body)?;
    let loaded = state.datasets.replace(
        dataset,
        DatasetSource::Upload {
            file_name: params.file_name,
        },
    );
    Ok(Json(analysis::dataset_overview(&loaded)))
}

async fn reset_sample(State(state): State<Arc<AppState>>) -> Json<DatasetOverview> {
    let loaded = state.datasets.reset_to_sample();
    Json(analysis::dataset_overview(&loaded))
}
