//! 桌台登记 API Handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::api::convert::TableView;
use crate::core::ServerState;
use crate::db::models::DiningTableCreate;
use crate::db::repository::DiningTableRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTableRequest {
    #[serde(alias = "table_no")]
    pub table_no: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AddTableResponse {
    pub success: bool,
    pub message: String,
    pub table: TableView,
}

/// POST /api/controller/addTable - 登记新桌台
///
/// 桌号唯一，重复登记返回 409。
pub async fn add_table(
    State(state): State<ServerState>,
    Json(payload): Json<AddTableRequest>,
) -> AppResult<(StatusCode, Json<AddTableResponse>)> {
    let table_no = payload
        .table_no
        .ok_or_else(|| AppError::validation("Table number is required"))?;
    if table_no < 1 {
        return Err(AppError::validation("Table number must be positive"));
    }

    let repo = DiningTableRepository::new(state.get_db());
    let table = repo.create(DiningTableCreate { table_no }).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddTableResponse {
            success: true,
            message: "Table added successfully".into(),
            table: TableView::from_table(&table),
        }),
    ))
}
