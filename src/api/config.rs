//! Configuration endpoint handlers

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use super::{ApiResult, AppState};
use crate::config::{AppConfig, ConfigPatch};

/// Response for `PUT /api/config`
#[derive(Debug, Serialize)]
pub struct ConfigEnvelope {
    pub success: bool,
    pub message: String,
    pub config: AppConfig,
}

/// `GET /api/config` - the full configuration document
pub async fn get(State(state): State<AppState>) -> ApiResult<Json<AppConfig>> {
    let config = state.service.storage().load_config()?;
    Ok(Json(config))
}

/// `PUT /api/config` - partial merge, returns the full result
pub async fn update(
    State(state): State<AppState>,
    Json(patch): Json<ConfigPatch>,
) -> ApiResult<Json<ConfigEnvelope>> {
    let storage = state.service.storage();
    let mut config = storage.load_config()?;
    patch.apply(&mut config);
    storage.save_config(&config)?;

    tracing::info!(max_active_tasks = config.max_active_tasks, "configuration updated");
    Ok(Json(ConfigEnvelope {
        success: true,
        message: "Configuration updated".to_string(),
        config,
    }))
}
