use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service::character::Character;
use tracing::{error, warn};

use crate::dto::MessageEnvelope;
use crate::errors::ApiError;
use crate::state::ServerState;

fn display_id(c: &Character) -> String {
    c.id.map(|id| id.to_string()).unwrap_or_default()
}

/// 列出所有角色
#[utoipa::path(get, path = "/api/character/list", tag = "character",
    responses(
        (status = 200, description = "All characters", body = [crate::openapi::CharacterDoc]),
        (status = 500, description = "Store failure, empty body"),
    ))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Character>>, ApiError> {
    state.characters.list_characters().await.map(Json).map_err(|e| {
        error!(error = %e, "list characters failed");
        ApiError::BareFault
    })
}

/// Fetch one character. An unknown id is answered like a store fault.
#[utoipa::path(get, path = "/api/character/{id}", tag = "character",
    params(("id" = i64, Path, description = "Character id")),
    responses(
        (status = 200, description = "The character", body = crate::openapi::CharacterDoc),
        (status = 500, description = "Unknown id or store failure", body = MessageEnvelope),
    ))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<Json<Character>, ApiError> {
    match state.characters.get_character_by_id(id).await {
        Ok(Some(c)) => Ok(Json(c)),
        Ok(None) => Err(ApiError::Fault { method: "GET", message: format!("No character found with ID {id}") }),
        Err(e) => {
            error!(id, error = %e, "get character failed");
            Err(ApiError::Fault { method: "GET", message: e.to_string() })
        }
    }
}

/// 创建角色，客户端传入的 id 会被忽略
#[utoipa::path(post, path = "/api/character/create-character", tag = "character",
    request_body = crate::openapi::CharacterDoc,
    responses(
        (status = 201, description = "Created", body = MessageEnvelope),
        (status = 500, description = "Store failure", body = MessageEnvelope),
    ))]
pub async fn create(State(state): State<ServerState>, Json(input): Json<Character>) -> Result<Response, ApiError> {
    match state.characters.create_character(input).await {
        Ok(created) => {
            let body = MessageEnvelope::ok("POST", format!("Person created with ID {}", display_id(&created)));
            Ok((StatusCode::CREATED, Json(body)).into_response())
        }
        Err(e) => {
            error!(error = %e, "create character failed");
            Err(ApiError::Fault { method: "POST", message: format!("Error: {e}") })
        }
    }
}

#[utoipa::path(put, path = "/api/character/update-character/{id}", tag = "character",
    params(("id" = i64, Path, description = "Character id")),
    request_body = crate::openapi::CharacterDoc,
    responses(
        (status = 200, description = "Updated", body = MessageEnvelope),
        (status = 400, description = "Malformed id or body", body = MessageEnvelope),
        (status = 500, description = "Unknown id or store failure, empty body"),
    ))]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    input: Result<Json<Character>, JsonRejection>,
) -> Result<Json<MessageEnvelope>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::invalid_input("PUT", e.body_text()))?;
    let Json(input) = input.map_err(|e| ApiError::invalid_input("PUT", e.body_text()))?;
    match state.characters.update_character(id, input).await {
        Ok(Some(_)) => Ok(Json(MessageEnvelope::ok("PUT", format!("Person updated with ID {id}")))),
        Ok(None) => {
            warn!(id, "update of unknown character");
            Err(ApiError::BareFault)
        }
        Err(e) => {
            error!(id, error = %e, "update character failed");
            Err(ApiError::BareFault)
        }
    }
}

#[utoipa::path(delete, path = "/api/character/delete-character/{id}", tag = "character",
    params(("id" = i64, Path, description = "Character id")),
    responses(
        (status = 200, description = "Deleted", body = MessageEnvelope),
        (status = 400, description = "Unknown or malformed id", body = MessageEnvelope),
        (status = 500, description = "Store failure, empty body"),
    ))]
pub async fn remove(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageEnvelope>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::invalid_input("DELETE", e.body_text()))?;
    match state.characters.delete_character(id).await {
        Ok(true) => Ok(Json(MessageEnvelope::ok("DELETE", format!("Person deleted with ID {id}")))),
        Ok(false) => Err(ApiError::Rejected {
            method: "DELETE",
            message: format!("Person didnt delete with ID {id} , because the person does not exist."),
        }),
        Err(e) => {
            error!(id, error = %e, "delete character failed");
            Err(ApiError::BareFault)
        }
    }
}
