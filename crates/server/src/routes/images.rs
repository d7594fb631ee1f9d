use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use service::image::FileUpload;
use tracing::{debug, error};

use crate::dto::UploadEnvelope;
use crate::state::ServerState;

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// Upload the `file` part to the bucket.
///
/// Always 201 unless the multipart stream itself breaks; upload failures show
/// up as the sentinel string in `link`.
#[utoipa::path(post, path = "/api/character/image", tag = "image",
    request_body(content = crate::openapi::UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Public URL, failure sentinel, or null link", body = UploadEnvelope),
        (status = 500, description = "Unreadable multipart body", body = UploadEnvelope),
    ))]
pub async fn upload(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> (StatusCode, Json<UploadEnvelope>) {
    let no_file = (StatusCode::CREATED, Json(UploadEnvelope { link: None, status: true }));
    let broken = (StatusCode::INTERNAL_SERVER_ERROR, Json(UploadEnvelope { link: None, status: false }));

    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            debug!(error = %e, "request is not multipart");
            return no_file;
        }
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return no_file,
            Err(e) => {
                error!(error = %e, "failed to read multipart body");
                return broken;
            }
        };
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original_name = field.file_name().map(str::to_string);
        let bytes = match field.bytes().await {
            Ok(b) => b.to_vec(),
            Err(e) => {
                error!(error = %e, "failed to read uploaded file");
                return broken;
            }
        };
        let link = state.images.upload_or_sentinel(FileUpload { original_name, bytes }).await;
        return (StatusCode::CREATED, Json(UploadEnvelope { link: Some(link), status: true }));
    }
}

/// 删除 `<name>.png`，返回纯文本结果
#[utoipa::path(delete, path = "/api/character/image/{name}", tag = "image",
    params(("name" = String, Path, description = "Object name without the .png extension")),
    responses((status = 200, description = "Result message", body = String, content_type = "text/plain")))]
pub async fn remove(State(state): State<ServerState>, Path(name): Path<String>) -> String {
    state.images.delete_or_message(&format!("{name}.png")).await
}
