use utoipa::OpenApi;
use utoipa::ToSchema;

use crate::dto::{MessageEnvelope, UploadEnvelope};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Wire shape of a character record.
#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct CharacterDoc {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub desc: Option<String>,
    pub image: Option<String>,
    pub powerLevel: Option<i32>,
}

#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::characters::list,
        crate::routes::characters::get,
        crate::routes::characters::create,
        crate::routes::characters::update,
        crate::routes::characters::remove,
        crate::routes::images::upload,
        crate::routes::images::remove,
    ),
    components(
        schemas(
            HealthResponse,
            CharacterDoc,
            UploadForm,
            MessageEnvelope,
            UploadEnvelope,
        )
    ),
    tags(
        (name = "health"),
        (name = "character"),
        (name = "image")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_character_routes() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        for p in ["/api/character/list", "/api/character/{id}", "/api/character/image/{name}", "/health"] {
            assert!(paths.iter().any(|k| k == p), "missing {p} in {paths:?}");
        }
    }
}
