use std::sync::Arc;

use service::character::CharacterService;
use service::image::ImageService;

/// Shared handler state; both services are behind `Arc` so cloning per request is cheap.
#[derive(Clone)]
pub struct ServerState {
    pub characters: Arc<CharacterService>,
    pub images: Arc<ImageService>,
}

impl ServerState {
    pub fn new(characters: CharacterService, images: ImageService) -> Self {
        Self { characters: Arc::new(characters), images: Arc::new(images) }
    }
}
