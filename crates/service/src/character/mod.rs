//! Character module: three-layer architecture (domain, repository, service).

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::Character;
pub use repository::CharacterStore;
pub use service::CharacterService;
