//! Service layer providing the character CRUD and image storage operations.
//! - Separates business logic from data access and from the object store.
//! - Reuses entity definitions in the `models` crate.
//! - Store and storage seams are traits so tests can swap in memory fakes.

pub mod errors;
pub mod runtime;
pub mod character;
pub mod image;
#[cfg(test)]
pub mod test_support;
