//! Portal action services.
//!
//! # Responsibility
//! - Turn one user intent into one read-modify-write cycle on a store.
//! - Keep view/FFI layers decoupled from file layout details.

pub mod knowledge_service;
pub mod training_service;
