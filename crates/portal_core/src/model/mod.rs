//! Portal domain models.
//!
//! # Responsibility
//! - Define the records persisted in the portal's JSON stores.
//! - Keep pure record-level rules (id assignment, participant uniqueness,
//!   field merging) next to the data they guard.
//!
//! # Invariants
//! - Every stored record carries a numeric id unique within its collection.
//! - Mutation is whole-record replacement by id; no partial on-disk format.

pub mod document;
pub mod training;
