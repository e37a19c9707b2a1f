//! Flutter-facing bindings for the group portal core.

pub mod api;
