//! Application services layer.

pub mod cache;
pub mod error;
pub mod payloads;
pub mod repos;
pub mod transform;
