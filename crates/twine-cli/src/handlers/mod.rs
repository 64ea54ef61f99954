#![deny(clippy::all, clippy::pedantic)]

pub mod health;
pub mod payloads;
