#![warn(clippy::unwrap_used)]

pub mod rest;
pub mod server;

pub use server::{build_router, ApiServer};
