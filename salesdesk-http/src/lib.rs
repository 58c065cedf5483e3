pub mod dto;
pub mod handlers;
pub mod openapi;
pub mod server;

pub use server::{build_router, build_state, serve, ServerConfig};
