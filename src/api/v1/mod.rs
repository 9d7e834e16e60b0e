/*
 * Responsibility
 * - v1 entry point (re-export of routes())
 */
pub mod dto;
pub mod handlers;
mod routes;

pub use routes::routes;
