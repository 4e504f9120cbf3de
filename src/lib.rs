/*
 * Responsibility
 * - module tree of the drinks API (the binary in main.rs only calls app::run)
 * - exposed as a library so integration tests can build the router
 */
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod repos;
pub mod services;
pub mod state;
