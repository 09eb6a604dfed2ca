//! Gazette kernel library.
//!
//! Exposes the router, services and store seam so integration tests can
//! drive the service without a network listener. The `gazette` binary is
//! the entry point for running the server.

pub mod config;
pub mod db;
pub mod error;
pub mod gate;
pub mod models;
pub mod query;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
