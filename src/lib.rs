pub mod auth;
pub mod config;
pub mod dataset;
pub mod directory;
pub mod error;
pub mod handlers;
pub mod http;
pub mod middleware;
pub mod session;
pub mod sheets;
pub mod types;
