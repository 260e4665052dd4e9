// Utility functions module
pub mod auth;
pub mod config;
pub mod store;
