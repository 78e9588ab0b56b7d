pub mod config;
pub mod entities;
pub mod init;
pub mod interfaces;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
