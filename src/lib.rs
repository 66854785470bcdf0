// Library exports for biolink
// This allows integration tests and the binary to share modules

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod layout;
pub mod lol;
pub mod models;
pub mod page;
pub mod routes;
pub mod state;
pub mod storage;
pub mod theme;
