//! Core UserHive library (directory client, session, mirror, config).

pub mod api;
pub mod config;
pub mod directory;
pub mod logging;
pub mod mirror;
pub mod models;
pub mod session;
