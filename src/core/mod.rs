//! Core layer - configuration, database, errors and HTTP plumbing shared by all features

pub mod config;
pub mod database;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod openapi;
