pub mod config;
pub mod error;
pub mod favorites;
pub mod genre;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod storage;
