pub mod api;
pub mod board;
pub mod config;
pub mod llm;
pub mod models;
pub mod prioritization;
pub mod store;
