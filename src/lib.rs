pub mod api;
pub mod canvas;
pub mod config;
pub mod data;
pub mod error;
pub mod logic;
pub mod models;
pub mod storage;
