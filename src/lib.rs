pub mod app;
pub mod config;
pub mod error;
pub mod font;
pub mod geometry;
pub mod input;
pub mod models;
pub mod render;
pub mod session;
pub mod ui;
pub mod utils;

pub use error::{AnnotateError, Result};
