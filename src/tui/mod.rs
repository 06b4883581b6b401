pub mod app;
pub mod combobox;
pub mod document;
pub mod input;
pub mod render;
pub mod theme;

pub use app::{RunOptions, run};
