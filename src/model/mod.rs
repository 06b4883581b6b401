pub mod config;
pub mod option;
pub mod selection;

pub use config::*;
pub use option::*;
pub use selection::*;
