//! Command implementations for vsext-cli

pub mod export;
pub mod import;
pub mod list;

pub use export::run_export;
pub use import::run_import;
pub use list::run_list;
