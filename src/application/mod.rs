//! Application layer: the command set the interactive shell dispatches on

pub mod error;
pub mod menu;

pub use error::{ApplicationError, ApplicationResult};
pub use menu::MenuChoice;
