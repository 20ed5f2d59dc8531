//! External process execution.

pub mod command;

pub use command::{
    display_command, execute, execute_bash, is_installed, CommandOptions, CommandResult,
};
