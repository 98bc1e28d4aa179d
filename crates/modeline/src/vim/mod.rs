//! Vim keybinding module for the prompt line.
//!
//! This module turns keypresses into vim commands for the modal editor.
//!
//! # Architecture
//!
//! - `VimMode`: The current editing mode (Normal, Insert, Visual, Command)
//! - `VimCommand`: High-level vim commands that can be executed
//! - `VimHandler`: Processes keypresses and returns commands to execute
//! - `ExCommand`: The commands understood on the `:` command line
//!
//! # Usage
//!
//! ```ignore
//! let mut handler = VimHandler::new();
//! let command = handler.handle_key(&key, &mode);
//! match command {
//!     VimCommand::Move(motion) => buffer.set_cursor(motion.target(&buffer)),
//!     VimCommand::EnterInsert => mode = VimMode::Insert,
//!     // ...
//! }
//! ```

mod command;
mod handler;
mod mode;

pub use command::{CommandError, ExCommand, Motion, VimCommand};
pub use handler::VimHandler;
pub use mode::VimMode;
