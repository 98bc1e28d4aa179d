//! Modal line editor: buffer, register and the session tying them to the
//! vim key handler.

mod buffer;
mod register;
mod session;

pub use buffer::{is_word_char, LineBuffer};
pub use register::Register;
pub use session::{EditorSession, ModalExit};
