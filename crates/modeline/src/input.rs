//! Input-loop coordinator.
//!
//! Every keypress goes to exactly one consumer, chosen by `InputMode`: the
//! plain line editor (optionally navigating history), the multi-line
//! collector, or the modal vim editor. The consumers know nothing about
//! each other; switching between them happens only here.

use tracing::{debug, info, warn};

use crate::config::{EditorConfig, MultilineConfig};
use crate::editor::{EditorSession, LineBuffer, ModalExit};
use crate::history::History;
use crate::key::{KeyPress, NamedKey};
use crate::multiline::MultiLineCollector;
use crate::notice::Notice;
use crate::vim::VimMode;

/// Prompt shown while collecting multi-line input.
pub const CONTINUATION_PROMPT: &str = "... ";

/// Which consumer owns the keypress stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Plain line editing.
    Plain,
    /// Browsing history; `offset` counts back from the newest entry.
    Navigating { offset: usize },
    /// Gathering lines until a blank line is submitted.
    Collecting(MultiLineCollector),
    /// The vim editor owns the keys.
    Modal,
}

/// What the host should do after a keypress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Nothing to act on beyond redrawing.
    None,
    /// A finished line (or joined multi-line text) was submitted.
    Submitted(String),
    /// Input was cancelled; nothing was submitted.
    Cancelled,
    /// A transient message to show the user.
    Notice(Notice),
    /// The user asked to leave the program.
    Exit,
}

/// What the redraw engine should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    /// The plain prompt line.
    Line {
        prompt: &'a str,
        text: &'a [char],
        cursor: usize,
    },
    /// The vim editor's buffer.
    Modal {
        prompt: &'a str,
        mode: &'a VimMode,
        text: &'a [char],
        cursor: usize,
        selection: Option<(usize, usize)>,
    },
    /// The `:` command line.
    Command { input: &'a str },
}

pub struct InputCoordinator {
    mode: InputMode,
    line: LineBuffer,
    history: History,
    session: Option<EditorSession>,
    editor: EditorConfig,
    multiline: MultilineConfig,
    redraw: bool,
}

impl InputCoordinator {
    pub fn new(history: History, editor: EditorConfig, multiline: MultilineConfig) -> Self {
        Self {
            mode: InputMode::Plain,
            line: LineBuffer::new(),
            history,
            session: None,
            editor,
            multiline,
            redraw: true,
        }
    }

    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    pub fn is_modal(&self) -> bool {
        self.mode == InputMode::Modal
    }

    /// The host's plain input line.
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// The modal editor, once it has been enabled at least once.
    pub fn session(&self) -> Option<&EditorSession> {
        self.session.as_ref()
    }

    /// Returns true (once) if anything changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    pub fn view(&self) -> View<'_> {
        if let (InputMode::Modal, Some(session)) = (&self.mode, &self.session) {
            if let Some(input) = session.command_input() {
                return View::Command { input };
            }
            return View::Modal {
                prompt: &self.editor.prompt,
                mode: session.mode(),
                text: session.buffer().chars(),
                cursor: session.cursor(),
                selection: session.selection(),
            };
        }

        let prompt = match self.mode {
            InputMode::Collecting(_) => CONTINUATION_PROMPT,
            _ => self.editor.prompt.as_str(),
        };
        View::Line {
            prompt,
            text: self.line.chars(),
            cursor: self.line.cursor(),
        }
    }

    /// Turn modal editing on or off.
    ///
    /// Enabling copies the plain line into the editor; disabling leaves the
    /// plain line exactly as it was before modal editing started.
    pub fn set_modal(&mut self, enabled: bool) -> InputOutcome {
        self.redraw = true;

        if !enabled {
            if self.mode == InputMode::Modal {
                if let Some(session) = self.session.as_mut() {
                    session.disable();
                }
                self.mode = InputMode::Plain;
            }
            return InputOutcome::None;
        }

        match self.mode {
            InputMode::Modal => InputOutcome::None,
            InputMode::Collecting(_) => InputOutcome::Notice(Notice::error(
                "finish multi-line input before switching to vim mode",
            )),
            InputMode::Plain | InputMode::Navigating { .. } => {
                let session = self.session.get_or_insert_with(EditorSession::new);
                session.enable(&self.line.text(), self.line.cursor());
                self.mode = InputMode::Modal;
                InputOutcome::None
            }
        }
    }

    /// Feed one keypress to the active consumer.
    pub fn handle(&mut self, key: &KeyPress) -> InputOutcome {
        if key.is_malformed() {
            return InputOutcome::None;
        }
        self.redraw = true;

        if self.mode == InputMode::Modal {
            return self.handle_modal(key);
        }
        self.handle_plain(key)
    }

    fn handle_modal(&mut self, key: &KeyPress) -> InputOutcome {
        let Some(session) = self.session.as_mut().filter(|s| s.is_enabled()) else {
            self.mode = InputMode::Plain;
            return self.handle_plain(key);
        };

        let handled = session.handle(key);
        let notice = session.take_notice();

        match session.take_exit() {
            Some(ModalExit::Commit(text)) => {
                // A commit goes through the same path as a typed line.
                self.mode = InputMode::Plain;
                self.line = LineBuffer::from_text(&text);
                let outcome = self.submit();
                if self.editor.stay_in_vim && self.mode == InputMode::Plain {
                    self.set_modal(true);
                }
                outcome
            }
            Some(ModalExit::Cancel) => {
                self.mode = InputMode::Plain;
                InputOutcome::Cancelled
            }
            None => {
                if !handled {
                    debug!(target: "input.modal", key = %key.describe(), "key not handled by editor");
                }
                notice.map(InputOutcome::Notice).unwrap_or(InputOutcome::None)
            }
        }
    }

    fn handle_plain(&mut self, key: &KeyPress) -> InputOutcome {
        let collecting = matches!(self.mode, InputMode::Collecting(_));

        if key.is_ctrl_char('c') {
            if collecting {
                info!(target: "input.multiline", "multi-line input cancelled");
                self.mode = InputMode::Plain;
                self.line.clear();
                return InputOutcome::Cancelled;
            }
            if self.line.is_empty() {
                return InputOutcome::Exit;
            }
            self.mode = InputMode::Plain;
            self.line.clear();
            return InputOutcome::Cancelled;
        }

        if key.is_ctrl_char('d') {
            if self.line.is_empty() && !collecting {
                return InputOutcome::Exit;
            }
            self.line.delete_forward();
            return InputOutcome::None;
        }

        if let Some(c) = key.printable() {
            self.line.insert_char(c);
            self.stop_navigating();
            return InputOutcome::None;
        }

        if key.ctrl || key.meta {
            return InputOutcome::None;
        }

        match key.key {
            Some(NamedKey::Enter) => return self.submit(),
            Some(NamedKey::Backspace) => {
                self.line.backspace();
                self.stop_navigating();
            }
            Some(NamedKey::Delete) => {
                self.line.delete_forward();
                self.stop_navigating();
            }
            Some(NamedKey::Left) => self.line.move_left(),
            Some(NamedKey::Right) => self.line.move_right(),
            Some(NamedKey::Home) => self.line.set_cursor(0),
            Some(NamedKey::End) => self.line.set_cursor(self.line.len()),
            Some(NamedKey::Up) if !collecting => self.history_up(),
            Some(NamedKey::Down) if !collecting => self.history_down(),
            Some(NamedKey::Escape) if self.editor.escape_enters_vim && !collecting => {
                return self.set_modal(true);
            }
            _ => {}
        }
        InputOutcome::None
    }

    fn stop_navigating(&mut self) {
        if let InputMode::Navigating { .. } = self.mode {
            self.mode = InputMode::Plain;
        }
    }

    fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.mode {
            InputMode::Navigating { offset } => offset + 1,
            _ => 0,
        };
        let offset = next.min(self.history.len() - 1);
        if let Some(text) = self.history.entry_back(offset) {
            self.line = LineBuffer::from_text(text);
            self.mode = InputMode::Navigating { offset };
        }
    }

    fn history_down(&mut self) {
        let InputMode::Navigating { offset } = self.mode else {
            return;
        };
        if offset == 0 {
            // Past the newest entry: back to an empty prompt.
            self.mode = InputMode::Plain;
            self.line.clear();
            return;
        }
        let offset = offset - 1;
        if let Some(text) = self.history.entry_back(offset) {
            self.line = LineBuffer::from_text(text);
            self.mode = InputMode::Navigating { offset };
        }
    }

    /// The host's submission path for the current plain line.
    fn submit(&mut self) -> InputOutcome {
        let text = self.line.text();
        self.line.clear();

        match std::mem::replace(&mut self.mode, InputMode::Plain) {
            InputMode::Collecting(mut collector) => {
                if text.is_empty() {
                    if collector.is_empty() {
                        return InputOutcome::None;
                    }
                    info!(target: "input.multiline", lines = collector.len(), "multi-line input finished");
                    return self.commit(collector.finish());
                }
                match collector.push(&text) {
                    Ok(()) => {
                        self.mode = InputMode::Collecting(collector);
                        InputOutcome::None
                    }
                    Err(err) => {
                        warn!(target: "input.multiline", %err, "multi-line input aborted");
                        InputOutcome::Notice(Notice::error(err.to_string()))
                    }
                }
            }
            _ if text == self.multiline.trigger => {
                info!(target: "input.multiline", "multi-line input started");
                self.mode = InputMode::Collecting(MultiLineCollector::new(
                    self.multiline.max_lines,
                    self.multiline.max_chars,
                ));
                InputOutcome::Notice(Notice::info(
                    "multi-line input: submit an empty line to send",
                ))
            }
            _ if text.trim().is_empty() => InputOutcome::None,
            _ => self.commit(text),
        }
    }

    fn commit(&mut self, text: String) -> InputOutcome {
        self.history.push(&text);
        info!(target: "input.submit", chars = text.chars().count(), "line submitted");
        InputOutcome::Submitted(text)
    }
}
