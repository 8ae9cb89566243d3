//! Print handler for configurable output.
//!
//! `print` statements always append to the interpreter's log; the handler
//! decides where the text goes besides that:
//! - `Stdout`: the terminal (default)
//! - `Buffer`: captured, for tests and embedding
//! - `Silent`: discarded
//!
//! Uses enum dispatch instead of trait objects.

use std::cell::RefCell;
use std::io::Write as _;
use std::rc::Rc;

/// Terminal output.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    fn write(text: &str, newline: bool) {
        let mut out = std::io::stdout().lock();
        // A closed stdout is not a script error
        let _ = out.write_all(text.as_bytes());
        if newline {
            let _ = out.write_all(b"\n");
        }
        // Prompts must show up before `console.input` blocks
        let _ = out.flush();
    }
}

/// In-memory capture of everything printed.
#[derive(Default)]
pub struct BufferPrintHandler {
    text: RefCell<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler::default()
    }

    fn push(&self, text: &str, newline: bool) {
        let mut captured = self.text.borrow_mut();
        captured.push_str(text);
        if newline {
            captured.push('\n');
        }
    }

    pub fn contents(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn reset(&self) {
        self.text.borrow_mut().clear();
    }
}

pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    fn emit(&self, text: &str, newline: bool) {
        match self {
            Self::Stdout(_) => StdoutPrintHandler::write(text, newline),
            Self::Buffer(buffer) => buffer.push(text, newline),
            Self::Silent => {}
        }
    }

    /// Output one `print` line.
    pub fn println(&self, text: &str) {
        self.emit(text, true);
    }

    /// Output text with no line break, e.g. an input prompt.
    pub fn print(&self, text: &str) {
        self.emit(text, false);
    }

    /// Captured text; always empty unless this is a `Buffer`.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.contents(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(buffer) = self {
            buffer.reset();
        }
    }
}

/// Handlers are shared between the interpreter and whoever configured it.
pub type SharedPrintHandler = Rc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Rc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Rc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Rc::new(PrintHandlerImpl::Silent)
}
