//! Console for script output and `input()`.
//!
//! Output goes to one of three destinations:
//! - stdout plus stdin (the CLI default)
//! - an in-memory buffer with scripted input lines (tests, embedding)
//! - nowhere
//!
//! Enum dispatch keeps the per-`print` call free of vtable indirection.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Writes to the process stdout and reads lines from stdin.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        println!("{msg}");
    }

    /// Print without a newline. Flushes so prompts show before `input()`.
    pub fn print(&self, msg: &str) {
        let mut out = io::stdout().lock();
        // a closed stdout is not a script error
        let _ = out.write_all(msg.as_bytes()).and_then(|()| out.flush());
    }

    /// Next line of stdin without its line terminator, `None` at end of input.
    pub fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(strip_newline(line)),
        }
    }

    /// Stdout keeps nothing.
    pub fn get_output(&self) -> String {
        String::new()
    }

    pub fn clear(&self) {}
}

/// Captures output in memory and serves `input()` from queued lines.
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
    input: Mutex<VecDeque<String>>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler {
            buffer: Mutex::new(String::new()),
            input: Mutex::new(VecDeque::new()),
        }
    }

    /// Handler whose `input()` calls return `lines` in order.
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let handler = Self::new();
        handler.input.lock().extend(lines.into_iter().map(Into::into));
        handler
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn print(&self, msg: &str) {
        self.buffer.lock().push_str(msg);
    }

    pub fn read_line(&self) -> Option<String> {
        self.input.lock().pop_front()
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    /// Discards output; `input()` sees end of input.
    Silent,
}

impl PrintHandlerImpl {
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    pub fn print(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.print(msg),
            Self::Buffer(h) => h.print(msg),
            Self::Silent => {}
        }
    }

    pub fn read_line(&self) -> Option<String> {
        match self {
            Self::Stdout(h) => h.read_line(),
            Self::Buffer(h) => h.read_line(),
            Self::Silent => None,
        }
    }

    /// Captured output. Empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Stdout(h) => h.get_output(),
            Self::Buffer(h) => h.get_output(),
            Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        match self {
            Self::Stdout(h) => h.clear(),
            Self::Buffer(h) => h.clear(),
            Self::Silent => {}
        }
    }
}

/// Handler shared between the interpreter and whoever reads its output.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

/// Buffer handler with scripted `input()` lines.
pub fn scripted_handler<I, S>(lines: I) -> SharedPrintHandler
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::with_input(
        lines,
    )))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

fn strip_newline(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

#[cfg(test)]
mod tests;
