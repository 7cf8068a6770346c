//==================================================
// File: interpreter/console.rs
//==================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: User-visible input and output for scripts
// Objective: Stdio console for the CLI and a shared in-memory console for
//            tests and embedders
//==================================================

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

pub trait Console {
    fn write(&mut self, text: &str);

    fn write_line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    /// Next input line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

#[derive(Debug, Default)]
struct Transcript {
    input: VecDeque<String>,
    output: String,
}

/// In-memory console. Clones share the same transcript, so a caller can keep
/// a handle and inspect output after the interpreter has consumed its copy.
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    inner: Rc<RefCell<Transcript>>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let console = Self::new();
        console
            .inner
            .borrow_mut()
            .input
            .extend(lines.into_iter().map(Into::into));
        console
    }

    pub fn output(&self) -> String {
        self.inner.borrow().output.clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.inner.borrow().output.lines().map(str::to_string).collect()
    }
}

impl Console for BufferConsole {
    fn write(&mut self, text: &str) {
        self.inner.borrow_mut().output.push_str(text);
    }

    fn read_line(&mut self) -> Option<String> {
        self.inner.borrow_mut().input.pop_front()
    }
}
