#![allow(dead_code)]

use scaffold::prompt::Prompter;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::Path;

/// One scripted reaction to a prompt.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Accept whatever default the prompt offers.
    Default,
    Text(String),
    Choice(usize),
    /// Simulate a broken input channel.
    Fail,
}

/// Prompter that answers from a script and records every label it was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    replies: RefCell<VecDeque<Reply>>,
    pub asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self { replies: RefCell::new(replies.into()), asked: RefCell::new(Vec::new()) }
    }

    /// Accepts every default.
    pub fn defaults() -> Self {
        Self::default()
    }

    fn next(&self, label: &str) -> Reply {
        self.asked.borrow_mut().push(label.to_string());
        self.replies.borrow_mut().pop_front().unwrap_or(Reply::Default)
    }

    fn answer_text(&self, label: &str, default: &str) -> io::Result<String> {
        match self.next(label) {
            Reply::Default => Ok(default.to_string()),
            Reply::Text(text) => Ok(text),
            Reply::Choice(index) => Ok(index.to_string()),
            Reply::Fail => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed")),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn text(&self, label: &str, default: &str) -> io::Result<String> {
        self.answer_text(label, default)
    }

    fn number(&self, label: &str, default: &str) -> io::Result<String> {
        self.answer_text(label, default)
    }

    fn yes_no(&self, label: &str, default: &str) -> io::Result<String> {
        self.answer_text(label, default)
    }

    fn select(&self, label: &str, _items: &[String], default: usize) -> io::Result<usize> {
        match self.next(label) {
            Reply::Default => Ok(default),
            Reply::Choice(index) => Ok(index),
            Reply::Text(text) => text
                .parse()
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "not an index")),
            Reply::Fail => Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted")),
        }
    }
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}
