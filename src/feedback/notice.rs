use std::collections::VecDeque;

const MAX_NOTICES: usize = 5;

/// Message shown to the user after an operation completes.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Bounded queue of notices, oldest first.
///
#[derive(Debug, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Notices::default()
    }

    /// Show a success message. Empty messages are ignored.
    ///
    pub fn success(&mut self, message: impl Into<String>) -> &mut Self {
        self.push(Notice::Success(message.into()))
    }

    /// Show an error message. Empty messages are ignored.
    ///
    pub fn error(&mut self, message: impl Into<String>) -> &mut Self {
        self.push(Notice::Error(message.into()))
    }

    fn push(&mut self, notice: Notice) -> &mut Self {
        if notice.text().trim().is_empty() {
            return self;
        }
        if self.queue.len() == MAX_NOTICES {
            self.queue.pop_front();
        }
        self.queue.push_back(notice);
        self
    }

    /// Return the most recent notice.
    ///
    pub fn latest(&self) -> Option<&Notice> {
        self.queue.back()
    }

    /// Dismiss the most recent notice.
    ///
    pub fn dismiss(&mut self) -> Option<Notice> {
        self.queue.pop_back()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.queue.clear();
        self
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.queue.iter()
    }
}
