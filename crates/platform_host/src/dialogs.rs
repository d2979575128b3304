//! Modal dialog surface contracts.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

/// Host service for blocking modal requests (`alert` / `confirm` / `prompt` style).
///
/// The shell treats answers as user input, never as a correctness dependency: a dismissed or
/// unsupported dialog simply means "no answer".
pub trait DialogService {
    /// Shows an informational message.
    fn alert(&self, message: &str);

    /// Asks a yes/no question.
    fn confirm(&self, message: &str) -> bool;

    /// Asks for a line of text; `None` when the user cancels.
    fn prompt(&self, message: &str, default_value: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Dialog service that answers every request negatively.
pub struct NoopDialogService;

impl DialogService for NoopDialogService {
    fn alert(&self, _message: &str) {}

    fn confirm(&self, _message: &str) -> bool {
        false
    }

    fn prompt(&self, _message: &str, _default_value: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A dialog request recorded by [`ScriptedDialogService`].
pub enum DialogRequest {
    /// `alert(message)`.
    Alert(String),
    /// `confirm(message)`.
    Confirm(String),
    /// `prompt(message)`.
    Prompt(String),
}

#[derive(Debug, Clone, Default)]
/// Dialog service that replays queued answers and records every request.
pub struct ScriptedDialogService {
    confirmations: Rc<RefCell<VecDeque<bool>>>,
    prompt_answers: Rc<RefCell<VecDeque<Option<String>>>>,
    requests: Rc<RefCell<Vec<DialogRequest>>>,
}

impl ScriptedDialogService {
    /// Queues the answer for the next `prompt` call.
    pub fn push_prompt_answer(&self, answer: Option<&str>) {
        self.prompt_answers
            .borrow_mut()
            .push_back(answer.map(str::to_string));
    }

    /// Queues the answer for the next `confirm` call.
    pub fn push_confirmation(&self, answer: bool) {
        self.confirmations.borrow_mut().push_back(answer);
    }

    /// Returns every request seen so far.
    pub fn requests(&self) -> Vec<DialogRequest> {
        self.requests.borrow().clone()
    }
}

impl DialogService for ScriptedDialogService {
    fn alert(&self, message: &str) {
        self.requests
            .borrow_mut()
            .push(DialogRequest::Alert(message.to_string()));
    }

    fn confirm(&self, message: &str) -> bool {
        self.requests
            .borrow_mut()
            .push(DialogRequest::Confirm(message.to_string()));
        self.confirmations.borrow_mut().pop_front().unwrap_or(false)
    }

    fn prompt(&self, message: &str, _default_value: &str) -> Option<String> {
        self.requests
            .borrow_mut()
            .push(DialogRequest::Prompt(message.to_string()));
        self.prompt_answers.borrow_mut().pop_front().flatten()
    }
}
