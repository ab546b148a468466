//! On-demand classification of operator-entered text.
//!
//! A submission runs in three steps so the request itself can run off the
//! UI task: [`ClassificationRequester::begin_submit`] validates the input and
//! marks the control busy, [`ClassificationRequester::send`] performs the
//! request, and [`ClassificationRequester::complete`] applies the outcome.

use super::{Ticket, TicketCounter};
use crate::api::{AnalyzeRequest, AnalyzeResponse, DashboardApi};
use crate::error::ApiError;
use crate::model::ClassificationResult;

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter complaint text.";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Analysis failed";
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed.";

/// What the result region shows. Result and error are never both visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequesterView {
    #[default]
    Idle,
    Result(ClassificationResult),
    Error(String),
}

impl RequesterView {
    #[must_use]
    pub const fn result(&self) -> Option<&ClassificationResult> {
        match self {
            Self::Result(result) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Why a submission was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// Input was empty after trimming; the error view shows why
    EmptyInput,
    /// A previous submission has not completed
    Busy,
}

impl std::fmt::Display for SubmitRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => f.write_str(EMPTY_INPUT_MESSAGE),
            Self::Busy => f.write_str("Analysis already in progress"),
        }
    }
}

/// An accepted submission waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub ticket: Ticket,
    pub request: AnalyzeRequest,
}

/// Edit applied to the input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Paste(String),
    Backspace,
    /// Delete the last word and any whitespace after it
    DeleteWord,
    Replace(String),
}

#[derive(Debug, Default)]
pub struct ClassificationRequester {
    input: String,
    busy: bool,
    view: RequesterView,
    tickets: TicketCounter,
}

impl ClassificationRequester {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn edit(&mut self, edit: InputEdit) {
        match edit {
            InputEdit::Insert(ch) => self.input.push(ch),
            InputEdit::Paste(text) => self.input.push_str(&text),
            InputEdit::Backspace => {
                self.input.pop();
            }
            InputEdit::DeleteWord => {
                let kept = self.input.trim_end().len();
                self.input.truncate(kept);
                let start = self
                    .input
                    .char_indices()
                    .rev()
                    .find(|(_, ch)| ch.is_whitespace())
                    .map_or(0, |(i, ch)| i + ch.len_utf8());
                self.input.truncate(start);
            }
            InputEdit::Replace(text) => self.input = text,
        }
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    #[must_use]
    pub const fn view(&self) -> &RequesterView {
        &self.view
    }

    /// Validate the input and start an attempt.
    ///
    /// Both views are hidden first. An empty input shows the validation
    /// message and sends nothing. A busy control rejects without touching
    /// the views.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitRejection> {
        if self.busy {
            tracing::debug!("submission rejected while busy");
            return Err(SubmitRejection::Busy);
        }
        self.view = RequesterView::Idle;

        let text = self.input.trim();
        if text.is_empty() {
            self.view = RequesterView::Error(EMPTY_INPUT_MESSAGE.to_string());
            return Err(SubmitRejection::EmptyInput);
        }

        let request = AnalyzeRequest::new(text);
        self.busy = true;
        let ticket = self.tickets.issue();
        tracing::info!(
            ticket = %ticket,
            chars = request.text.chars().count(),
            "submitting text for analysis"
        );
        Ok(PendingSubmission { ticket, request })
    }

    pub async fn send(
        api: &dyn DashboardApi,
        request: &AnalyzeRequest,
    ) -> Result<AnalyzeResponse, ApiError> {
        api.analyze(request).await
    }

    /// Apply the outcome of an attempt.
    ///
    /// The control goes idle whatever the outcome. The views are only
    /// updated if the attempt was not cleared in the meantime; returns
    /// whether they were.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<AnalyzeResponse, ApiError>) -> bool {
        if self.tickets.latest() == Some(ticket) {
            self.busy = false;
        }
        if !self.tickets.accept(ticket) {
            tracing::debug!(ticket = %ticket, "dropping analysis result after clear");
            return false;
        }
        self.view = match outcome {
            Ok(response) => RequesterView::Result(ClassificationResult::from(response)),
            Err(err) => {
                tracing::warn!(error = %err, "analysis request failed");
                RequesterView::Error(error_message(&err))
            }
        };
        true
    }

    /// Empty the input and hide both views. A request still in flight keeps
    /// the control busy, but its result will not be shown.
    pub fn clear(&mut self) {
        self.input.clear();
        self.view = RequesterView::Idle;
        self.tickets.invalidate();
    }
}

/// Message shown in the error view for a failed request.
#[must_use]
pub fn error_message(err: &ApiError) -> String {
    match err {
        ApiError::Transport { message } if !message.trim().is_empty() => message.clone(),
        ApiError::Transport { .. } => REQUEST_FAILED_MESSAGE.to_string(),
        _ => err
            .detail()
            .map_or_else(|| ANALYSIS_FAILED_MESSAGE.to_string(), str::to_string),
    }
}
