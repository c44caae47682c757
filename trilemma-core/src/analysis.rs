//! Request lifecycle for the trade-off analysis.
//!
//! ```text
//!   Idle ──submit──▶ Loading ──ok──▶ Success ─┐
//!                      │  ▲                    │
//!                      └──┼──err──▶ Error ─────┤
//!                         └───────submit───────┘
//! ```
//!
//! `submit` never performs I/O: it hands back a [`Request`] which the caller
//! dispatches to a [`TextGenerator`] out of band, then feeds the resulting
//! [`Outcome`] to [`Analysis::resolve`].

use derive_more::Display;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{error::GenerateError, generate::TextGenerator, prompt::build_prompt};

/// Shown when the service succeeds with empty content.
pub const NO_ANALYSIS: &str = "No analysis generated.";
/// Shown for every service failure; the cause is only logged.
pub const FAILURE_MESSAGE: &str = "Could not generate analysis. Please ensure API Key is valid.";

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisStatus {
    #[display(fmt = "IDLE")]
    Idle,
    #[display(fmt = "LOADING")]
    Loading,
    #[display(fmt = "SUCCESS")]
    Success,
    #[display(fmt = "ERROR")]
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisState {
    #[default]
    Idle,
    Loading { ticket: u64 },
    Success { text: String },
    Error { message: String },
}

impl AnalysisState {
    pub fn status(&self) -> AnalysisStatus {
        match self {
            AnalysisState::Idle => AnalysisStatus::Idle,
            AnalysisState::Loading { .. } => AnalysisStatus::Loading,
            AnalysisState::Success { .. } => AnalysisStatus::Success,
            AnalysisState::Error { .. } => AnalysisStatus::Error,
        }
    }
    /// Text to display; empty while idle or loading.
    pub fn result_text(&self) -> &str {
        match self {
            AnalysisState::Idle | AnalysisState::Loading { .. } => "",
            AnalysisState::Success { text } => text,
            AnalysisState::Error { message } => message,
        }
    }
}

/// A dispatched-but-unresolved analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub ticket: u64,
    pub prompt: String,
}

impl Request {
    /// Run the request against `generator`. Consumes no shell state, so the
    /// caller can keep handling input while this is pending.
    pub async fn dispatch<G: TextGenerator + ?Sized>(self, generator: &G) -> Outcome {
        let result = generator.generate(&self.prompt).await;
        Outcome { ticket: self.ticket, result }
    }
}

#[derive(Debug)]
pub struct Outcome {
    pub ticket: u64,
    pub result: Result<String, GenerateError>,
}

#[derive(Debug, Clone, Default)]
pub struct Analysis {
    context: String,
    state: AnalysisState,
    next_ticket: u64,
}

impl Analysis {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn context(&self) -> &str {
        &self.context
    }
    /// Editing the context is allowed in every state, including while loading.
    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = context.into();
    }
    pub fn state(&self) -> &AnalysisState {
        &self.state
    }
    pub fn status(&self) -> AnalysisStatus {
        self.state.status()
    }
    pub fn result_text(&self) -> &str {
        self.state.result_text()
    }
    pub fn is_loading(&self) -> bool {
        matches!(self.state, AnalysisState::Loading { .. })
    }
    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && !self.context.trim().is_empty()
    }

    /// Enter `Loading` and return the request to dispatch, or `None` (state
    /// unchanged) when the context is blank or a request is already in flight.
    pub fn submit(&mut self) -> Option<Request> {
        if self.is_loading() {
            warn!("analysis already in flight; ignoring submit");
            return None;
        }
        if self.context.trim().is_empty() {
            return None;
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.state = AnalysisState::Loading { ticket };
        info!("analysis {} submitted", ticket);
        Some(Request { ticket, prompt: build_prompt(&self.context) })
    }

    /// Apply a finished request. Returns `false` (and changes nothing) if the
    /// outcome doesn't belong to the request currently loading.
    pub fn resolve(&mut self, outcome: Outcome) -> bool {
        let Outcome { ticket, result } = outcome;
        match self.state {
            AnalysisState::Loading { ticket: current } if current == ticket => {}
            _ => {
                warn!("ignoring outcome for analysis {} in state {}", ticket, self.status());
                return false;
            }
        }
        self.state = match result {
            Ok(text) if text.trim().is_empty() => {
                info!("analysis {} returned no content", ticket);
                AnalysisState::Success { text: NO_ANALYSIS.to_string() }
            }
            Ok(text) => {
                info!("analysis {} succeeded ({} chars)", ticket, text.len());
                AnalysisState::Success { text }
            }
            Err(e) => {
                error!("analysis {} failed: {}", ticket, e);
                AnalysisState::Error { message: FAILURE_MESSAGE.to_string() }
            }
        };
        true
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use test_log::test;

    /// Replays canned results and records every prompt it sees.
    #[derive(Clone, Default)]
    pub(crate) struct Scripted {
        pub prompts: Arc<Mutex<Vec<String>>>,
        pub fail: bool,
        pub reply: String,
    }

    impl Scripted {
        pub fn ok(reply: &str) -> Self {
            Scripted { reply: reply.to_string(), ..Default::default() }
        }
        pub fn failing() -> Self {
            Scripted { fail: true, ..Default::default() }
        }
        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                Err(GenerateError::Status { status: 403, body: "API key not valid".to_string() })
            } else {
                Ok(self.reply.clone())
            }
        }
    }

    fn ok(ticket: u64, text: &str) -> Outcome {
        Outcome { ticket, result: Ok(text.to_string()) }
    }

    fn err(ticket: u64) -> Outcome {
        Outcome { ticket, result: Err(GenerateError::Malformed("no candidates".to_string())) }
    }

    #[test]
    fn blank_context_is_a_noop() {
        let mut a = Analysis::new();
        assert_eq!(a.submit(), None);
        a.set_context("   \n\t");
        assert!(!a.can_submit());
        assert_eq!(a.submit(), None);
        assert_eq!(a.state(), &AnalysisState::Idle);
        assert_eq!(a.result_text(), "");
    }

    #[test]
    fn submit_then_succeed() {
        let mut a = Analysis::new();
        a.set_context("Cooking a gourmet dinner");
        assert!(a.can_submit());
        let req = a.submit().unwrap();
        assert_eq!(a.status(), AnalysisStatus::Loading);
        assert!(!a.can_submit());
        assert!(req.prompt.contains("Cooking a gourmet dinner"));
        assert!(a.resolve(ok(req.ticket, "Hello")));
        assert_eq!(a.state(), &AnalysisState::Success { text: "Hello".to_string() });
        assert_eq!(a.result_text(), "Hello");
    }

    #[test]
    fn submit_then_fail() {
        let mut a = Analysis::new();
        a.set_context("Developing a new mobile game");
        let req = a.submit().unwrap();
        assert!(a.resolve(err(req.ticket)));
        assert_eq!(a.status(), AnalysisStatus::Error);
        assert_eq!(a.result_text(), FAILURE_MESSAGE);
    }

    #[test]
    fn empty_reply_falls_back() {
        let mut a = Analysis::new();
        a.set_context("x");
        let req = a.submit().unwrap();
        a.resolve(ok(req.ticket, ""));
        assert_eq!(a.result_text(), NO_ANALYSIS);
        assert_eq!(a.status(), AnalysisStatus::Success);
    }

    #[test]
    fn no_resubmit_while_loading() {
        let mut a = Analysis::new();
        a.set_context("x");
        let req = a.submit().unwrap();
        assert_eq!(a.submit(), None);
        assert_eq!(a.state(), &AnalysisState::Loading { ticket: req.ticket });
    }

    #[test]
    fn resubmit_clears_previous_result() {
        let mut a = Analysis::new();
        a.set_context("x");
        let first = a.submit().unwrap();
        a.resolve(ok(first.ticket, "first"));
        let second = a.submit().unwrap();
        assert_ne!(first.ticket, second.ticket);
        assert_eq!(a.result_text(), "");
        assert_eq!(a.status(), AnalysisStatus::Loading);
        a.resolve(err(second.ticket));
        let third = a.submit().unwrap();
        assert_eq!(a.result_text(), "");
        a.resolve(ok(third.ticket, "third"));
        assert_eq!(a.result_text(), "third");
    }

    #[test]
    fn stale_outcomes_are_ignored() {
        let mut a = Analysis::new();
        a.set_context("x");
        // Nothing in flight
        assert!(!a.resolve(ok(0, "early")));
        assert_eq!(a.state(), &AnalysisState::Idle);

        let req = a.submit().unwrap();
        assert!(!a.resolve(ok(req.ticket + 1, "wrong ticket")));
        assert!(a.is_loading());
        assert!(a.resolve(ok(req.ticket, "right")));
        // Already resolved
        assert!(!a.resolve(err(req.ticket)));
        assert_eq!(a.result_text(), "right");
    }

    #[test]
    fn status_strings() {
        assert_eq!(AnalysisStatus::Loading.to_string(), "LOADING");
        assert_eq!(serde_json::to_string(&AnalysisStatus::Success).unwrap(), "\"SUCCESS\"");
        let json = serde_json::to_value(AnalysisState::Success { text: "hi".to_string() }).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "SUCCESS", "text": "hi" }));
        // Same spelling as the bare status
        let json = serde_json::to_value(AnalysisState::Loading { ticket: 3 }).unwrap();
        assert_eq!(json["status"], serde_json::to_value(AnalysisStatus::Loading).unwrap());
        assert_eq!(serde_json::to_value(AnalysisState::Idle).unwrap(), serde_json::json!({ "status": "IDLE" }));
    }

    #[test(tokio::test)]
    async fn dispatch_reaches_generator() {
        let generator = Scripted::ok("Hello");
        let mut a = Analysis::new();
        a.set_context("Renovating a historic house");
        let req = a.submit().unwrap();
        let prompt = req.prompt.clone();
        let outcome = req.dispatch(&generator).await;
        assert!(a.resolve(outcome));
        assert_eq!(a.result_text(), "Hello");
        assert_eq!(*generator.prompts.lock().unwrap(), vec![prompt]);
    }

    #[test(tokio::test)]
    async fn dispatch_failure_is_generic() {
        let generator = Scripted::failing();
        let mut a = Analysis::new();
        a.set_context("x");
        let outcome = a.submit().unwrap().dispatch(&generator).await;
        assert!(outcome.result.is_err());
        a.resolve(outcome);
        assert_eq!(a.state(), &AnalysisState::Error { message: FAILURE_MESSAGE.to_string() });
        assert_eq!(generator.calls(), 1);
    }
}
