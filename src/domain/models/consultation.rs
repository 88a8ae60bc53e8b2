use serde::{Deserialize, Serialize};

use super::{ConsultationView, Query};

/// The result side of a consultation. Exactly one value is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "answer", rename_all = "snake_case")]
pub enum ConsultationState {
    #[default]
    Idle,
    Pending,
    Answered(String),
    /// Carries no detail: the cause of a failed call is never shown.
    Errored,
}

impl ConsultationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationState::Idle => "idle",
            ConsultationState::Pending => "pending",
            ConsultationState::Answered(_) => "answered",
            ConsultationState::Errored => "errored",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn answer(&self) -> Option<&str> {
        match self {
            Self::Answered(text) => Some(text),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConsultationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ticket for the single in-flight advisory call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    id: u64,
    question: String,
}

impl Submission {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The trimmed query text to send to the advisory service.
    pub fn question(&self) -> &str {
        &self.question
    }
}

/// How an advisory call resolved, as far as the widget is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Failure,
}

impl<E> From<Result<String, E>> for Outcome {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(text) => Outcome::Success(text),
            Err(_) => Outcome::Failure,
        }
    }
}

/// The consultant's state machine: query text plus result state.
///
/// Transitions:
/// - `Idle | Answered | Errored --begin--> Pending`, only for a non-blank query
/// - `Pending --complete(Success)--> Answered`
/// - `Pending --complete(Failure)--> Errored`
///
/// `begin` while pending is a no-op, so at most one call is ever in flight.
/// Completions carry the ticket they resolve; anything that does not match
/// the in-flight ticket is dropped.
#[derive(Debug, Clone, Default)]
pub struct Consultation {
    query: Query,
    state: ConsultationState,
    in_flight: Option<u64>,
    next_id: u64,
}

impl Consultation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn state(&self) -> &ConsultationState {
        &self.state
    }

    /// Replace the query text. Never touches the result state.
    pub fn update_query(&mut self, text: impl Into<String>) {
        self.query.set(text);
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
    }

    pub fn can_submit(&self) -> bool {
        !self.state.is_pending() && !self.query.is_blank()
    }

    pub fn is_submit_disabled(&self) -> bool {
        !self.can_submit()
    }

    /// Guarded submit. Clears any previous result and enters `Pending`.
    pub fn begin(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }

        self.next_id += 1;
        let id = self.next_id;
        self.in_flight = Some(id);
        self.state = ConsultationState::Pending;

        Some(Submission {
            id,
            question: self.query.trimmed().to_string(),
        })
    }

    /// Apply the resolution of `ticket`. Returns `false` for stale completions.
    pub fn complete(&mut self, ticket: &Submission, outcome: Outcome) -> bool {
        if !self.state.is_pending() || self.in_flight != Some(ticket.id) {
            return false;
        }

        self.in_flight = None;
        self.state = match outcome {
            Outcome::Success(text) => ConsultationState::Answered(text),
            Outcome::Failure => ConsultationState::Errored,
        };

        true
    }

    pub fn view(&self) -> ConsultationView<'_> {
        ConsultationView::of(&self.state)
    }
}
