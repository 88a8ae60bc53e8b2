use std::sync::Arc;

use futures_util::FutureExt;
use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

use crate::application::AdvisoryService;
use crate::domain::{
    Consultation, ConsultationState, ConsultationView, DomainError, Outcome, Query, Submission,
};

type AdvisoryResult = Result<String, DomainError>;

struct InFlight {
    ticket: Submission,
    handle: JoinHandle<AdvisoryResult>,
}

/// Drives a [`Consultation`] against an [`AdvisoryService`].
///
/// `submit` spawns the advisory call on the current tokio runtime and returns
/// right away, so the caller's event loop stays responsive while the state is
/// `Pending`. The resolution is applied by `next_completion` (awaiting) or
/// `poll_completion` (non-blocking).
///
/// There is no cancellation: dropping the widget detaches the in-flight call
/// and its late result is discarded.
pub struct ConsultationWidget {
    consultation: Consultation,
    advisor: Arc<dyn AdvisoryService>,
    in_flight: Option<InFlight>,
}

impl ConsultationWidget {
    pub fn new(advisor: Arc<dyn AdvisoryService>) -> Self {
        Self {
            consultation: Consultation::new(),
            advisor,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &ConsultationState {
        self.consultation.state()
    }

    pub fn query(&self) -> &Query {
        self.consultation.query()
    }

    pub fn view(&self) -> ConsultationView<'_> {
        self.consultation.view()
    }

    pub fn is_pending(&self) -> bool {
        self.consultation.state().is_pending()
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.consultation.is_submit_disabled()
    }

    pub fn backend_name(&self) -> &str {
        self.advisor.backend_name()
    }

    pub fn update_query(&mut self, text: impl Into<String>) {
        self.consultation.update_query(text);
    }

    pub fn push_char(&mut self, c: char) {
        self.consultation.push_char(c);
    }

    pub fn pop_char(&mut self) {
        self.consultation.pop_char();
    }

    /// Start a consultation with the current query.
    ///
    /// Returns `false` without calling the service when the query is blank or
    /// a consultation is already pending. Must be called within a tokio runtime.
    pub fn submit(&mut self) -> bool {
        let Some(ticket) = self.consultation.begin() else {
            debug!(
                "Submission ignored (state={}, blank={})",
                self.consultation.state(),
                self.consultation.query().is_blank()
            );
            return false;
        };

        debug!(
            "Consultation #{} sent to {}",
            ticket.id(),
            self.advisor.backend_name()
        );

        let advisor = Arc::clone(&self.advisor);
        let question = ticket.question().to_string();
        let handle = tokio::spawn(async move { advisor.consult(&question).await });

        self.in_flight = Some(InFlight { ticket, handle });
        true
    }

    /// Wait for the pending consultation to resolve and apply it.
    ///
    /// Returns immediately with the current state when nothing is pending.
    /// Cancel safe: dropping the future leaves the call in flight.
    pub async fn next_completion(&mut self) -> &ConsultationState {
        if let Some(in_flight) = self.in_flight.as_mut() {
            let joined = (&mut in_flight.handle).await;
            self.finish(joined);
        }
        self.consultation.state()
    }

    /// Apply the pending consultation if it has already resolved.
    pub fn poll_completion(&mut self) -> bool {
        let joined = match self.in_flight.as_mut() {
            Some(in_flight) if in_flight.handle.is_finished() => {
                (&mut in_flight.handle).now_or_never()
            }
            _ => None,
        };

        match joined {
            Some(joined) => {
                self.finish(joined);
                true
            }
            None => false,
        }
    }

    /// Replace the query, submit it and wait for the answer.
    ///
    /// When the submission is rejected (blank query or a consultation already
    /// pending) the current state is returned without waiting.
    pub async fn ask(&mut self, text: impl Into<String>) -> &ConsultationState {
        self.update_query(text);
        if !self.submit() {
            return self.consultation.state();
        }
        self.next_completion().await
    }

    fn finish(&mut self, joined: Result<AdvisoryResult, JoinError>) {
        let Some(in_flight) = self.in_flight.take() else {
            return;
        };

        // A panicked or aborted call counts as a failed consultation.
        let outcome = joined.map_or(Outcome::Failure, Outcome::from);
        if self.consultation.complete(&in_flight.ticket, outcome) {
            debug!(
                "Consultation #{} resolved: {}",
                in_flight.ticket.id(),
                self.consultation.state()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct EchoAdvisor;

    #[async_trait]
    impl AdvisoryService for EchoAdvisor {
        async fn consult(&self, question: &str) -> Result<String, DomainError> {
            Ok(format!("eco: {question}"))
        }

        fn backend_name(&self) -> &str {
            "echo"
        }
    }

    struct PanickingAdvisor;

    #[async_trait]
    impl AdvisoryService for PanickingAdvisor {
        async fn consult(&self, _question: &str) -> Result<String, DomainError> {
            panic!("backend exploded");
        }

        fn backend_name(&self) -> &str {
            "panicking"
        }
    }

    #[tokio::test]
    async fn test_ask_sends_trimmed_question() {
        let mut widget = ConsultationWidget::new(Arc::new(EchoAdvisor));

        let state = widget.ask("  hola  ").await;
        assert_eq!(state, &ConsultationState::Answered("eco: hola".to_string()));
    }

    #[tokio::test]
    async fn test_ask_while_pending_does_not_return_previous_answer() {
        let mut widget = ConsultationWidget::new(Arc::new(EchoAdvisor));
        widget.update_query("primera");
        assert!(widget.submit());

        let state = widget.ask("segunda").await;
        assert_eq!(state, &ConsultationState::Pending);
        assert_eq!(widget.query().as_str(), "segunda");

        let state = widget.next_completion().await;
        assert_eq!(state.answer(), Some("eco: primera"));
    }

    #[tokio::test]
    async fn test_ask_with_blank_query_keeps_idle() {
        let mut widget = ConsultationWidget::new(Arc::new(EchoAdvisor));

        assert_eq!(widget.ask("   ").await, &ConsultationState::Idle);
    }

    #[tokio::test]
    async fn test_next_completion_without_pending_returns_state() {
        let mut widget = ConsultationWidget::new(Arc::new(EchoAdvisor));

        assert_eq!(widget.next_completion().await, &ConsultationState::Idle);
        assert!(!widget.poll_completion());
    }

    #[tokio::test]
    async fn test_panicking_service_counts_as_failure() {
        let mut widget = ConsultationWidget::new(Arc::new(PanickingAdvisor));

        let state = widget.ask("¿Puedo registrar 'Acme'?").await;
        assert_eq!(state, &ConsultationState::Errored);
        assert!(!widget.is_submit_disabled());
    }

    #[tokio::test]
    async fn test_poll_completion_applies_finished_call() {
        let mut widget = ConsultationWidget::new(Arc::new(EchoAdvisor));
        widget.update_query("marca");
        assert!(widget.submit());

        while !widget.poll_completion() {
            tokio::task::yield_now().await;
        }
        assert_eq!(widget.state().answer(), Some("eco: marca"));
    }
}
