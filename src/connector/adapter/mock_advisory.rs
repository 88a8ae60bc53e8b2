use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;
use tracing::debug;

use crate::application::AdvisoryService;
use crate::domain::DomainError;

const CANNED_ANSWERS: [&str; 3] = [
    "Es probable que puedas registrarla, pero antes conviene una búsqueda fonética \
     y visual de anterioridades en la clase que corresponda a tu giro.",
    "Identifica primero la clase de Niza de tus productos o servicios; un nombre \
     distintivo y no descriptivo tiene mejores posibilidades ante el IMPI.",
    "Revisa que no exista una marca similar registrada para productos relacionados; \
     si la búsqueda sale limpia, la solicitud suele resolverse en unos meses.",
];

/// Offline advisory service with deterministic answers.
///
/// The same question always gets the same canned answer. Useful for demos
/// without an API key and for tests.
pub struct MockAdvisoryService {
    latency: Duration,
    failing: bool,
}

impl MockAdvisoryService {
    pub fn new() -> Self {
        Self {
            latency: Duration::ZERO,
            failing: false,
        }
    }

    /// A service whose every call fails, as if the backend were down.
    pub fn failing() -> Self {
        Self {
            latency: Duration::ZERO,
            failing: true,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn answer_for(question: &str) -> &'static str {
        let mut hasher = DefaultHasher::new();
        question.hash(&mut hasher);
        CANNED_ANSWERS[(hasher.finish() % CANNED_ANSWERS.len() as u64) as usize]
    }
}

impl Default for MockAdvisoryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdvisoryService for MockAdvisoryService {
    async fn consult(&self, question: &str) -> Result<String, DomainError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.failing {
            return Err(DomainError::advisory("mock advisory backend unavailable"));
        }

        debug!("Mock advisory answering: {}", question);
        Ok(Self::answer_for(question).to_string())
    }

    fn backend_name(&self) -> &str {
        "mock-advisory"
    }
}
