use async_trait::async_trait;

use crate::domain::DomainError;

/// Turns a free-text trademark question into a natural-language answer.
///
/// Stateless: each call stands alone, with no session or conversation
/// history. Every failure cause (transport, backend, malformed or empty
/// response) is reported as an `Err`; callers only rely on the
/// success/failure distinction.
#[async_trait]
pub trait AdvisoryService: Send + Sync {
    /// Answer `question`. The question is non-empty and already trimmed.
    async fn consult(&self, question: &str) -> Result<String, DomainError>;

    /// Get the name of the backend answering questions
    fn backend_name(&self) -> &str;
}
