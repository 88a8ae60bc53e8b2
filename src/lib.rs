pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{AdvisoryService, ConsultationWidget};

pub use cli::{AdvisoryBackend, Commands, OutputFormat};

pub use connector::{
    AnthropicClient, ChatClient, Container, ContainerConfig, GeminiClient, LlmAdvisoryService,
    MockAdvisoryService, Router,
};

pub use domain::{
    waiting_frame, Consultation, ConsultationState, ConsultationView, DomainError, Outcome, Query,
    Submission, FAILURE_MESSAGE, INPUT_PLACEHOLDER, PLACEHOLDER_PROMPT,
};
