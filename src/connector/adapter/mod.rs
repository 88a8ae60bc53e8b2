mod anthropic_client;
mod chat_client;
mod gemini_client;
mod llm_advisory_service;
mod mock_advisory;

pub use anthropic_client::*;
pub use chat_client::*;
pub use gemini_client::*;
pub use llm_advisory_service::*;
pub use mock_advisory::*;
