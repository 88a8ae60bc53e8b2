use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::application::{AdvisoryService, ConsultationWidget};
use crate::{
    AdvisoryBackend, AnthropicClient, ChatClient, GeminiClient, LlmAdvisoryService,
    MockAdvisoryService,
};

pub struct ContainerConfig {
    pub backend: AdvisoryBackend,
    /// Artificial delay for the mock backend, so the waiting indicator is visible.
    pub mock_latency: Duration,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            backend: AdvisoryBackend::default(),
            mock_latency: Duration::ZERO,
        }
    }
}

pub struct Container {
    advisory_service: Arc<dyn AdvisoryService>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let advisory_service: Arc<dyn AdvisoryService> = match config.backend {
            AdvisoryBackend::Gemini => {
                let client = GeminiClient::from_env()?;
                debug!("Using Gemini advisory backend at {}", client.url());
                Arc::new(LlmAdvisoryService::new(
                    Arc::new(client) as Arc<dyn ChatClient>,
                    "gemini",
                ))
            }
            AdvisoryBackend::Anthropic => {
                let client = AnthropicClient::from_env();
                debug!("Using Anthropic advisory backend at {}", client.url());
                Arc::new(LlmAdvisoryService::new(
                    Arc::new(client) as Arc<dyn ChatClient>,
                    "anthropic",
                ))
            }
            AdvisoryBackend::Mock => {
                debug!("Using mock advisory backend");
                Arc::new(MockAdvisoryService::new().with_latency(config.mock_latency))
            }
        };

        Ok(Self {
            advisory_service,
            config,
        })
    }

    /// Build a container around an already constructed service.
    pub fn with_advisory_service(
        advisory_service: Arc<dyn AdvisoryService>,
        config: ContainerConfig,
    ) -> Self {
        Self {
            advisory_service,
            config,
        }
    }

    pub fn advisory_service(&self) -> Arc<dyn AdvisoryService> {
        self.advisory_service.clone()
    }

    /// A fresh widget; each one holds its own independent consultation.
    pub fn consultation_widget(&self) -> ConsultationWidget {
        ConsultationWidget::new(self.advisory_service.clone())
    }

    pub fn backend(&self) -> AdvisoryBackend {
        self.config.backend
    }
}
