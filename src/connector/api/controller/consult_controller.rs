use anyhow::{bail, Result};
use serde_json::json;

use crate::{ConsultationState, ConsultationView, OutputFormat};

use super::super::Container;

pub struct ConsultController<'a> {
    container: &'a Container,
}

impl<'a> ConsultController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Run one consultation. A blank question makes no call and yields the
    /// idle placeholder.
    pub async fn ask(&self, question: String, format: OutputFormat) -> Result<String> {
        let mut widget = self.container.consultation_widget();
        let backend = widget.backend_name().to_string();
        let state = widget.ask(question.as_str()).await;

        match format {
            OutputFormat::Json => self.format_json(&question, &backend, state),
            OutputFormat::Text => {
                let view = ConsultationView::of(state);
                if view == ConsultationView::Failed {
                    bail!("{}", view.text().unwrap_or_default());
                }
                Ok(view.text().unwrap_or_default().to_string())
            }
        }
    }

    fn format_json(
        &self,
        question: &str,
        backend: &str,
        state: &ConsultationState,
    ) -> Result<String> {
        let output = json!({
            "question": question.trim(),
            "backend": backend,
            "state": state,
        });
        Ok(serde_json::to_string_pretty(&output)?)
    }
}
