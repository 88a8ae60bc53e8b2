use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::AdvisoryService;
use crate::connector::adapter::ChatClient;
use crate::domain::DomainError;

/// System prompt framing the model as Mercalike's trademark consultant.
const SYSTEM_PROMPT: &str = "\
Eres el consultor virtual de Mercalike, un despacho especializado en el registro \
de marcas ante el IMPI (Instituto Mexicano de la Propiedad Industrial).

Reglas:
1. Responde siempre en español, en un solo párrafo de máximo 120 palabras.
2. Orienta sobre disponibilidad, clases de la Clasificación de Niza, requisitos y \
   riesgos de confusión fonética o visual con marcas existentes.
3. No garantices el otorgamiento del registro; recomienda una búsqueda de \
   anterioridades antes de presentar la solicitud.
4. Si la pregunta no trata sobre marcas o propiedad industrial, indícalo con \
   amabilidad y redirige al tema.
5. Sin markdown, sin listas, sin encabezados.";

/// An [`AdvisoryService`] that asks a language model through any [`ChatClient`].
///
/// Each question is sent on its own with the consultant system prompt; no
/// conversation history is kept. Blank model output is treated as a failed
/// consultation.
pub struct LlmAdvisoryService {
    chat: Arc<dyn ChatClient>,
    name: String,
}

impl LlmAdvisoryService {
    pub fn new(chat: Arc<dyn ChatClient>, backend: &str) -> Self {
        let name = format!("{backend}:{}", chat.model());
        Self { chat, name }
    }

    pub fn system_prompt() -> &'static str {
        SYSTEM_PROMPT
    }
}

#[async_trait]
impl AdvisoryService for LlmAdvisoryService {
    async fn consult(&self, question: &str) -> Result<String, DomainError> {
        if question.trim().is_empty() {
            return Err(DomainError::invalid_input("question is empty"));
        }

        let start_time = Instant::now();
        let answer = self.chat.complete(SYSTEM_PROMPT, question).await?;
        let answer = answer.trim();

        if answer.is_empty() {
            warn!("{}: model returned an empty answer", self.name);
            return Err(DomainError::advisory("model returned an empty answer"));
        }

        debug!(
            "{} answered in {:.2}s ({} chars)",
            self.name,
            start_time.elapsed().as_secs_f64(),
            answer.chars().count()
        );

        Ok(answer.to_string())
    }

    fn backend_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedChat {
        reply: Result<String, String>,
        prompts: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedChat {
        fn replying(reply: Result<&str, &str>) -> Self {
            Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedChat {
        async fn complete(&self, system: &str, user: &str) -> Result<String, DomainError> {
            self.prompts
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            self.reply.clone().map_err(DomainError::advisory)
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn consult_sends_question_with_system_prompt() {
        let chat = Arc::new(ScriptedChat::replying(Ok("  Sí, en la clase 25.  ")));
        let service = LlmAdvisoryService::new(chat.clone(), "test");

        let answer = service.consult("¿Puedo registrar 'Acme' para ropa?").await.unwrap();
        assert_eq!(answer, "Sí, en la clase 25.");

        let prompts = chat.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].0, LlmAdvisoryService::system_prompt());
        assert_eq!(prompts[0].1, "¿Puedo registrar 'Acme' para ropa?");
    }

    #[tokio::test]
    async fn consult_rejects_blank_answer() {
        let service =
            LlmAdvisoryService::new(Arc::new(ScriptedChat::replying(Ok(" \n "))), "test");
        let err = service.consult("¿marca?").await.unwrap_err();
        assert!(err.is_advisory_error());
    }

    #[tokio::test]
    async fn consult_propagates_backend_failure() {
        let service =
            LlmAdvisoryService::new(Arc::new(ScriptedChat::replying(Err("503"))), "test");
        assert!(service.consult("¿marca?").await.is_err());
    }

    #[tokio::test]
    async fn consult_rejects_blank_question_without_calling_model() {
        let chat = Arc::new(ScriptedChat::replying(Ok("nunca")));
        let service = LlmAdvisoryService::new(chat.clone(), "test");

        assert!(service.consult("   ").await.is_err());
        assert!(chat.prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn backend_name_includes_model() {
        let service = LlmAdvisoryService::new(Arc::new(ScriptedChat::replying(Ok("x"))), "gemini");
        assert_eq!(service.backend_name(), "gemini:scripted");
    }
}
