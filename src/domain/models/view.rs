use super::ConsultationState;

pub const PLACEHOLDER_PROMPT: &str =
    "Ejemplo: \"¿Puedo registrar 'TacosGalácticos' para un restaurante?\"";
pub const FAILURE_MESSAGE: &str =
    "No pudimos completar tu consulta. Revisa tu pregunta e inténtalo de nuevo.";
pub const INPUT_PLACEHOLDER: &str = "Escribe tu duda sobre marcas aquí...";

const WAITING_FRAMES: [&str; 4] = ["●  ", "●● ", "●●●", " ●●"];

/// What the result panel shows. Selected solely by the consultation state,
/// so exactly one variant is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsultationView<'a> {
    Placeholder,
    Waiting,
    Answer(&'a str),
    Failed,
}

impl<'a> ConsultationView<'a> {
    pub fn of(state: &'a ConsultationState) -> Self {
        match state {
            ConsultationState::Idle => ConsultationView::Placeholder,
            ConsultationState::Pending => ConsultationView::Waiting,
            ConsultationState::Answered(text) => ConsultationView::Answer(text),
            ConsultationState::Errored => ConsultationView::Failed,
        }
    }

    /// Static text for the panel. `Waiting` is animated and has none.
    pub fn text(&self) -> Option<&'a str> {
        match self {
            ConsultationView::Placeholder => Some(PLACEHOLDER_PROMPT),
            ConsultationView::Waiting => None,
            ConsultationView::Answer(text) => Some(text),
            ConsultationView::Failed => Some(FAILURE_MESSAGE),
        }
    }
}

/// Frame of the waiting indicator for a given animation tick.
pub fn waiting_frame(tick: usize) -> &'static str {
    WAITING_FRAMES[tick % WAITING_FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_per_state() {
        assert_eq!(
            ConsultationView::of(&ConsultationState::Idle),
            ConsultationView::Placeholder
        );
        assert_eq!(
            ConsultationView::of(&ConsultationState::Pending),
            ConsultationView::Waiting
        );
        assert_eq!(
            ConsultationView::of(&ConsultationState::Errored),
            ConsultationView::Failed
        );

        let state = ConsultationState::Answered("Sí, es viable.".to_string());
        assert_eq!(
            ConsultationView::of(&state),
            ConsultationView::Answer("Sí, es viable.")
        );
    }

    #[test]
    fn test_view_text() {
        assert_eq!(ConsultationView::Placeholder.text(), Some(PLACEHOLDER_PROMPT));
        assert_eq!(ConsultationView::Waiting.text(), None);
        assert_eq!(ConsultationView::Failed.text(), Some(FAILURE_MESSAGE));
        assert_eq!(ConsultationView::Answer("hola").text(), Some("hola"));
    }

    #[test]
    fn test_waiting_frames_cycle() {
        assert_eq!(waiting_frame(0), waiting_frame(4));
        assert_ne!(waiting_frame(0), waiting_frame(1));
    }
}
