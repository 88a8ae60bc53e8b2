use clap::{Subcommand, ValueEnum};

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the consultant a single question and print the answer
    Ask {
        question: String,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Open the interactive consultant in the terminal
    Tui,
}

/// Backend answering consultations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AdvisoryBackend {
    /// Google Gemini generateContent API (GEMINI_* variables)
    #[default]
    Gemini,
    /// Anthropic Messages API or a compatible local server (ANTHROPIC_* variables)
    Anthropic,
    /// Offline canned answers
    Mock,
}

impl AdvisoryBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryBackend::Gemini => "gemini",
            AdvisoryBackend::Anthropic => "anthropic",
            AdvisoryBackend::Mock => "mock",
        }
    }
}

impl std::fmt::Display for AdvisoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
