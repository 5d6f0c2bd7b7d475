//! Command-line interface parsing and startup assembly.
//!
//! The credential is read from the environment exactly once, here, and
//! threaded into [`SessionConfig`]; nothing below this layer touches the
//! process environment.

use std::env;
use std::error::Error;

use clap::Parser;

use crate::core::config::{Config, SessionConfig, DEFAULT_MODEL};
use crate::logging::init_debug_tracing;
use crate::ui::chat_loop::run_chat;

const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

#[derive(Parser)]
#[command(name = "gemterm")]
#[command(about = "A terminal-based chat interface for Google's Gemini API")]
#[command(
    long_about = "Gemterm is a full-screen terminal chat interface that connects to Google's \
Gemini generative-language API for real-time conversations.\n\n\
Environment Variables:\n\
  GEMINI_API_KEY      Your Generative Language API key (required)\n\
  GEMTERM_DEBUG_LOG   Write debug tracing to the named file (optional)\n\n\
Controls:\n\
  Type                Enter your message in the input field\n\
  Enter / Ctrl+S      Send the message\n\
  Alt+Enter           Insert a newline in the draft\n\
  Ctrl+T              Toggle light/dark theme\n\
  Up/Down/PgUp/PgDn   Scroll through chat history\n\
  Esc                 Dismiss the error banner\n\
  Ctrl+C              Quit"
)]
pub struct Args {
    /// Model to chat with
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// UI theme ("light" or "dark")
    #[arg(short = 't', long, value_name = "THEME")]
    pub theme: Option<String>,

    /// Append the conversation transcript to the specified file
    #[arg(short = 'l', long, value_name = "FILE")]
    pub log: Option<String>,

    /// Override the API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

/// Flags beat the config file, which beats built-in defaults.
fn resolve_settings(args: &Args, config: &Config) -> (String, String, Option<String>) {
    let model = args
        .model
        .clone()
        .or_else(|| config.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let theme = args
        .theme
        .clone()
        .or_else(|| config.theme.clone())
        .unwrap_or_else(|| "light".to_string());
    let base_url = args.base_url.clone().or_else(|| config.base_url.clone());
    (model, theme, base_url)
}

pub async fn run() -> Result<(), Box<dyn Error>> {
    init_debug_tracing();

    let args = Args::parse();
    let config = Config::load()?;

    let api_key = env::var(API_KEY_ENV_VAR).map_err(|_| {
        format!(
            "❌ {API_KEY_ENV_VAR} environment variable not set\n\n\
Please set your Generative Language API key:\n\
  export {API_KEY_ENV_VAR}=\"your-api-key-here\""
        )
    })?;

    let (model, theme, base_url) = resolve_settings(&args, &config);
    let session_config = SessionConfig::new(api_key, model, base_url.as_deref());

    run_chat(session_config, &theme, args.log).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(model: Option<&str>, theme: Option<&str>) -> Args {
        Args {
            model: model.map(str::to_string),
            theme: theme.map(str::to_string),
            log: None,
            base_url: None,
        }
    }

    #[test]
    fn flags_override_config_file() {
        let config = Config {
            theme: Some("dark".to_string()),
            model: Some("config-model".to_string()),
            base_url: Some("https://example.com/v1beta".to_string()),
        };
        let (model, theme, base_url) = resolve_settings(&args(Some("flag-model"), None), &config);
        assert_eq!(model, "flag-model");
        assert_eq!(theme, "dark");
        assert_eq!(base_url.as_deref(), Some("https://example.com/v1beta"));
    }

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let (model, theme, base_url) = resolve_settings(&args(None, None), &Config::default());
        assert_eq!(model, DEFAULT_MODEL);
        assert_eq!(theme, "light");
        assert!(base_url.is_none());
    }
}
