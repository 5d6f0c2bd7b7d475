//! Optional append-only transcript log, enabled with `--log <file>`.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct LoggingState {
    file_path: Option<String>,
}

impl LoggingState {
    pub fn new(log_file: Option<String>) -> Self {
        LoggingState { file_path: log_file }
    }

    pub fn is_active(&self) -> bool {
        self.file_path.is_some()
    }

    /// Append one conversation turn. A no-op when logging is disabled.
    pub fn log_turn(&self, label: &str, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(file_path) = &self.file_path else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(Path::new(file_path))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{label}: {text}")?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn disabled_logging_is_a_no_op() {
        let logging = LoggingState::new(None);
        assert!(!logging.is_active());
        assert!(logging.log_turn("You", "hello").is_ok());
    }

    #[test]
    fn turns_are_appended_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.log");
        let logging = LoggingState::new(Some(path.to_string_lossy().into_owned()));

        logging.log_turn("You", "Hello").unwrap();
        logging.log_turn("Bot", "Hi there!").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let you = contents.find("You: Hello").unwrap();
        let bot = contents.find("Bot: Hi there!").unwrap();
        assert!(you < bot);
    }
}
