//! Application-specific error handling for the convlist TUI
//!
//! Errors are plain `eyre` reports. The program loop classifies a failed
//! command with [`RecoveryExt`] to decide whether it ends the program.

use color_eyre::{Section, SectionExt};
use convlist::list::SelectionError;
use eyre::Report;

/// Result type alias for application operations
pub type Result<T> = eyre::Result<T>;

/// Recovery strategy for different error types
#[derive(Debug, Clone, PartialEq)]
pub enum RecoveryStrategy {
    /// Error can be retried (interrupted or timed out IO)
    Retry,
    /// Application should exit gracefully
    Exit,
    /// Error should be logged but ignored
    Ignore,
}

/// Extension trait for adding recovery strategy context to errors
pub trait RecoveryExt {
    /// Determine the appropriate recovery strategy for this error
    fn recovery_strategy(&self) -> RecoveryStrategy;

    /// Check if this error should cause the application to exit
    fn is_fatal(&self) -> bool {
        matches!(self.recovery_strategy(), RecoveryStrategy::Exit)
    }

    /// Check if this error can be retried
    fn is_retryable(&self) -> bool {
        matches!(self.recovery_strategy(), RecoveryStrategy::Retry)
    }
}

impl RecoveryExt for Report {
    fn recovery_strategy(&self) -> RecoveryStrategy {
        // A rejected selection never affects anything beyond its own call
        if self.downcast_ref::<SelectionError>().is_some() {
            return RecoveryStrategy::Ignore;
        }

        if let Some(io_err) = self.downcast_ref::<std::io::Error>() {
            return match io_err.kind() {
                std::io::ErrorKind::TimedOut
                | std::io::ErrorKind::Interrupted
                | std::io::ErrorKind::WouldBlock => RecoveryStrategy::Retry,
                _ => RecoveryStrategy::Exit,
            };
        }

        if self.downcast_ref::<serde_json::Error>().is_some() {
            return RecoveryStrategy::Exit;
        }

        let error_str = self.to_string().to_lowercase();
        if error_str.contains("sync") || error_str.contains("async task") {
            RecoveryStrategy::Ignore
        } else {
            RecoveryStrategy::Exit
        }
    }
}

/// Helper functions for creating contextual errors
pub mod context {
    use super::*;

    /// Create a terminal initialization error with recovery context
    pub fn terminal_init(message: impl Into<String>) -> Report {
        eyre::eyre!("{}", message.into())
            .with_section(|| "Terminal initialization failed".header("Error Type:"))
            .with_section(|| {
                "Try restarting the terminal or checking terminal capabilities".header("Suggestion:")
            })
    }

    /// Create a configuration error with recovery context
    pub fn configuration(message: impl Into<String>) -> Report {
        eyre::eyre!("{}", message.into())
            .with_section(|| "Configuration error".header("Error Type:"))
            .with_section(|| {
                format!(
                    "Check the file named by ${} or the user config directory",
                    crate::app::config::CONFIG_ENV
                )
                .header("Suggestion:")
            })
    }

    /// Create a fixture loading error with recovery context
    pub fn fixture(message: impl Into<String>) -> Report {
        eyre::eyre!("{}", message.into())
            .with_section(|| "Fixture error".header("Error Type:"))
            .with_section(|| {
                "Expected { \"connection_requests\": bool, \"conversations\": [...] }"
                    .header("Format:")
            })
    }

    /// Create an async task error with recovery context
    pub fn async_task(message: impl Into<String>) -> Report {
        eyre::eyre!("Async task failed: {}", message.into())
            .with_section(|| "Async task failed".header("Error Type:"))
            .with_section(|| {
                "This error will be logged but the application will continue".header("Recovery:")
            })
    }
}

/// Extension trait for adding terminal-specific context to errors
pub trait TerminalErrorExt {
    /// Add terminal state context to an error
    fn with_terminal_context(self, raw_mode: bool, alternate_screen: bool) -> Report;
}

impl<E> TerminalErrorExt for E
where
    E: Into<Report>,
{
    fn with_terminal_context(self, raw_mode: bool, alternate_screen: bool) -> Report {
        self.into()
            .with_section(move || format!("Raw mode: {}", raw_mode).header("Terminal State:"))
            .with_section(move || {
                format!("Alternate screen: {}", alternate_screen).header("Screen Mode:")
            })
    }
}
