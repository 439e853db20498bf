//! User-visible error reporting
//!
//! The host decides how errors reach the user (a toast, a status line, stderr).
//! The provider only calls [`Notifier::error`] and keeps going.

use std::sync::{Mutex, PoisonError};

use crate::error::SnippetError;

/// Sink for errors that should be shown to the user
pub trait Notifier: Send + Sync {
    fn error(&self, err: &SnippetError);
}

/// Reports errors through `tracing`
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, err: &SnippetError) {
        tracing::error!("{}", err);
    }
}

/// Keeps reported errors in memory so a host can display them in bulk
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages reported so far, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain the recorded messages
    pub fn take(&self) -> Vec<String> {
        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *messages)
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, err: &SnippetError) {
        tracing::debug!("Recording error: {}", err);
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_recording_notifier_take_drains() {
        let notifier = RecordingNotifier::new();
        notifier.error(&SnippetError::Parse {
            path: PathBuf::from("/x.json"),
            message: "bad".to_string(),
        });
        assert_eq!(notifier.messages().len(), 1);
        assert_eq!(notifier.take().len(), 1);
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn test_recording_notifier_survives_poisoned_lock() {
        let notifier = std::sync::Arc::new(RecordingNotifier::new());
        let poisoner = std::sync::Arc::clone(&notifier);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.messages.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(notifier.messages.is_poisoned());

        notifier.error(&SnippetError::Parse {
            path: PathBuf::from("/y.json"),
            message: "bad".to_string(),
        });
        assert_eq!(notifier.messages().len(), 1);
        assert_eq!(notifier.take().len(), 1);
    }
}
