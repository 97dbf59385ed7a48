//! User-facing notifications

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Channel the workflows report outcomes through
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&mut self, kind: NoticeKind, message: &str);
}

/// Notices waiting to be shown.
///
/// Success messages replace each other in the status bar; errors queue up
/// and are dismissed one at a time from a dialog.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    status: Option<String>,
    errors: VecDeque<String>,
}

impl NoticeBoard {
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Number of queued errors, including the one shown
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

impl Notifier for NoticeBoard {
    fn notify(&mut self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Success => {
                tracing::info!("{message}");
                self.set_status(message);
            }
            NoticeKind::Error => {
                tracing::warn!("{message}");
                self.push_error(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_goes_to_status_bar() {
        let mut board = NoticeBoard::default();
        board.notify(NoticeKind::Success, "Invitation sent");
        assert_eq!(board.status(), Some("Invitation sent"));
        assert!(!board.has_errors());
    }

    #[test]
    fn test_errors_queue_in_order() {
        let mut board = NoticeBoard::default();
        board.notify(NoticeKind::Error, "first");
        board.notify(NoticeKind::Error, "second");

        assert_eq!(board.current_error(), Some("first"));
        assert_eq!(board.error_count(), 2);
        board.dismiss_error();
        assert_eq!(board.current_error(), Some("second"));
        board.dismiss_error();
        assert!(!board.has_errors());
        assert_eq!(board.current_error(), None);
    }

    #[test]
    fn test_dismiss_on_empty_is_noop() {
        let mut board = NoticeBoard::default();
        board.dismiss_error();
        assert!(!board.has_errors());
    }

    #[test]
    fn test_clear_status() {
        let mut board = NoticeBoard::default();
        board.set_status("Status updated successfully");
        board.clear_status();
        assert_eq!(board.status(), None);
    }
}
