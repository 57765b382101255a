//! Timed status notices.

use std::time::{Duration, Instant};

/// How long a notice stays visible.
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub expires_at: Instant,
}

/// Holds at most one notice and its clear deadline.
///
/// The deadline is only checked by [`NoticeSlot::tick`], so dropping the slot
/// drops any pending clear with it.
#[derive(Debug, Default)]
pub struct NoticeSlot {
    current: Option<Notice>,
}

impl NoticeSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `text`, replacing any notice already up.
    pub fn show(&mut self, text: impl Into<String>, kind: NoticeKind, now: Instant) {
        self.current = Some(Notice {
            text: text.into(),
            kind,
            expires_at: now + NOTICE_DURATION,
        });
    }

    /// Clear the notice once its deadline has passed. Returns true if it
    /// was cleared by this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(notice) if now >= notice.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}
