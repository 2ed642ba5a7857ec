use std::{cell::RefCell, collections::HashSet};

use shared::domain::MessageId;

/// Tracks like toggles whose request has not settled yet.
#[derive(Debug, Default)]
pub struct InflightGuard {
    pending: RefCell<HashSet<MessageId>>,
}

impl InflightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `message_id`, or returns `None` if a toggle is already running.
    pub fn acquire(&self, message_id: MessageId) -> Option<InflightTicket<'_>> {
        if !self.pending.borrow_mut().insert(message_id) {
            return None;
        }
        Some(InflightTicket {
            guard: self,
            message_id,
        })
    }

    pub fn is_pending(&self, message_id: MessageId) -> bool {
        self.pending.borrow().contains(&message_id)
    }
}

/// Releases its message id when dropped.
#[derive(Debug)]
pub struct InflightTicket<'a> {
    guard: &'a InflightGuard,
    message_id: MessageId,
}

impl Drop for InflightTicket<'_> {
    fn drop(&mut self) {
        self.guard.pending.borrow_mut().remove(&self.message_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_fails_until_ticket_drops() {
        let guard = InflightGuard::new();
        let ticket = guard.acquire(MessageId(7)).expect("first claim");
        assert!(guard.acquire(MessageId(7)).is_none());
        assert!(guard.acquire(MessageId(8)).is_some());

        drop(ticket);
        assert!(!guard.is_pending(MessageId(7)));
        assert!(guard.acquire(MessageId(7)).is_some());
    }
}
