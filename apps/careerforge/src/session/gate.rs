use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// At-most-one guard for an orchestration entry point.
#[derive(Debug, Clone, Default)]
pub struct InFlightGate(Arc<AtomicBool>);

/// Held while an operation is outstanding. Dropping it reopens the gate.
#[derive(Debug)]
pub struct InFlightTicket(Arc<AtomicBool>);

impl InFlightGate {
    /// Returns `None` while another ticket is alive.
    pub fn try_acquire(&self) -> Option<InFlightTicket> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightTicket(Arc::clone(&self.0)))
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Drop for InFlightTicket {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_until_ticket_dropped() {
        let gate = InFlightGate::default();
        let ticket = gate.try_acquire();
        assert!(ticket.is_some());
        assert!(gate.is_busy());
        assert!(gate.clone().try_acquire().is_none(), "clones share the flag");

        drop(ticket);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_some());
    }
}
