/// Timer work a state machine hands back to the host after a transition.
/// `T` names the timer slot; a slot has at most one pending entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction<T> {
    /// Arm a repeating timer.
    Repeat { timer: T, every_ms: u64 },
    /// Arm a single-shot timer.
    Once { timer: T, after_ms: u64 },
    /// Drop a pending timer.
    Cancel(T),
}

impl<T> TimerAction<T> {
    pub fn is_cancel(&self) -> bool {
        matches!(self, TimerAction::Cancel(_))
    }
}
