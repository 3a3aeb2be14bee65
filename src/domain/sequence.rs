//! Scripted reveal sequences: an ordered list of `(offset, frame)` cues
//! consumed through a single timer slot.

use tracing::debug;

use crate::domain::timing::TimerAction;

/// The only timer a reveal sequence uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealTimer;

pub type RevealAction = TimerAction<RevealTimer>;

#[derive(Debug, Clone, PartialEq)]
pub struct Cue<T> {
    /// Offset from the start of the sequence.
    pub at_ms: u64,
    pub frame: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStatus {
    Idle,
    Playing,
    /// Every cue has fired; the sequence stays on its last frame until closed.
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealSequence<T> {
    initial: T,
    cues: Vec<Cue<T>>,
    current: T,
    next_cue: usize,
    status: SequenceStatus,
}

impl<T: Clone> RevealSequence<T> {
    /// Cues are played in offset order regardless of the order given.
    pub fn new(initial: T, cues: Vec<(u64, T)>) -> Self {
        let mut cues: Vec<Cue<T>> = cues
            .into_iter()
            .map(|(at_ms, frame)| Cue { at_ms, frame })
            .collect();
        cues.sort_by_key(|cue| cue.at_ms);
        Self {
            current: initial.clone(),
            initial,
            cues,
            next_cue: 0,
            status: SequenceStatus::Idle,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn status(&self) -> SequenceStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == SequenceStatus::Playing
    }

    /// Starts from the initial frame. Ignored unless idle.
    pub fn start(&mut self) -> Option<RevealAction> {
        if self.status != SequenceStatus::Idle {
            return None;
        }
        self.current = self.initial.clone();
        self.next_cue = 0;
        match self.cues.first() {
            Some(cue) => {
                self.status = SequenceStatus::Playing;
                debug!(cues = self.cues.len(), "reveal sequence started");
                Some(TimerAction::Once { timer: RevealTimer, after_ms: cue.at_ms })
            }
            None => {
                self.status = SequenceStatus::Finished;
                None
            }
        }
    }

    /// Applies the pending cue and arms the next one, if any.
    pub fn fire(&mut self) -> Option<RevealAction> {
        if self.status != SequenceStatus::Playing {
            return None;
        }
        let Some(cue) = self.cues.get(self.next_cue) else {
            self.status = SequenceStatus::Finished;
            return None;
        };
        self.current = cue.frame.clone();
        let fired_at = cue.at_ms;
        self.next_cue += 1;

        match self.cues.get(self.next_cue) {
            Some(next) => Some(TimerAction::Once {
                timer: RevealTimer,
                after_ms: next.at_ms - fired_at,
            }),
            None => {
                self.status = SequenceStatus::Finished;
                debug!("reveal sequence finished");
                None
            }
        }
    }

    /// Stops on the frame reached so far. The sequence counts as finished.
    pub fn cancel(&mut self) -> Option<RevealAction> {
        if !self.is_playing() {
            return None;
        }
        self.status = SequenceStatus::Finished;
        debug!(fired = self.next_cue, "reveal sequence cancelled");
        Some(TimerAction::Cancel(RevealTimer))
    }

    /// Back to the initial frame, dropping any pending cue.
    pub fn close(&mut self) -> Option<RevealAction> {
        let was_playing = self.is_playing();
        self.current = self.initial.clone();
        self.next_cue = 0;
        self.status = SequenceStatus::Idle;
        was_playing.then_some(TimerAction::Cancel(RevealTimer))
    }
}

/// Frame of the "how we work" animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowFrame {
    /// 0 = scattered start, 1 = coordination, 2 = optimisation, 3 = result.
    pub step: u8,
    pub show_overlay: bool,
}

pub const FLOW_STEP_LABELS: [&str; 4] = [
    "Fragmented processes",
    "High Vision coordinates",
    "Optimisation",
    "Unified result",
];

/// Steps at 2s, 4s and 5s, then the closing overlay at 10s.
pub fn how_we_work_sequence() -> RevealSequence<FlowFrame> {
    let step = |step| FlowFrame { step, show_overlay: false };
    RevealSequence::new(
        FlowFrame::default(),
        vec![
            (2_000, step(1)),
            (4_000, step(2)),
            (5_000, step(3)),
            (10_000, FlowFrame { step: 3, show_overlay: true }),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delays(sequence: &mut RevealSequence<FlowFrame>) -> Vec<u64> {
        let mut out = Vec::new();
        let mut action = sequence.start();
        while let Some(TimerAction::Once { after_ms, .. }) = action {
            out.push(after_ms);
            action = sequence.fire();
        }
        out
    }

    #[test]
    fn test_how_we_work_timeline() {
        let mut sequence = how_we_work_sequence();
        assert_eq!(delays(&mut sequence), vec![2_000, 2_000, 1_000, 5_000]);
        assert_eq!(sequence.status(), SequenceStatus::Finished);
        assert_eq!(*sequence.current(), FlowFrame { step: 3, show_overlay: true });
    }

    #[test]
    fn test_frames_follow_cues() {
        let mut sequence = how_we_work_sequence();
        sequence.start();
        assert_eq!(sequence.current().step, 0);
        sequence.fire();
        assert_eq!(sequence.current().step, 1);
        sequence.fire();
        assert_eq!(sequence.current().step, 2);
        assert!(!sequence.current().show_overlay);
    }

    #[test]
    fn test_start_ignored_while_busy() {
        let mut sequence = how_we_work_sequence();
        assert!(sequence.start().is_some());
        assert!(sequence.start().is_none());

        while sequence.fire().is_some() {}
        assert!(sequence.start().is_none(), "finished sequence waits for close");

        assert!(sequence.close().is_none());
        assert!(sequence.start().is_some());
    }

    #[test]
    fn test_close_cancels_pending_cue() {
        let mut sequence = how_we_work_sequence();
        sequence.start();
        sequence.fire();
        assert_eq!(sequence.close(), Some(TimerAction::Cancel(RevealTimer)));
        assert_eq!(*sequence.current(), FlowFrame::default());
        assert_eq!(sequence.fire(), None);
        assert_eq!(sequence.current().step, 0);
    }

    #[test]
    fn test_cancel_freezes_current_frame() {
        let mut sequence = how_we_work_sequence();
        assert_eq!(sequence.cancel(), None);

        sequence.start();
        sequence.fire();
        assert_eq!(sequence.cancel(), Some(TimerAction::Cancel(RevealTimer)));
        assert_eq!(sequence.status(), SequenceStatus::Finished);
        assert_eq!(sequence.current().step, 1);
        assert_eq!(sequence.fire(), None);
        assert_eq!(sequence.cancel(), None);
    }

    #[test]
    fn test_cues_sorted_and_empty() {
        let mut sequence = RevealSequence::new(0u8, vec![(300, 3), (100, 1), (200, 2)]);
        assert_eq!(sequence.start(), Some(TimerAction::Once { timer: RevealTimer, after_ms: 100 }));
        assert_eq!(sequence.fire(), Some(TimerAction::Once { timer: RevealTimer, after_ms: 100 }));
        assert_eq!(*sequence.current(), 1);

        let mut empty: RevealSequence<u8> = RevealSequence::new(0, Vec::new());
        assert_eq!(empty.start(), None);
        assert_eq!(empty.status(), SequenceStatus::Finished);
    }
}
