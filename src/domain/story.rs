//! Story section stepper: cycles through the company story while the section
//! is on screen, and backs off for a moment after a manual selection.

use tracing::debug;

use crate::domain::timing::TimerAction;

pub const STORY_STEP_MS: u64 = 4_000;
pub const STORY_RESUME_MS: u64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryTimer {
    Advance,
    Resume,
}

pub type StoryAction = TimerAction<StoryTimer>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryStep {
    pub era: &'static str,
    pub title: &'static str,
    pub concept: &'static str,
}

pub const STORY_STEPS: [StoryStep; 4] = [
    StoryStep {
        era: "COMPLEXITY",
        title: "The world got complicated",
        concept: "Fragmented processes, isolated technology, scattered communication",
    },
    StoryStep {
        era: "TRANSFORMATION",
        title: "Innovation is necessary",
        concept: "A bridge between past and future, analogue and digital",
    },
    StoryStep {
        era: "UNIFICATION",
        title: "The vision becomes real",
        concept: "A coherent ecosystem where every element works in harmony",
    },
    StoryStep {
        era: "EXCELLENCE",
        title: "The future is already here",
        concept: "Better results, smooth processes, sustainable growth",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryPlayer {
    step_count: usize,
    current: usize,
    visible: bool,
    playing: bool,
    resume_pending: bool,
}

impl StoryPlayer {
    pub fn new(step_count: usize) -> Self {
        Self {
            step_count,
            current: 0,
            visible: false,
            playing: false,
            resume_pending: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The section scrolled into or out of view.
    pub fn set_visible(&mut self, visible: bool) -> Vec<StoryAction> {
        if self.visible == visible {
            return Vec::new();
        }
        self.visible = visible;
        if visible {
            self.play()
        } else {
            let mut actions = self.halt();
            if self.resume_pending {
                self.resume_pending = false;
                actions.push(TimerAction::Cancel(StoryTimer::Resume));
            }
            actions
        }
    }

    /// The advance timer fired.
    pub fn advance(&mut self) {
        if self.playing && self.step_count > 0 {
            self.current = (self.current + 1) % self.step_count;
        }
    }

    /// Jumps to `step` and holds autoplay for [`STORY_RESUME_MS`].
    pub fn select(&mut self, step: usize) -> Vec<StoryAction> {
        if self.step_count == 0 {
            return Vec::new();
        }
        self.current = step.min(self.step_count - 1);
        let mut actions = self.halt();
        self.resume_pending = true;
        actions.push(TimerAction::Once {
            timer: StoryTimer::Resume,
            after_ms: STORY_RESUME_MS,
        });
        debug!(step = self.current, "story step selected");
        actions
    }

    /// The resume timer fired.
    pub fn resume(&mut self) -> Vec<StoryAction> {
        if !self.resume_pending {
            return Vec::new();
        }
        self.resume_pending = false;
        if self.visible { self.play() } else { Vec::new() }
    }

    fn play(&mut self) -> Vec<StoryAction> {
        if self.playing || self.step_count <= 1 {
            return Vec::new();
        }
        self.playing = true;
        vec![TimerAction::Repeat {
            timer: StoryTimer::Advance,
            every_ms: STORY_STEP_MS,
        }]
    }

    fn halt(&mut self) -> Vec<StoryAction> {
        if !self.playing {
            return Vec::new();
        }
        self.playing = false;
        vec![TimerAction::Cancel(StoryTimer::Advance)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plays_only_while_visible() {
        let mut player = StoryPlayer::new(STORY_STEPS.len());
        player.advance();
        assert_eq!(player.current(), 0);

        let actions = player.set_visible(true);
        assert_eq!(actions, vec![TimerAction::Repeat { timer: StoryTimer::Advance, every_ms: 4_000 }]);
        assert!(player.set_visible(true).is_empty());

        for _ in 0..5 {
            player.advance();
        }
        assert_eq!(player.current(), 1);

        assert_eq!(player.set_visible(false), vec![TimerAction::Cancel(StoryTimer::Advance)]);
        player.advance();
        assert_eq!(player.current(), 1);
    }

    #[test]
    fn test_select_holds_then_resumes() {
        let mut player = StoryPlayer::new(STORY_STEPS.len());
        player.set_visible(true);

        let actions = player.select(3);
        assert_eq!(
            actions,
            vec![
                TimerAction::Cancel(StoryTimer::Advance),
                TimerAction::Once { timer: StoryTimer::Resume, after_ms: 2_000 },
            ]
        );
        assert_eq!(player.current(), 3);
        assert!(!player.is_playing());

        let actions = player.resume();
        assert_eq!(actions.len(), 1);
        assert!(player.is_playing());
        player.advance();
        assert_eq!(player.current(), 0);
    }

    #[test]
    fn test_hidden_section_does_not_resume() {
        let mut player = StoryPlayer::new(STORY_STEPS.len());
        player.set_visible(true);
        player.select(9);
        assert_eq!(player.current(), 3);

        assert_eq!(player.set_visible(false), vec![TimerAction::Cancel(StoryTimer::Resume)]);
        assert!(player.resume().is_empty());
        assert!(!player.is_playing());
    }

    #[test]
    fn test_empty_story_is_inert() {
        let mut player = StoryPlayer::new(0);
        assert!(player.set_visible(true).is_empty());
        assert!(player.select(2).is_empty());
        player.advance();
        assert_eq!(player.current(), 0);
    }
}
