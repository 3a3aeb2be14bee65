//! Autoplay carousel state machine.
//!
//! The carousel never owns a timer. Every event goes through one transition
//! function that mutates the view state and returns the timer actions the
//! host must perform, so that pause/resume accounting can be checked without
//! a clock.

use tracing::{debug, trace, warn};

use crate::domain::models::{items_per_view, total_pages};
use crate::domain::timing::TimerAction;

/// Timing knobs of the autoplay loop, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplaySettings {
    /// Time a page stays on screen before advancing, absent pauses.
    pub duration_ms: u64,
    /// Period of the progress tick.
    pub tick_interval_ms: u64,
    /// Lower bound for any scheduled deadline.
    pub min_deadline_ms: u64,
}

impl Default for AutoplaySettings {
    fn default() -> Self {
        Self {
            duration_ms: 5_000,
            tick_interval_ms: 50,
            min_deadline_ms: 100,
        }
    }
}

/// The two timers a carousel may have pending. At most one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CarouselTimer {
    Tick,
    Deadline,
}

pub type CarouselAction = TimerAction<CarouselTimer>;

/// Why the carousel is being held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseReason {
    /// Pointer is over the carousel region.
    Hover,
    /// Explicit play/pause control.
    Toggle,
}

/// OR-merge of every pause trigger. Triggers are not counted: holding the
/// same reason twice is the same as holding it once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PauseGate {
    hover: bool,
    toggle: bool,
}

impl PauseGate {
    pub fn is_paused(&self) -> bool {
        self.hover || self.toggle
    }

    pub fn holds(&self, reason: PauseReason) -> bool {
        match reason {
            PauseReason::Hover => self.hover,
            PauseReason::Toggle => self.toggle,
        }
    }

    /// Updates one trigger and reports whether the merged state flipped.
    pub fn set(&mut self, reason: PauseReason, paused: bool) -> bool {
        let before = self.is_paused();
        match reason {
            PauseReason::Hover => self.hover = paused,
            PauseReason::Toggle => self.toggle = paused,
        }
        before != self.is_paused()
    }
}

/// Inputs of the carousel state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    Mount { viewport_width: u32 },
    Resize { viewport_width: u32 },
    /// The repeating progress timer fired.
    Tick,
    /// The single-shot autoplay deadline fired.
    Deadline,
    Next,
    Prev,
    GoTo(usize),
    /// `ran_ms` is the running time since the last tick, or since autoplay
    /// was armed. It is credited to progress when the event pauses the
    /// carousel.
    SetPaused { reason: PauseReason, paused: bool, ran_ms: u64 },
    TogglePaused { ran_ms: u64 },
    Unmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Unmounted,
    Mounted,
    Disposed,
}

/// Externally visible autoplay phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not mounted, single page or degenerate timing: nothing is scheduled.
    Inert,
    Running,
    Paused,
}

/// View state of one carousel instance.
///
/// Progress is tracked as accumulated running time for the current page
/// visit, so a resumed page only waits for what is left of its budget.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    slide_count: usize,
    settings: AutoplaySettings,
    lifecycle: Lifecycle,
    items_per_view: usize,
    current_page: usize,
    elapsed_ms: u64,
    pause: PauseGate,
    tick_pending: bool,
    deadline_pending: bool,
}

impl CarouselState {
    pub fn new(slide_count: usize, settings: AutoplaySettings) -> Self {
        Self {
            slide_count,
            settings,
            lifecycle: Lifecycle::Unmounted,
            items_per_view: 1,
            current_page: 0,
            elapsed_ms: 0,
            pause: PauseGate::default(),
            tick_pending: false,
            deadline_pending: false,
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn items_per_view(&self) -> usize {
        self.items_per_view
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.slide_count, self.items_per_view)
    }

    /// Current page, clamped into `[0, total_pages)`.
    pub fn current_page(&self) -> usize {
        let last = self.total_pages() - 1;
        if self.current_page > last {
            if cfg!(debug_assertions) {
                warn!(page = self.current_page, last, "carousel page index out of range, clamping");
            }
            return last;
        }
        self.current_page
    }

    /// Percentage of the autoplay duration elapsed on the current page,
    /// clamped into `[0, 100]`.
    pub fn progress(&self) -> f64 {
        if self.settings.duration_ms == 0 {
            return 0.0;
        }
        let raw = self.elapsed_ms as f64 * 100.0 / self.settings.duration_ms as f64;
        if !(0.0..=100.0).contains(&raw) {
            if cfg!(debug_assertions) {
                warn!(raw, "carousel progress out of range, clamping");
            }
            return raw.clamp(0.0, 100.0);
        }
        raw
    }

    /// Running time accumulated on the current page visit.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    pub fn pause_gate(&self) -> PauseGate {
        self.pause
    }

    pub fn phase(&self) -> Phase {
        if !self.autoplay_enabled() {
            Phase::Inert
        } else if self.pause.is_paused() {
            Phase::Paused
        } else {
            Phase::Running
        }
    }

    pub fn has_pending_timers(&self) -> bool {
        self.tick_pending || self.deadline_pending
    }

    /// Pure form of [`CarouselState::apply`]: returns the next state and the
    /// timer work, leaving `self` untouched.
    pub fn transition(&self, event: CarouselEvent) -> (Self, Vec<CarouselAction>) {
        let mut next = self.clone();
        let actions = next.apply(event);
        (next, actions)
    }

    /// Applies one event and returns the timer actions to perform, in order.
    pub fn apply(&mut self, event: CarouselEvent) -> Vec<CarouselAction> {
        let mut actions = Vec::new();

        if self.lifecycle == Lifecycle::Disposed {
            trace!(?event, "carousel disposed, ignoring event");
            return actions;
        }

        match event {
            CarouselEvent::Mount { viewport_width } => {
                if self.lifecycle == Lifecycle::Mounted {
                    debug!("carousel already mounted");
                    return actions;
                }
                self.lifecycle = Lifecycle::Mounted;
                self.items_per_view = items_per_view(viewport_width);
                self.current_page = 0;
                self.elapsed_ms = 0;
                debug!(
                    items_per_view = self.items_per_view,
                    total_pages = self.total_pages(),
                    "carousel mounted"
                );
                self.restart(&mut actions);
            }
            CarouselEvent::Resize { viewport_width } => {
                if self.lifecycle != Lifecycle::Mounted {
                    return actions;
                }
                self.resize(viewport_width, &mut actions);
            }
            CarouselEvent::Tick => {
                if !self.tick_pending {
                    trace!("stale carousel tick");
                    return actions;
                }
                let step = self.settings.tick_interval_ms.max(1);
                self.elapsed_ms = (self.elapsed_ms + step).min(self.settings.duration_ms);
            }
            CarouselEvent::Deadline => {
                if !self.deadline_pending {
                    trace!("stale carousel deadline");
                    return actions;
                }
                self.deadline_pending = false;
                let target = (self.current_page + 1) % self.total_pages();
                debug!(from = self.current_page, to = target, "autoplay advance");
                self.enter_page(target, &mut actions);
            }
            CarouselEvent::Next => {
                if self.lifecycle == Lifecycle::Mounted {
                    let target = (self.current_page() + 1) % self.total_pages();
                    self.enter_page(target, &mut actions);
                }
            }
            CarouselEvent::Prev => {
                if self.lifecycle == Lifecycle::Mounted {
                    let total = self.total_pages();
                    let target = (self.current_page() + total - 1) % total;
                    self.enter_page(target, &mut actions);
                }
            }
            CarouselEvent::GoTo(page) => {
                if self.lifecycle == Lifecycle::Mounted {
                    let target = page.min(self.total_pages() - 1);
                    self.enter_page(target, &mut actions);
                }
            }
            CarouselEvent::SetPaused { reason, paused, ran_ms } => {
                self.set_paused(reason, paused, ran_ms, &mut actions);
            }
            CarouselEvent::TogglePaused { ran_ms } => {
                let held = self.pause.holds(PauseReason::Toggle);
                self.set_paused(PauseReason::Toggle, !held, ran_ms, &mut actions);
            }
            CarouselEvent::Unmount => {
                self.stop(&mut actions);
                self.lifecycle = Lifecycle::Disposed;
                debug!("carousel unmounted");
            }
        }

        actions
    }

    fn autoplay_enabled(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
            && self.total_pages() > 1
            && self.settings.duration_ms > 0
    }

    fn is_runnable(&self) -> bool {
        self.autoplay_enabled() && !self.pause.is_paused()
    }

    /// Moves to `target` with a fresh interval, whether or not the index
    /// actually changed.
    fn enter_page(&mut self, target: usize, actions: &mut Vec<CarouselAction>) {
        self.current_page = target;
        self.elapsed_ms = 0;
        self.restart(actions);
    }

    fn resize(&mut self, viewport_width: u32, actions: &mut Vec<CarouselAction>) {
        let per_view = items_per_view(viewport_width);
        if per_view == self.items_per_view {
            return;
        }
        let was_runnable = self.is_runnable();
        self.items_per_view = per_view;

        let last = self.total_pages() - 1;
        debug!(items_per_view = per_view, total_pages = last + 1, "carousel resized");
        if self.current_page > last {
            self.enter_page(last, actions);
        } else if was_runnable != self.is_runnable() {
            self.restart(actions);
        }
    }

    fn set_paused(&mut self, reason: PauseReason, paused: bool, ran_ms: u64, actions: &mut Vec<CarouselAction>) {
        if !self.pause.set(reason, paused) {
            return;
        }
        if self.pause.is_paused() {
            if self.tick_pending {
                // Time since the last tick; a longer gap would have ticked.
                let ran = ran_ms.min(self.settings.tick_interval_ms.max(1));
                self.elapsed_ms = (self.elapsed_ms + ran).min(self.settings.duration_ms);
            }
            debug!(?reason, elapsed_ms = self.elapsed_ms, "carousel paused");
            self.stop(actions);
        } else {
            debug!(?reason, elapsed_ms = self.elapsed_ms, "carousel resumed");
            self.restart(actions);
        }
    }

    /// Cancels whatever is pending, then arms tick and deadline for the
    /// remaining budget when autoplay may run.
    fn restart(&mut self, actions: &mut Vec<CarouselAction>) {
        self.stop(actions);
        if !self.is_runnable() {
            return;
        }

        let remaining = self.settings.duration_ms.saturating_sub(self.elapsed_ms);
        let after_ms = remaining.max(self.settings.min_deadline_ms).max(1);
        actions.push(TimerAction::Repeat {
            timer: CarouselTimer::Tick,
            every_ms: self.settings.tick_interval_ms.max(1),
        });
        actions.push(TimerAction::Once {
            timer: CarouselTimer::Deadline,
            after_ms,
        });
        self.tick_pending = true;
        self.deadline_pending = true;
        trace!(page = self.current_page, after_ms, "autoplay scheduled");
    }

    fn stop(&mut self, actions: &mut Vec<CarouselAction>) {
        if self.tick_pending {
            actions.push(TimerAction::Cancel(CarouselTimer::Tick));
            self.tick_pending = false;
        }
        if self.deadline_pending {
            actions.push(TimerAction::Cancel(CarouselTimer::Deadline));
            self.deadline_pending = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: u32 = 1280;
    const MEDIUM: u32 = 800;
    const NARROW: u32 = 400;

    fn mounted(slides: usize, width: u32) -> CarouselState {
        let mut state = CarouselState::new(slides, AutoplaySettings::default());
        state.apply(CarouselEvent::Mount { viewport_width: width });
        state
    }

    fn schedules(actions: &[CarouselAction]) -> Vec<CarouselAction> {
        actions.iter().copied().filter(|a| !a.is_cancel()).collect()
    }

    #[test]
    fn test_mount_schedules_tick_and_deadline() {
        let mut state = CarouselState::new(9, AutoplaySettings::default());
        let actions = state.apply(CarouselEvent::Mount { viewport_width: WIDE });

        assert_eq!(
            actions,
            vec![
                TimerAction::Repeat { timer: CarouselTimer::Tick, every_ms: 50 },
                TimerAction::Once { timer: CarouselTimer::Deadline, after_ms: 5_000 },
            ]
        );
        assert_eq!(state.items_per_view(), 3);
        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.current_page(), 0);
        assert_eq!(state.phase(), Phase::Running);
    }

    #[test]
    fn test_wrap_around() {
        let mut state = mounted(9, WIDE);
        state.apply(CarouselEvent::Prev);
        assert_eq!(state.current_page(), 2);
        state.apply(CarouselEvent::Next);
        assert_eq!(state.current_page(), 0);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut state = mounted(9, WIDE);
        state.apply(CarouselEvent::GoTo(42));
        assert_eq!(state.current_page(), 2);
        state.apply(CarouselEvent::GoTo(1));
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_manual_navigation_resets_progress_and_timers() {
        let mut state = mounted(9, WIDE);
        for _ in 0..20 {
            state.apply(CarouselEvent::Tick);
        }
        assert_eq!(state.progress(), 20.0);

        let actions = state.apply(CarouselEvent::GoTo(0));
        assert_eq!(state.current_page(), 0);
        assert_eq!(state.progress(), 0.0);
        assert_eq!(
            actions,
            vec![
                TimerAction::Cancel(CarouselTimer::Tick),
                TimerAction::Cancel(CarouselTimer::Deadline),
                TimerAction::Repeat { timer: CarouselTimer::Tick, every_ms: 50 },
                TimerAction::Once { timer: CarouselTimer::Deadline, after_ms: 5_000 },
            ]
        );
    }

    #[test]
    fn test_deadline_advances_and_resets() {
        let mut state = mounted(9, WIDE);
        for _ in 0..100 {
            state.apply(CarouselEvent::Tick);
        }
        assert_eq!(state.progress(), 100.0);

        let actions = state.apply(CarouselEvent::Deadline);
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.progress(), 0.0);
        // The fired deadline is gone; only the tick needs cancelling.
        assert_eq!(actions[0], TimerAction::Cancel(CarouselTimer::Tick));
        assert_eq!(schedules(&actions).len(), 2);
    }

    #[test]
    fn test_progress_capped_at_hundred() {
        let mut state = mounted(9, WIDE);
        for _ in 0..500 {
            state.apply(CarouselEvent::Tick);
        }
        assert_eq!(state.progress(), 100.0);
        assert_eq!(state.elapsed_ms(), 5_000);
    }

    #[test]
    fn test_pause_freezes_progress() {
        let mut state = mounted(9, WIDE);
        for _ in 0..10 {
            state.apply(CarouselEvent::Tick);
        }
        let actions = state.apply(CarouselEvent::SetPaused { reason: PauseReason::Hover, paused: true, ran_ms: 0 });
        assert_eq!(
            actions,
            vec![
                TimerAction::Cancel(CarouselTimer::Tick),
                TimerAction::Cancel(CarouselTimer::Deadline),
            ]
        );

        // Late ticks from a cancelled timer must not move progress.
        for _ in 0..50 {
            state.apply(CarouselEvent::Tick);
        }
        state.apply(CarouselEvent::Deadline);
        assert_eq!(state.progress(), 10.0);
        assert_eq!(state.current_page(), 0);
        assert_eq!(state.phase(), Phase::Paused);
    }

    #[test]
    fn test_pause_credits_time_since_last_tick() {
        let mut state = mounted(9, WIDE);
        for _ in 0..10 {
            state.apply(CarouselEvent::Tick);
        }
        state.apply(CarouselEvent::SetPaused { reason: PauseReason::Hover, paused: true, ran_ms: 37 });
        assert_eq!(state.elapsed_ms(), 537);
        assert!(state.pause_gate().holds(PauseReason::Hover));
        assert!(!state.pause_gate().holds(PauseReason::Toggle));

        // Already paused: the merged gate does not flip, nothing is credited.
        state.apply(CarouselEvent::TogglePaused { ran_ms: 20 });
        assert_eq!(state.elapsed_ms(), 537);

        state.apply(CarouselEvent::TogglePaused { ran_ms: 0 });
        let actions = state.apply(CarouselEvent::SetPaused { reason: PauseReason::Hover, paused: false, ran_ms: 0 });
        assert!(actions.contains(&TimerAction::Once { timer: CarouselTimer::Deadline, after_ms: 4_463 }));

        // A gap longer than one tick is never credited past the tick it missed.
        state.apply(CarouselEvent::TogglePaused { ran_ms: 900 });
        assert_eq!(state.elapsed_ms(), 587);
    }

    #[test]
    fn test_short_pause_cycles_still_reach_the_deadline() {
        let mut state = mounted(9, WIDE);
        let mut cycles = 0;
        while state.current_page() == 0 {
            state.apply(CarouselEvent::SetPaused { reason: PauseReason::Hover, paused: true, ran_ms: 49 });
            let actions = state.apply(CarouselEvent::SetPaused { reason: PauseReason::Hover, paused: false, ran_ms: 0 });
            let deadline = actions.iter().find_map(|a| match a {
                TimerAction::Once { after_ms, .. } => Some(*after_ms),
                _ => None,
            });
            if deadline == Some(state.settings.min_deadline_ms) {
                state.apply(CarouselEvent::Deadline);
            }
            cycles += 1;
            assert!(cycles <= 110, "running budget never ran out");
        }
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_resume_schedules_remaining_time() {
        let mut state = mounted(9, WIDE);
        for _ in 0..50 {
            state.apply(CarouselEvent::Tick);
        }
        state.apply(CarouselEvent::TogglePaused { ran_ms: 0 });
        let actions = state.apply(CarouselEvent::TogglePaused { ran_ms: 0 });
        assert_eq!(
            actions,
            vec![
                TimerAction::Repeat { timer: CarouselTimer::Tick, every_ms: 50 },
                TimerAction::Once { timer: CarouselTimer::Deadline, after_ms: 2_500 },
            ]
        );
    }

    #[test]
    fn test_resume_at_full_progress_respects_minimum_delay() {
        let mut state = mounted(9, WIDE);
        for _ in 0..100 {
            state.apply(CarouselEvent::Tick);
        }
        state.apply(CarouselEvent::TogglePaused { ran_ms: 0 });
        let actions = state.apply(CarouselEvent::TogglePaused { ran_ms: 0 });
        assert!(actions.contains(&TimerAction::Once { timer: CarouselTimer::Deadline, after_ms: 100 }));
    }

    #[test]
    fn test_set_paused_is_idempotent() {
        let mut state = mounted(9, WIDE);
        let first = state.apply(CarouselEvent::SetPaused { reason: PauseReason::Toggle, paused: true, ran_ms: 0 });
        assert_eq!(first.len(), 2);
        let second = state.apply(CarouselEvent::SetPaused { reason: PauseReason::Toggle, paused: true, ran_ms: 0 });
        assert!(second.is_empty());

        state.apply(CarouselEvent::SetPaused { reason: PauseReason::Toggle, paused: false, ran_ms: 0 });
        let again = state.apply(CarouselEvent::SetPaused { reason: PauseReason::Toggle, paused: false, ran_ms: 0 });
        assert!(again.is_empty());
    }

    #[test]
    fn test_pause_triggers_are_merged() {
        let mut state = mounted(9, WIDE);
        state.apply(CarouselEvent::SetPaused { reason: PauseReason::Hover, paused: true, ran_ms: 0 });
        let actions = state.apply(CarouselEvent::TogglePaused { ran_ms: 0 });
        assert!(actions.is_empty());
        assert!(state.is_paused());

        let actions = state.apply(CarouselEvent::SetPaused { reason: PauseReason::Hover, paused: false, ran_ms: 0 });
        assert!(actions.is_empty());
        assert!(state.is_paused(), "explicit pause still held");

        let actions = state.apply(CarouselEvent::TogglePaused { ran_ms: 0 });
        assert_eq!(schedules(&actions).len(), 2);
        assert!(!state.is_paused());
    }

    #[test]
    fn test_navigation_while_paused_schedules_nothing() {
        let mut state = mounted(9, WIDE);
        for _ in 0..30 {
            state.apply(CarouselEvent::Tick);
        }
        state.apply(CarouselEvent::TogglePaused { ran_ms: 0 });
        let actions = state.apply(CarouselEvent::Next);
        assert!(actions.is_empty());
        assert_eq!(state.current_page(), 1);
        assert_eq!(state.progress(), 0.0);
        assert!(!state.has_pending_timers());
    }

    #[test]
    fn test_single_page_is_inert() {
        let mut state = CarouselState::new(3, AutoplaySettings::default());
        let actions = state.apply(CarouselEvent::Mount { viewport_width: WIDE });
        assert!(actions.is_empty());
        assert_eq!(state.total_pages(), 1);
        assert_eq!(state.phase(), Phase::Inert);

        assert!(state.apply(CarouselEvent::Next).is_empty());
        assert_eq!(state.current_page(), 0);
        assert!(state.apply(CarouselEvent::Deadline).is_empty());
        assert_eq!(state.current_page(), 0);
    }

    #[test]
    fn test_degenerate_inputs_are_inert() {
        let mut empty = CarouselState::new(0, AutoplaySettings::default());
        assert!(empty.apply(CarouselEvent::Mount { viewport_width: WIDE }).is_empty());
        assert_eq!(empty.total_pages(), 1);
        assert_eq!(empty.current_page(), 0);

        let settings = AutoplaySettings { duration_ms: 0, ..AutoplaySettings::default() };
        let mut frozen = CarouselState::new(9, settings);
        assert!(frozen.apply(CarouselEvent::Mount { viewport_width: WIDE }).is_empty());
        assert_eq!(frozen.progress(), 0.0);
        frozen.apply(CarouselEvent::Next);
        assert_eq!(frozen.current_page(), 1);
        assert!(!frozen.has_pending_timers());
    }

    #[test]
    fn test_resize_reclamps_index() {
        let mut state = mounted(9, MEDIUM);
        assert_eq!(state.total_pages(), 5);
        state.apply(CarouselEvent::GoTo(4));
        for _ in 0..10 {
            state.apply(CarouselEvent::Tick);
        }

        // 2 per view -> 3 per view: 5 pages -> 3 pages.
        state.apply(CarouselEvent::Resize { viewport_width: WIDE });
        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.current_page(), 2);
        assert_eq!(state.progress(), 0.0);
    }

    #[test]
    fn test_resize_without_clamp_keeps_progress() {
        let mut state = mounted(9, NARROW);
        for _ in 0..10 {
            state.apply(CarouselEvent::Tick);
        }
        let actions = state.apply(CarouselEvent::Resize { viewport_width: MEDIUM });
        assert!(actions.is_empty());
        assert_eq!(state.current_page(), 0);
        assert_eq!(state.progress(), 10.0);
    }

    #[test]
    fn test_resize_into_single_page_stops_autoplay() {
        let mut state = mounted(3, NARROW);
        assert_eq!(state.phase(), Phase::Running);
        let actions = state.apply(CarouselEvent::Resize { viewport_width: WIDE });
        assert_eq!(
            actions,
            vec![
                TimerAction::Cancel(CarouselTimer::Tick),
                TimerAction::Cancel(CarouselTimer::Deadline),
            ]
        );
        assert_eq!(state.phase(), Phase::Inert);
    }

    #[test]
    fn test_index_stays_in_bounds() {
        let widths = [NARROW, MEDIUM, WIDE, MEDIUM, NARROW, WIDE];
        let mut state = mounted(7, NARROW);
        for step in 0..300usize {
            let event = match step % 6 {
                0 => CarouselEvent::Next,
                1 => CarouselEvent::Prev,
                2 => CarouselEvent::GoTo(step % 11),
                3 => CarouselEvent::Resize { viewport_width: widths[step % widths.len()] },
                4 => CarouselEvent::Deadline,
                _ => CarouselEvent::Tick,
            };
            let before = state.current_page();
            state.apply(event);
            assert!(state.current_page < state.total_pages(), "raw index escaped at step {step}");
            if state.current_page() != before {
                assert_eq!(state.progress(), 0.0);
            }
        }
    }

    #[test]
    fn test_unmount_cancels_and_disposes() {
        let mut state = mounted(9, WIDE);
        let actions = state.apply(CarouselEvent::Unmount);
        assert_eq!(actions.len(), 2);
        assert!(!state.has_pending_timers());
        assert_eq!(state.lifecycle(), Lifecycle::Disposed);

        assert!(state.apply(CarouselEvent::Mount { viewport_width: WIDE }).is_empty());
        assert!(state.apply(CarouselEvent::TogglePaused { ran_ms: 0 }).is_empty());
        assert!(state.apply(CarouselEvent::Next).is_empty());
    }

    #[test]
    fn test_events_before_mount_are_ignored() {
        let mut state = CarouselState::new(9, AutoplaySettings::default());
        assert!(state.apply(CarouselEvent::Next).is_empty());
        assert!(state.apply(CarouselEvent::Tick).is_empty());
        assert_eq!(state.current_page(), 0);
        assert_eq!(state.phase(), Phase::Inert);
    }

    #[test]
    fn test_transition_leaves_original_untouched() {
        let state = mounted(9, WIDE);
        let (next, actions) = state.transition(CarouselEvent::Next);
        assert_eq!(state.current_page(), 0);
        assert_eq!(next.current_page(), 1);
        assert_eq!(actions.len(), 4);
    }
}
