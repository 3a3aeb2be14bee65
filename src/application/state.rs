//! Application state for the terminal showcase.
//!
//! The [`App`] owns every state machine on screen together with the single
//! timer queue that drives them. Input handlers call the operations below;
//! the event loop feeds elapsed time through [`App::advance_to`].

use tracing::{debug, info};

use crate::domain::{
    CarouselEvent, CarouselState, CarouselTimer, FlowFrame, NotificationService, PauseReason,
    RevealSequence, RevealTimer, STORY_STEPS, Slide, SlideDeck, StoryPlayer, StoryTimer,
    TOAST_ENTER_DELAY_MS, TOAST_EXIT_MS, TimerAction, ToastId, ToastRequest, how_we_work_sequence,
};
use crate::infrastructure::{ConfigError, ShowcaseConfig, TimerQueue};

/// Every timer slot the application can have pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    Carousel(CarouselTimer),
    Reveal,
    Story(StoryTimer),
    ToastEnter(ToastId),
    ToastExpire(ToastId),
    ToastRemove(ToastId),
}

impl TimerKey {
    fn is_toast(&self) -> bool {
        matches!(
            self,
            TimerKey::ToastEnter(_) | TimerKey::ToastExpire(_) | TimerKey::ToastRemove(_)
        )
    }
}

/// Represents the current mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Normal mode - carousel and section shortcuts are live
    Normal,
    /// Help screen is displayed
    Help,
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use showreel::application::App;
///
/// let mut app = App::default();
/// app.mount(160, 40);
/// assert_eq!(app.carousel.items_per_view(), 3);
/// assert_eq!(app.carousel.total_pages(), 3);
///
/// app.advance_to(2_500);
/// assert_eq!(app.carousel.progress(), 50.0);
/// ```
#[derive(Debug)]
pub struct App {
    /// Settings the application was started with
    pub config: ShowcaseConfig,
    /// Slides shown by the carousel
    pub deck: SlideDeck,
    /// Carousel view state
    pub carousel: CarouselState,
    /// Toast notifications
    pub notifications: NotificationService,
    /// "How we work" reveal animation
    pub reveal: RevealSequence<FlowFrame>,
    /// Story section stepper
    pub story: StoryPlayer,
    /// Current application mode
    pub mode: AppMode,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Terminal size in columns
    pub viewport_cols: u16,
    /// Terminal size in rows
    pub viewport_rows: u16,
    timers: TimerQueue<TimerKey>,
    now_ms: u64,
}

impl Default for App {
    fn default() -> Self {
        let config = ShowcaseConfig::default();
        let deck = SlideDeck::new(config.slides.clone()).unwrap_or_default();
        Self::with_deck(config, deck)
    }
}

impl App {
    /// Builds the application from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: ShowcaseConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let deck = config.deck()?;
        Ok(Self::with_deck(config, deck))
    }

    fn with_deck(config: ShowcaseConfig, deck: SlideDeck) -> Self {
        let carousel = CarouselState::new(deck.len(), config.autoplay());
        let notifications = NotificationService::start(config.toast_duration_ms);
        Self {
            config,
            deck,
            carousel,
            notifications,
            reveal: how_we_work_sequence(),
            story: StoryPlayer::new(STORY_STEPS.len()),
            mode: AppMode::Normal,
            help_scroll: 0,
            status_message: None,
            viewport_cols: 80,
            viewport_rows: 24,
            timers: TimerQueue::new(),
            now_ms: 0,
        }
    }

    /// Milliseconds since the application started.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Earliest pending timer, for the event loop's poll timeout.
    pub fn next_due(&self) -> Option<u64> {
        self.timers.next_due()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_timer_pending(&self, key: TimerKey) -> bool {
        self.timers.is_pending(key)
    }

    /// When the pending timer for `key` fires, if any.
    pub fn timer_due(&self, key: TimerKey) -> Option<u64> {
        self.timers.due_at(key)
    }

    /// Attaches the carousel and story section to a terminal of the given size.
    pub fn mount(&mut self, cols: u16, rows: u16) {
        self.viewport_cols = cols;
        self.viewport_rows = rows;
        let viewport_width = self.config.viewport_width(cols);
        self.drive_carousel(CarouselEvent::Mount { viewport_width });
        let actions = self.story.set_visible(true);
        self.run_actions(actions, TimerKey::Story);
        info!(cols, rows, viewport_width, "showcase mounted");
    }

    /// Terminal resize notification.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport_cols = cols;
        self.viewport_rows = rows;
        let viewport_width = self.config.viewport_width(cols);
        self.drive_carousel(CarouselEvent::Resize { viewport_width });
    }

    /// Runs every timer due at or before `now`, in order.
    pub fn advance_to(&mut self, now: u64) {
        while let Some((key, due)) = self.timers.pop_due(now) {
            self.now_ms = self.now_ms.max(due);
            self.fire(key);
        }
        self.now_ms = self.now_ms.max(now);
    }

    pub fn next_page(&mut self) {
        self.drive_carousel(CarouselEvent::Next);
    }

    pub fn prev_page(&mut self) {
        self.drive_carousel(CarouselEvent::Prev);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.drive_carousel(CarouselEvent::GoTo(page));
    }

    pub fn toggle_pause(&mut self) {
        let ran_ms = self.carousel_ran_ms();
        self.drive_carousel(CarouselEvent::TogglePaused { ran_ms });
        self.status_message = Some(if self.carousel.is_paused() {
            "Autoplay paused".to_string()
        } else {
            "Autoplay resumed".to_string()
        });
    }

    /// Pointer entered (`true`) or left (`false`) the carousel region.
    pub fn set_hover(&mut self, inside: bool) {
        let ran_ms = self.carousel_ran_ms();
        self.drive_carousel(CarouselEvent::SetPaused {
            reason: PauseReason::Hover,
            paused: inside,
            ran_ms,
        });
    }

    /// Slides on the page currently shown.
    pub fn visible_slides(&self) -> &[Slide] {
        self.deck
            .page(self.carousel.current_page(), self.carousel.items_per_view())
    }

    pub fn start_reveal(&mut self) {
        if let Some(action) = self.reveal.start() {
            self.run_actions([action], |_: RevealTimer| TimerKey::Reveal);
        }
    }

    pub fn close_reveal(&mut self) {
        if let Some(action) = self.reveal.close() {
            self.run_actions([action], |_: RevealTimer| TimerKey::Reveal);
        }
    }

    pub fn select_story_step(&mut self, step: usize) {
        let actions = self.story.select(step);
        self.run_actions(actions, TimerKey::Story);
    }

    /// Shows a toast and arms its entrance and expiry timers.
    pub fn publish_toast(&mut self, request: ToastRequest) -> Option<ToastId> {
        let id = self.notifications.publish(request, self.now_ms)?;
        let duration = self.notifications.get(id).map_or(0, |t| t.duration_ms);
        self.timers
            .schedule_once(TimerKey::ToastEnter(id), self.now_ms, TOAST_ENTER_DELAY_MS);
        self.timers
            .schedule_once(TimerKey::ToastExpire(id), self.now_ms, duration);
        Some(id)
    }

    /// Starts the exit animation of a toast; it is removed once it finishes.
    pub fn dismiss_toast(&mut self, id: ToastId) {
        if !self.notifications.begin_dismiss(id) {
            return;
        }
        self.timers.cancel(TimerKey::ToastEnter(id));
        self.timers.cancel(TimerKey::ToastExpire(id));
        self.timers
            .schedule_once(TimerKey::ToastRemove(id), self.now_ms, TOAST_EXIT_MS);
    }

    pub fn dismiss_newest_toast(&mut self) {
        if let Some(id) = self.notifications.newest_active() {
            self.dismiss_toast(id);
        }
    }

    /// Tears everything down. No timer survives this call.
    pub fn shutdown(&mut self) {
        self.drive_carousel(CarouselEvent::Unmount);
        if let Some(action) = self.reveal.cancel() {
            self.run_actions([action], |_: RevealTimer| TimerKey::Reveal);
        }
        let actions = self.story.set_visible(false);
        self.run_actions(actions, TimerKey::Story);
        self.timers.cancel_where(TimerKey::is_toast);
        self.notifications.shutdown();
        debug!(pending = self.timers.len(), "showcase shut down");
    }

    fn fire(&mut self, key: TimerKey) {
        match key {
            TimerKey::Carousel(CarouselTimer::Tick) => self.drive_carousel(CarouselEvent::Tick),
            TimerKey::Carousel(CarouselTimer::Deadline) => {
                self.drive_carousel(CarouselEvent::Deadline)
            }
            TimerKey::Reveal => {
                if let Some(action) = self.reveal.fire() {
                    self.run_actions([action], |_: RevealTimer| TimerKey::Reveal);
                }
            }
            TimerKey::Story(StoryTimer::Advance) => self.story.advance(),
            TimerKey::Story(StoryTimer::Resume) => {
                let actions = self.story.resume();
                self.run_actions(actions, TimerKey::Story);
            }
            TimerKey::ToastEnter(id) => {
                self.notifications.mark_visible(id);
            }
            TimerKey::ToastExpire(id) => self.dismiss_toast(id),
            TimerKey::ToastRemove(id) => {
                self.notifications.remove(id);
            }
        }
    }

    /// Running time since the carousel tick was last armed or fired.
    fn carousel_ran_ms(&self) -> u64 {
        self.timers
            .armed_at(TimerKey::Carousel(CarouselTimer::Tick))
            .map_or(0, |armed| self.now_ms.saturating_sub(armed))
    }

    fn drive_carousel(&mut self, event: CarouselEvent) {
        let actions = self.carousel.apply(event);
        self.run_actions(actions, TimerKey::Carousel);
    }

    fn run_actions<T: Copy>(
        &mut self,
        actions: impl IntoIterator<Item = TimerAction<T>>,
        key: impl Fn(T) -> TimerKey,
    ) {
        for action in actions {
            match action {
                TimerAction::Repeat { timer, every_ms } => {
                    self.timers.schedule_repeating(key(timer), self.now_ms, every_ms);
                }
                TimerAction::Once { timer, after_ms } => {
                    self.timers.schedule_once(key(timer), self.now_ms, after_ms);
                }
                TimerAction::Cancel(timer) => {
                    self.timers.cancel(key(timer));
                }
            }
        }
    }
}
