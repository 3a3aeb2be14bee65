use crate::application::{App, AppMode};
use crate::domain::{STORY_STEPS, ToastRequest};
use crate::presentation::ui::{contains, dot_at, help_line_count, screen_layout};
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

const SAMPLE_TOASTS: [(&str, &str); 3] = [
    ("Subscribed", "You will receive our next newsletter."),
    ("Request sent", "We will get back to you within one business day."),
    ("Catalog ready", "The offer catalog has been prepared for download."),
];

pub struct InputHandler;

impl InputHandler {
    /// Brings the application clock up to `now`, then dispatches `event`.
    /// Timers armed by the handlers count from the moment of the input.
    ///
    /// Returns `false` once the user asked to quit.
    pub fn handle_event(app: &mut App, event: Event, now: u64) -> bool {
        app.advance_to(now);
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Char('q') && app.mode == AppMode::Normal {
                    return false;
                }
                Self::handle_key_event(app, key.code, key.modifiers);
            }
            Event::Mouse(mouse) => Self::handle_mouse_event(app, mouse),
            Event::Resize(cols, rows) => app.resize(cols, rows),
            _ => {}
        }
        true
    }

    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }

        app.status_message = None;

        match key {
            KeyCode::Left | KeyCode::Char('h') => app.prev_page(),
            KeyCode::Right | KeyCode::Char('l') => app.next_page(),
            KeyCode::Char(c @ '1'..='9') => {
                // Digits are one-based on screen.
                let page = c as usize - '1' as usize;
                app.go_to_page(page);
            }
            KeyCode::Char(' ') => app.toggle_pause(),
            KeyCode::Char('a') => app.start_reveal(),
            KeyCode::Esc => app.close_reveal(),
            KeyCode::Char('s') => {
                let next = (app.story.current() + 1) % STORY_STEPS.len();
                app.select_story_step(next);
            }
            KeyCode::Char('n') => {
                let (title, description) = SAMPLE_TOASTS[app.notifications.toasts().len() % SAMPLE_TOASTS.len()];
                app.publish_toast(ToastRequest::success(title).with_description(description));
            }
            KeyCode::Char('x') => app.dismiss_newest_toast(),
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        let max_scroll = help_line_count().saturating_sub(1);
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
                app.help_scroll = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll = (app.help_scroll + 1).min(max_scroll);
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll = (app.help_scroll + 5).min(max_scroll);
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    /// Hover over the cards holds autoplay; a left click on a page dot jumps
    /// to that page.
    pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
        if app.mode != AppMode::Normal {
            return;
        }
        let layout = screen_layout(Rect::new(0, 0, app.viewport_cols, app.viewport_rows));

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                app.set_hover(contains(layout.carousel, mouse.column, mouse.row));
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let (pages, current) = (app.carousel.total_pages(), app.carousel.current_page());
                if let Some(page) = dot_at(layout.indicators, pages, current, mouse.column, mouse.row) {
                    app.go_to_page(page);
                }
            }
            _ => {}
        }
    }
}
