use crate::application::{App, AppMode};
use crate::domain::{FLOW_STEP_LABELS, PauseReason, Phase, STORY_STEPS, Slide, Toast, ToastPhase, ToastVariant};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

/// Width of the current page's indicator, which carries the progress gauge.
pub const ACTIVE_DOT_WIDTH: u16 = 10;
/// Width of every other page indicator.
pub const DOT_WIDTH: u16 = 3;
const DOT_GAP: u16 = 1;
const TOAST_WIDTH: u16 = 42;
const TOAST_HEIGHT: u16 = 5;

/// Regions of the main screen. Shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub carousel: Rect,
    pub indicators: Rect,
    pub sections: Rect,
    pub status: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(9),
            Constraint::Length(3),
        ])
        .split(area);

    ScreenLayout {
        header: chunks[0],
        carousel: chunks[1],
        indicators: chunks[2],
        sections: chunks[3],
        status: chunks[4],
    }
}

/// Cell rectangles of the page indicators, centred inside the indicator bar.
///
/// The current page gets the wide indicator. When the bar is too narrow the
/// indicators shrink, down to one cell each without gaps; only then are the
/// trailing ones dropped.
pub fn dot_rects(indicators: Rect, total_pages: usize, current: usize) -> Vec<Rect> {
    let inner = inset(indicators);
    if total_pages == 0 || inner.height == 0 {
        return Vec::new();
    }
    let pages = u16::try_from(total_pages).unwrap_or(u16::MAX);
    let row_width =
        |active: u16, idle: u16, gap: u16| active.saturating_add((pages - 1).saturating_mul(idle.saturating_add(gap)));
    let (active, idle, gap) = [
        (ACTIVE_DOT_WIDTH, DOT_WIDTH, DOT_GAP),
        (DOT_WIDTH, DOT_WIDTH, DOT_GAP),
        (1, 1, DOT_GAP),
        (1, 1, 0),
    ]
    .into_iter()
    .find(|&(active, idle, gap)| row_width(active, idle, gap) <= inner.width)
    .unwrap_or((1, 1, 0));

    let needed = row_width(active, idle, gap);
    let right = inner.x.saturating_add(inner.width);
    let mut x = inner.x.saturating_add(inner.width.saturating_sub(needed) / 2);
    let mut rects = Vec::with_capacity(total_pages);
    for page in 0..total_pages {
        let width = if page == current { active } else { idle };
        if x.saturating_add(width) > right {
            break;
        }
        rects.push(Rect { x, y: inner.y, width, height: 1 });
        x = x.saturating_add(width).saturating_add(gap);
    }
    rects
}

/// Page indicator under the given cell, if any.
pub fn dot_at(indicators: Rect, total_pages: usize, current: usize, column: u16, row: u16) -> Option<usize> {
    dot_rects(indicators, total_pages, current)
        .iter()
        .position(|r| contains(*r, column, row))
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

fn inset(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub fn render_ui(f: &mut Frame, app: &App) {
    let layout = screen_layout(f.area());

    render_header(f, app, layout.header);
    render_carousel(f, app, layout.carousel);
    render_indicators(f, app, layout.indicators);
    render_sections(f, app, layout.sections);
    render_status_bar(f, app, layout.status);
    render_toasts(f, app, f.area(), layout.status.height);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "showreel - High Vision | Page {}/{} | {} per view",
        app.carousel.current_page() + 1,
        app.carousel.total_pages(),
        app.carousel.items_per_view()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_carousel(f: &mut Frame, app: &App, area: Rect) {
    let gate = app.carousel.pause_gate();
    let title = match app.carousel.phase() {
        Phase::Paused if gate.holds(PauseReason::Toggle) => "Structured offers, measurable impact [paused]",
        Phase::Paused => "Structured offers, measurable impact [hover]",
        _ => "Structured offers, measurable impact",
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let per_view = app.carousel.items_per_view().max(1);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, per_view as u32); per_view])
        .split(inner);

    if app.deck.is_empty() {
        let empty = Paragraph::new("No slides to show")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, inner);
        return;
    }

    for (slide, column) in app.visible_slides().iter().zip(columns.iter()) {
        render_card(f, slide, *column);
    }
}

fn render_card(f: &mut Frame, slide: &Slide, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            slide.category.clone(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        )),
        Line::from(Span::styled(
            slide.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(slide.description.clone()),
        Line::from(""),
        Line::from(Span::styled(slide.image.clone(), Style::default().fg(Color::DarkGray))),
    ];
    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Blue)))
        .wrap(Wrap { trim: true });
    f.render_widget(card, area);
}

fn render_indicators(f: &mut Frame, app: &App, area: Rect) {
    let toggle = if app.carousel.is_paused() { "space: resume" } else { "space: pause" };
    f.render_widget(Block::default().borders(Borders::ALL).title(toggle), area);

    let current = app.carousel.current_page();
    for (page, rect) in dot_rects(area, app.carousel.total_pages(), current).into_iter().enumerate() {
        if page == current {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Blue).bg(Color::Gray))
                .ratio(app.carousel.progress() / 100.0)
                .label("");
            f.render_widget(gauge, rect);
        } else {
            let dot = Paragraph::new("●")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            f.render_widget(dot, rect);
        }
    }
}

fn render_sections(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_how_we_work(f, app, chunks[0]);
    render_story(f, app, chunks[1]);
}

fn render_how_we_work(f: &mut Frame, app: &App, area: Rect) {
    let frame = app.reveal.current();
    let lines: Vec<Line> = FLOW_STEP_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let style = if i == usize::from(frame.step) {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else if i < usize::from(frame.step) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!(" {}. {label} ", i + 1), style))
        })
        .collect();

    let title = if app.reveal.is_playing() { "How we work (playing)" } else { "How we work - a: play" };
    let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(panel, area);

    if frame.show_overlay {
        let popup = Rect {
            x: area.x + area.width / 8,
            y: area.y + 1,
            width: area.width * 3 / 4,
            height: area.height.saturating_sub(2).min(5),
        };
        f.render_widget(Clear, popup);
        let overlay = Paragraph::new(vec![
            Line::from(Span::styled("From chaos to clarity.", Style::default().add_modifier(Modifier::BOLD))),
            Line::from("Let's talk about your project."),
            Line::from(Span::styled("Esc: close", Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));
        f.render_widget(overlay, popup);
    }
}

fn render_story(f: &mut Frame, app: &App, area: Rect) {
    let step = &STORY_STEPS[app.story.current() % STORY_STEPS.len()];
    let dots: String = (0..STORY_STEPS.len())
        .map(|i| if i == app.story.current() { '●' } else { '○' })
        .collect();
    let lines = vec![
        Line::from(Span::styled(step.era, Style::default().fg(Color::Yellow))),
        Line::from(Span::styled(step.title, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(step.concept),
        Line::from(""),
        Line::from(dots),
    ];
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Our story - s: next step"));
    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match app.mode {
        AppMode::Normal => app.status_message.clone().unwrap_or_else(|| {
            "←/→: prev/next | 1-9: page | space: pause | a: animate | n: toast | x: dismiss | ?: help | q: quit"
                .to_string()
        }),
        AppMode::Help => "↑↓/jk: scroll | Home: top | Esc/q: close help".to_string(),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_toasts(f: &mut Frame, app: &App, area: Rect, bottom_margin: u16) {
    let mut bottom = area.y + area.height.saturating_sub(bottom_margin);
    for toast in app.notifications.toasts().iter().rev() {
        if bottom < area.y + TOAST_HEIGHT {
            break;
        }
        let rect = Rect {
            x: area.x + area.width.saturating_sub(TOAST_WIDTH + 1),
            y: bottom - TOAST_HEIGHT,
            width: TOAST_WIDTH.min(area.width),
            height: TOAST_HEIGHT,
        };
        render_toast(f, toast, app.now(), rect);
        bottom -= TOAST_HEIGHT;
    }
}

fn render_toast(f: &mut Frame, toast: &Toast, now: u64, area: Rect) {
    let accent = match toast.variant {
        ToastVariant::Default => Color::White,
        ToastVariant::Success => Color::Green,
        ToastVariant::Error => Color::Red,
    };
    let text_style = match toast.phase {
        ToastPhase::Visible => Style::default().fg(accent),
        ToastPhase::Entering | ToastPhase::Leaving => Style::default().fg(accent).add_modifier(Modifier::DIM),
    };

    let bar_width = usize::from(area.width.saturating_sub(2));
    let filled = (toast.remaining_percent(now) / 100.0 * bar_width as f64).round() as usize;
    let lines = vec![
        Line::from(Span::styled(
            toast.title.clone().unwrap_or_default(),
            text_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(toast.description.clone().unwrap_or_default(), text_style)),
        Line::from(Span::styled("▔".repeat(filled.min(bar_width)), Style::default().fg(accent))),
    ];

    f.render_widget(Clear, area);
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(if toast.is_alert() { "alert" } else { "notice" }),
    );
    f.render_widget(widget, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("showreel Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

/// Number of lines in the help text, for scroll bounds.
pub fn help_line_count() -> usize {
    HELP_TEXT.lines().count()
}

const HELP_TEXT: &str = r#"SHOWREEL - HIGH VISION SHOWCASE

=== CAROUSEL ===
←/h             Previous page (restarts the autoplay interval)
→/l             Next page (restarts the autoplay interval)
1-9             Jump to a page
Click a dot     Jump to that page
space           Pause / resume autoplay
Mouse over      Holds autoplay while the pointer is on the cards

Pages advance automatically every 5 seconds. Pausing keeps the
progress bar where it is; resuming only waits for what is left.
Hover and the pause key are independent: both must be released
before autoplay continues.

The number of cards per page follows the terminal width:
  < 96 columns      1 card
  96-127 columns    2 cards
  >= 128 columns    3 cards

=== HOW WE WORK ===
a               Play the four-step animation
Esc             Close the closing overlay

=== OUR STORY ===
s               Select the next step (autoplay waits 2 seconds)

=== NOTIFICATIONS ===
n               Publish a sample notification
x               Dismiss the newest notification

=== GENERAL ===
F1 or ?         Show this help (scroll with ↑↓, PgUp/PgDn, Home)
q               Quit

Settings are read from the JSON file given as first argument.
Logs are written to showreel.log (filter with RUST_LOG)."#;
