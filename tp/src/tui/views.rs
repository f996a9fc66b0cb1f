//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module is responsible
//! for drawing the UI based on AppState, but never modifies state.

use chrono::{Datelike, NaiveDate};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use super::state::{AlertDialog, AppState, DatePicker, FormField, InteractionMode, ResultScreen, Screen};
use crate::form::{INTEREST_TAGS, format_date};
use crate::present::{ResultSummary, activity_label};

mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const FOCUS: Color = Color::Rgb(255, 215, 0); // Gold
    pub const SELECTED: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const LOADING: Color = Color::Rgb(100, 149, 237); // Cornflower blue
    pub const WEATHER: Color = Color::Rgb(135, 206, 250); // Light sky blue
    pub const MONEY: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const DIM: Color = Color::DarkGray;
}

/// Width of the label column on the form
const LABEL_WIDTH: usize = 18;

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    trace!(screen = state.screen.display_name(), "render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    match &state.screen {
        Screen::Form => render_form(state, frame, chunks[1]),
        Screen::Result(result) => render_result(state, result, frame, chunks[1]),
    }

    render_footer(state, frame, chunks[2]);

    match &state.interaction_mode {
        InteractionMode::Help => render_help_overlay(frame, frame.area()),
        InteractionMode::DatePicker(picker) => render_date_picker(picker, frame, frame.area()),
        InteractionMode::Alert(alert) => render_alert(alert, frame, frame.area()),
        InteractionMode::Normal => {}
    }
}

/// Render header with app name and screen tabs
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            "Travemle",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
    ];

    let tabs = [
        ("Plan", matches!(state.screen, Screen::Form)),
        ("Itinerary", matches!(state.screen, Screen::Result(_))),
    ];
    for (i, (name, is_active)) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(colors::DIM)));
        }
        let style = if *is_active {
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::DIM)
        };
        spans.push(Span::styled(*name, style));
    }

    if state.form.loading {
        spans.push(Span::styled(" │ ", Style::default().fg(colors::DIM)));
        spans.push(Span::styled(loading_label(state), Style::default().fg(colors::LOADING)));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

/// "Packing… 3s" style label for an in-flight submission
fn loading_label(state: &AppState) -> String {
    match state.loading_started {
        Some(started) => format!("{}… {}s", state.loading_word, started.elapsed().as_secs()),
        None => format!("{}…", state.loading_word),
    }
}

/// Render the planning form
fn render_form(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!(focus = ?state.focus, "render_form: called");
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Plan Your Trip ")
        .border_style(Style::default().fg(colors::HEADER));

    let paragraph = Paragraph::new(form_lines(state)).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Form content, one line per field
fn form_lines(state: &AppState) -> Vec<Line<'static>> {
    let form = &state.form;
    let mut lines = vec![Line::from("")];

    for field in FormField::ALL {
        let focused = state.focus == field;
        let label_style = if focused {
            Style::default().fg(colors::FOCUS).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let marker = if focused { "▸ " } else { "  " };

        let mut spans = vec![Span::styled(marker.to_string(), Style::default().fg(colors::FOCUS))];

        if field == FormField::Submit {
            lines.push(Line::from(""));
            spans.push(submit_button(state, focused));
            lines.push(Line::from(spans));
            continue;
        }

        let label = match field {
            FormField::Budget => format!("{} ({})", field.label(), state.currency),
            _ => field.label().to_string(),
        };
        spans.push(Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style));

        match field {
            FormField::City => spans.extend(text_value(&form.city, focused)),
            FormField::Budget => spans.extend(text_value(&form.budget, focused)),
            FormField::StartDate => spans.push(date_value(form.start_date, focused)),
            FormField::EndDate => spans.push(date_value(form.end_date, focused)),
            FormField::Interests => spans.extend(interest_chips(state, focused)),
            FormField::TravelMode => {
                let style = if focused {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(format!("◀ {} ▶", form.travel_mode), style));
            }
            FormField::Submit => {}
        }
        lines.push(Line::from(spans));
    }

    lines
}

fn text_value(value: &str, focused: bool) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(value.to_string())];
    if focused {
        spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    }
    spans
}

fn date_value(date: NaiveDate, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default().add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default()
    };
    Span::styled(format_date(date), style)
}

/// Selectable interest chips; the cursor is only drawn while focused
fn interest_chips(state: &AppState, focused: bool) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, tag) in INTEREST_TAGS.iter().enumerate() {
        let selected = state.form.is_selected(tag);
        let mut style = if selected {
            Style::default().fg(Color::Black).bg(colors::SELECTED)
        } else {
            Style::default().fg(colors::DIM)
        };
        if focused && i == state.interest_cursor {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!(" {} ", tag), style));
    }
    spans
}

/// Submit button; shows the loading word while a request is in flight
fn submit_button(state: &AppState, focused: bool) -> Span<'static> {
    if state.form.loading {
        return Span::styled(
            format!("[ {} ]", loading_label(state)),
            Style::default().fg(colors::LOADING).add_modifier(Modifier::ITALIC),
        );
    }
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(colors::FOCUS)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::FOCUS)
    };
    Span::styled(format!("[ {} ]", FormField::Submit.label()), style)
}

/// Render the result screen in whichever state it is in
fn render_result(state: &AppState, result: &ResultScreen, frame: &mut Frame, area: Rect) {
    trace!("render_result: called");
    match result {
        ResultScreen::Loading => {
            let block = Block::default().borders(Borders::ALL).title(" Itinerary ");
            frame.render_widget(block, area);
            render_empty_message(frame, area, "Loading Plan...");
        }
        ResultScreen::Invalid(reason) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(" Itinerary ")
                .border_style(Style::default().fg(colors::ERROR));
            let content = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "The trip plan could not be read.",
                    Style::default().fg(colors::ERROR).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(reason.clone(), Style::default().fg(colors::DIM))),
                Line::from(""),
                Line::from("Press Esc to return to the form."),
            ];
            let paragraph = Paragraph::new(content)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
        }
        ResultScreen::Ready(summary) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", summary.title))
                .border_style(Style::default().fg(colors::HEADER));
            let paragraph = Paragraph::new(result_lines(summary))
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((state.result_scroll, 0));
            frame.render_widget(paragraph, area);
        }
    }
}

/// Result content: summary, itinerary, budget
fn result_lines(summary: &ResultSummary) -> Vec<Line<'static>> {
    let heading = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("  {}", summary.title),
                Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", summary.duration), Style::default().fg(colors::DIM)),
        ]),
        Line::from(vec![
            Span::raw("  Weather: "),
            Span::styled(summary.weather.clone(), Style::default().fg(colors::WEATHER)),
        ]),
    ];

    let map_line = match summary.map_url {
        Some(_) => Line::from(vec![
            Span::raw("  "),
            Span::styled("[m]", Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD)),
            Span::raw(" View route on map"),
        ]),
        None => Line::from(Span::styled("  No map link available", Style::default().fg(colors::DIM))),
    };
    lines.push(map_line);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("  Itinerary", heading)));
    if summary.activities.is_empty() {
        lines.push(Line::from(Span::styled("    No activities", Style::default().fg(colors::DIM))));
    }
    for activity in &summary.activities {
        lines.push(Line::from(""));
        let label = activity_label(activity);
        let mut spans = vec![Span::raw("    ")];
        if !label.is_empty() {
            spans.push(Span::styled(format!("{}  ", label), Style::default().fg(colors::FOCUS)));
        }
        spans.push(Span::styled(
            activity.location_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::from(spans));
        if !activity.description.is_empty() {
            lines.push(Line::from(format!("      {}", activity.description)));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Budget", heading)));
    for row in &summary.budget_rows {
        lines.push(Line::from(format!("    {}", row)));
    }
    lines.push(Line::from(vec![
        Span::styled("    Total: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            summary.total.clone(),
            Style::default().fg(colors::MONEY).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines
}

/// Render footer with status or context-sensitive keybinds
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!(?state.interaction_mode, "render_footer: called");
    if let Some(status) = &state.status_message {
        let footer = Paragraph::new(Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(colors::FOCUS),
        )))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
        return;
    }

    let keybinds: Vec<(&str, &str)> = match (&state.interaction_mode, &state.screen) {
        (InteractionMode::DatePicker(_), _) => vec![
            ("[←→]", "Day"),
            ("[↑↓]", "Week"),
            ("[PgUp/PgDn]", "Month"),
            ("[Enter]", "Pick"),
            ("[Esc]", "Cancel"),
        ],
        (InteractionMode::Alert(_), _) => vec![("[Enter]", "OK")],
        (InteractionMode::Help, _) => vec![("[Esc]", "Close")],
        (InteractionMode::Normal, Screen::Form) if state.form.loading => vec![("[Esc]", "Cancel")],
        (InteractionMode::Normal, Screen::Form) => match state.focus {
            FormField::StartDate | FormField::EndDate => vec![("[Tab]", "Next"), ("[Enter]", "Pick date")],
            FormField::Interests => vec![("[Tab]", "Next"), ("[←→]", "Move"), ("[Space]", "Toggle")],
            FormField::TravelMode => vec![("[Tab]", "Next"), ("[←→]", "Change")],
            FormField::Submit => vec![("[Tab]", "Next"), ("[Enter]", "Plan my trip")],
            FormField::City | FormField::Budget => vec![("[Tab]", "Next"), ("[Shift+Tab]", "Back")],
        },
        (InteractionMode::Normal, Screen::Result(_)) => {
            vec![("[m]", "Map"), ("[j/k]", "Scroll"), ("[Esc]", "Back")]
        }
    };

    let mut left_spans = vec![Span::raw(" ")];
    for (key, action) in keybinds {
        left_spans.push(Span::styled(
            key,
            Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
        ));
        left_spans.push(Span::raw(format!(" {} ", action)));
    }

    let right_line = Line::from(vec![
        Span::styled("[F1]", Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD)),
        Span::raw(" Help "),
        Span::styled("[^C]", Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD)),
        Span::raw(" Quit "),
    ]);

    let footer_block = Block::default().borders(Borders::ALL);
    let inner = footer_block.inner(area);
    frame.render_widget(footer_block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_line.width() as u16)])
        .split(inner);

    frame.render_widget(Paragraph::new(Line::from(left_spans)), chunks[0]);
    frame.render_widget(Paragraph::new(right_line), chunks[1]);
}

/// Render the month calendar for a date picker
fn render_date_picker(picker: &DatePicker, frame: &mut Frame, area: Rect) {
    trace!(date = %picker.date, "render_date_picker: called");
    let popup_area = fixed_rect(30, 13, area);
    frame.render_widget(Clear, popup_area);

    let widget = Paragraph::new(calendar_lines(picker))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(picker.title())
                .border_style(Style::default().fg(colors::HEADER))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Center);
    frame.render_widget(widget, popup_area);
}

/// Month grid around the highlighted date, Monday first
fn calendar_lines(picker: &DatePicker) -> Vec<Line<'static>> {
    let date = picker.date;
    let mut lines = vec![
        Line::from(Span::styled(
            date.format("%B %Y").to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Mo Tu We Th Fr Sa Su", Style::default().fg(colors::DIM))),
    ];

    let Some(first) = NaiveDate::from_ymd_opt(date.year(), date.month(), 1) else {
        return lines;
    };

    let mut week: Vec<Span<'static>> = Vec::new();
    for _ in 0..first.weekday().num_days_from_monday() {
        week.push(Span::raw("   "));
    }

    let mut day = first;
    let mut last = first;
    while day.month() == date.month() {
        last = day;
        let disabled = picker.min.is_some_and(|min| day < min);
        let style = if day == date {
            Style::default()
                .fg(Color::Black)
                .bg(colors::FOCUS)
                .add_modifier(Modifier::BOLD)
        } else if disabled {
            Style::default().fg(colors::DIM)
        } else {
            Style::default()
        };
        week.push(Span::styled(format!("{:>2}", day.day()), style));
        week.push(Span::raw(" "));

        if day.weekday().num_days_from_monday() == 6 {
            lines.push(Line::from(std::mem::take(&mut week)));
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    if !week.is_empty() {
        // Pad the last row so centering keeps the columns aligned
        let filled = last.weekday().num_days_from_monday() + 1;
        for _ in filled..7 {
            week.push(Span::raw("   "));
        }
        lines.push(Line::from(week));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(format_date(date), Style::default().fg(colors::FOCUS))));
    lines
}

/// Render the blocking alert
fn render_alert(alert: &AlertDialog, frame: &mut Frame, area: Rect) {
    trace!(title = %alert.title, "render_alert: called");
    let popup_area = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup_area);

    let content = vec![
        Line::from(""),
        Line::from(alert.message.as_str()),
        Line::from(""),
        Line::from(Span::styled(
            " OK ",
            Style::default()
                .fg(Color::Black)
                .bg(colors::ERROR)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let widget = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", alert.title))
                .border_style(Style::default().fg(colors::ERROR))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(widget, popup_area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    trace!("render_help_overlay: called");
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let section = |name: &'static str| {
        Line::from(vec![Span::styled(name, Style::default().add_modifier(Modifier::BOLD))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                .fg(colors::HEADER),
        )]),
        Line::from(""),
        section("Form"),
        key_line("Tab/↓", "Next field"),
        key_line("Shift+Tab/↑", "Previous field"),
        key_line("Enter", "Pick date / plan trip"),
        key_line("Space", "Toggle interest"),
        key_line("←/→", "Move interest cursor / change mode"),
        key_line("Esc", "Cancel planning in progress"),
        Line::from(""),
        section("Date Picker"),
        key_line("←/→", "Previous / next day"),
        key_line("↑/↓", "Previous / next week"),
        key_line("PgUp/PgDn", "Previous / next month"),
        key_line("Enter", "Confirm"),
        key_line("Esc", "Cancel"),
        Line::from(""),
        section("Itinerary"),
        key_line("m", "Open route in browser"),
        key_line("j/k", "Scroll"),
        key_line("Esc", "Back to form"),
        Line::from(""),
        section("Global"),
        key_line("?/F1", "Toggle help"),
        key_line("q", "Quit (outside text fields)"),
        key_line("Ctrl+C", "Quit"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (Esc to close) ")
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

/// Helper to create a key binding line
fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<14}", key), Style::default().fg(colors::KEYBIND)),
        Span::raw(desc),
    ])
}

/// Render empty state message
fn render_empty_message(frame: &mut Frame, area: Rect, message: &str) {
    trace!(%message, "render_empty_message: called");
    let inner = area.inner(Margin {
        horizontal: 2,
        vertical: 2,
    });

    let empty = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(empty, inner);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    trace!(percent_x, percent_y, "centered_rect: called");
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Centered rect of a fixed size, shrunk to fit
fn fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
