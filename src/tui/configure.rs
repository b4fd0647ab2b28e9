//! Popup for editing the value of a configurable item.
//!
//! The dialog works on a copy of the value. Nothing reaches the controller
//! until the user commits, and the controller validates again on the way in.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

use crate::menu::model::MenuItem;
use crate::menu::value::{ConfigSpec, ConfigValue};

const GAUGE_WIDTH: i64 = 30;
const PAGE_STEPS: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigureEvent {
    None,
    Commit(ConfigValue),
    Cancel,
}

#[derive(Debug, Clone)]
pub struct ConfigureState {
    pub id: String,
    pub label: String,
    description: String,
    spec: ConfigSpec,
    value: ConfigValue,
    /// Edit buffer for text values, with a cursor counted in chars.
    buffer: String,
    cursor: usize,
}

impl ConfigureState {
    /// `None` for items without a configurable value.
    pub fn open(item: &MenuItem) -> Option<Self> {
        let config = item.config.as_ref()?;
        let buffer = match &config.value {
            ConfigValue::Text(text) => text.clone(),
            _ => String::new(),
        };
        Some(Self {
            id: item.id.clone(),
            label: item.label.clone(),
            description: item.description.clone(),
            spec: config.spec.clone(),
            value: config.value.clone(),
            cursor: buffer.chars().count(),
            buffer,
        })
    }

    pub fn value(&self) -> &ConfigValue {
        &self.value
    }

    fn adjust(&mut self, delta: i64) -> ConfigureEvent {
        self.value = self.spec.adjust(&self.value, delta);
        ConfigureEvent::None
    }

    fn commit(&self) -> ConfigureEvent {
        match self.spec {
            ConfigSpec::Text => ConfigureEvent::Commit(ConfigValue::Text(self.buffer.clone())),
            _ => ConfigureEvent::Commit(self.value.clone()),
        }
    }
}

pub fn handle_key(key: KeyEvent, state: &mut ConfigureState) -> ConfigureEvent {
    match key.code {
        KeyCode::Esc => return ConfigureEvent::Cancel,
        KeyCode::Enter => return state.commit(),
        _ => {}
    }

    match state.spec {
        ConfigSpec::Text => edit_text(key, state),
        ConfigSpec::Slider { .. } => match key.code {
            KeyCode::Left | KeyCode::Down | KeyCode::Char('h') | KeyCode::Char('j') => {
                state.adjust(-1)
            }
            KeyCode::Right | KeyCode::Up | KeyCode::Char('l') | KeyCode::Char('k') => {
                state.adjust(1)
            }
            KeyCode::PageDown => state.adjust(-PAGE_STEPS),
            KeyCode::PageUp => state.adjust(PAGE_STEPS),
            KeyCode::Home => state.adjust(i64::MIN / 2),
            KeyCode::End => state.adjust(i64::MAX / 2),
            _ => ConfigureEvent::None,
        },
        // Options are drawn as a vertical list, so up means the previous one.
        ConfigSpec::Dropdown { .. } => match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                state.adjust(-1)
            }
            KeyCode::Right
            | KeyCode::Down
            | KeyCode::Char('l')
            | KeyCode::Char('j')
            | KeyCode::Char(' ') => state.adjust(1),
            _ => ConfigureEvent::None,
        },
        ConfigSpec::Toggle => match key.code {
            KeyCode::Left
            | KeyCode::Right
            | KeyCode::Char('h')
            | KeyCode::Char('l')
            | KeyCode::Char(' ') => state.adjust(1),
            _ => ConfigureEvent::None,
        },
    }
}

fn edit_text(key: KeyEvent, state: &mut ConfigureState) -> ConfigureEvent {
    let len = state.buffer.chars().count();
    match key.code {
        KeyCode::Char(c) => {
            let at = byte_index_for_cursor(&state.buffer, state.cursor);
            state.buffer.insert(at, c);
            state.cursor += 1;
        }
        KeyCode::Backspace if state.cursor > 0 => {
            state.cursor -= 1;
            let at = byte_index_for_cursor(&state.buffer, state.cursor);
            state.buffer.remove(at);
        }
        KeyCode::Delete if state.cursor < len => {
            let at = byte_index_for_cursor(&state.buffer, state.cursor);
            state.buffer.remove(at);
        }
        KeyCode::Left => state.cursor = state.cursor.saturating_sub(1),
        KeyCode::Right => state.cursor = (state.cursor + 1).min(len),
        KeyCode::Home => state.cursor = 0,
        KeyCode::End => state.cursor = len,
        _ => {}
    }
    ConfigureEvent::None
}

pub fn draw(frame: &mut Frame, state: &ConfigureState) {
    let area = centered_rect(frame.area(), 56, 44);
    frame.render_widget(Clear, area);

    let title = Line::from(vec![
        Span::styled(
            state.label.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", state.spec.kind()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled("[Esc] cancel", Style::default().fg(Color::Gray)),
    ]);

    let mut lines = Vec::new();
    if !state.description.is_empty() {
        lines.push(Line::from(Span::styled(
            state.description.clone(),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    let hint = match &state.spec {
        ConfigSpec::Slider {
            min, max, step, ..
        } => {
            lines.push(gauge_line(&state.spec, state.value(), *min, *max));
            lines.push(Line::from(Span::styled(
                format!("range {min}..{max}, step {step}"),
                Style::default().fg(Color::DarkGray),
            )));
            "←/→ adjust  PgUp/PgDn jump  Enter apply"
        }
        ConfigSpec::Dropdown { options } => {
            for (option, label) in options {
                let chosen = matches!(state.value(), ConfigValue::Dropdown(v) if v == option);
                lines.push(option_row(chosen, label));
            }
            "↑/↓ choose  Enter apply"
        }
        ConfigSpec::Toggle => {
            let on = matches!(state.value, ConfigValue::Toggle(true));
            lines.push(toggle_row(on));
            "Space flip  Enter apply"
        }
        ConfigSpec::Text => {
            lines.push(line_with_cursor(&state.buffer, state.cursor));
            "type to edit  Enter apply"
        }
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )));

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .padding(Padding::new(1, 1, 1, 0)),
    );
    frame.render_widget(panel, area);
}

fn gauge_line(spec: &ConfigSpec, value: &ConfigValue, min: i64, max: i64) -> Line<'static> {
    let current = match value {
        ConfigValue::Slider(v) => *v,
        _ => min,
    };
    let span = (max - min).max(1);
    let filled = ((current - min).clamp(0, span) * GAUGE_WIDTH / span) as usize;
    let empty = GAUGE_WIDTH as usize - filled;
    Line::from(vec![
        Span::styled("█".repeat(filled), Style::default().fg(Color::Green)),
        Span::styled("░".repeat(empty), Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(
            spec.display(value),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

fn option_row(chosen: bool, label: &str) -> Line<'static> {
    let indicator = if chosen { "●" } else { "○" };
    let style = if chosen {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(Span::styled(format!("{indicator} {label}"), style))
}

fn toggle_row(on: bool) -> Line<'static> {
    let (text, color) = if on {
        ("[ON]", Color::Green)
    } else {
        ("[OFF]", Color::LightRed)
    };
    Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn line_with_cursor(text: &str, cursor: usize) -> Line<'static> {
    let caret = Span::styled("▌", Style::default().fg(Color::Cyan));
    let split = byte_index_for_cursor(text, cursor);
    let (left, right) = text.split_at(split);
    let mut spans = Vec::new();
    if !left.is_empty() {
        spans.push(Span::raw(left.to_string()));
    }
    spans.push(caret);
    if !right.is_empty() {
        spans.push(Span::raw(right.to_string()));
    }
    Line::from(spans)
}

fn byte_index_for_cursor(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

pub(crate) fn centered_rect(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .flex(Flex::Center)
    .split(area);
    Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .flex(Flex::Center)
    .split(vertical[1])[1]
}
