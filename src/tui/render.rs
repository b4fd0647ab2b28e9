use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};

use crate::menu::aggregate::SelectionStatus;
use crate::tui::configure::centered_rect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMarker {
    Category {
        status: SelectionStatus,
        selected: usize,
        total: usize,
    },
    Leaf {
        selected: bool,
        /// Display form of the current value, for configurable items.
        value: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct RenderRow {
    pub label: String,
    pub marker: RowMarker,
}

#[derive(Debug)]
pub struct MenuRenderData<'a> {
    pub breadcrumb: &'a [String],
    pub rows: &'a [RenderRow],
    pub cursor: usize,
    pub scroll: usize,
    pub description: &'a str,
    pub selected_count: usize,
    pub dirty: bool,
    pub hints: &'a str,
    pub message: Option<&'a str>,
    pub confirm: Option<&'a str>,
    pub show_help: bool,
}

struct Areas {
    header: Rect,
    list: Rect,
    description: Rect,
    message: Rect,
    hints: Rect,
}

fn outer_block(dirty: bool) -> Block<'static> {
    let mut title_spans = vec![
        Span::styled("setupmenu", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled("[?] help", Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled("[q] quit", Style::default().fg(Color::DarkGray)),
    ];
    if dirty {
        title_spans.push(Span::raw("  "));
        title_spans.push(Span::styled(
            "[modified]",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::new(2, 2, 1, 1))
        .title(Line::from(title_spans))
}

fn list_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn areas(frame_area: Rect) -> Areas {
    let area = frame_area.inner(Margin {
        horizontal: 3,
        vertical: 1,
    });
    let inner = outer_block(false).inner(area);
    let [header, _gap, list, description, message, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);
    Areas {
        header,
        list,
        description,
        message,
        hints,
    }
}

/// Number of menu rows that fit on screen for a frame of this size.
pub fn list_rows(frame_area: Rect) -> usize {
    list_block().inner(areas(frame_area).list).height as usize
}

pub fn draw(frame: &mut Frame, data: &MenuRenderData<'_>) {
    let area = frame.area().inner(Margin {
        horizontal: 3,
        vertical: 1,
    });
    frame.render_widget(outer_block(data.dirty), area);
    let areas = areas(frame.area());

    frame.render_widget(Paragraph::new(breadcrumb_line(data.breadcrumb)), areas.header);

    let block = list_block().title(Line::from(Span::styled(
        format!(" {} selected ", data.selected_count),
        Style::default().fg(Color::DarkGray),
    )));
    let list_inner = block.inner(areas.list);
    frame.render_widget(block, areas.list);
    let visible = list_inner.height as usize;
    let lines: Vec<Line> = data
        .rows
        .iter()
        .enumerate()
        .skip(data.scroll)
        .take(visible)
        .map(|(idx, row)| row_line(row, idx == data.cursor))
        .collect();
    if lines.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "(nothing here)",
                Style::default().fg(Color::DarkGray),
            )),
            list_inner,
        );
    } else {
        frame.render_widget(Paragraph::new(lines), list_inner);
    }

    let description = Paragraph::new(Span::styled(
        data.description.to_string(),
        Style::default().fg(Color::Gray),
    ))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(description, areas.description);

    if let Some(message) = data.message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Yellow),
            )),
            areas.message,
        );
    }
    frame.render_widget(
        Paragraph::new(Span::styled(
            data.hints.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        areas.hints,
    );

    if let Some(question) = data.confirm {
        render_confirm(frame, question);
    }
    if data.show_help {
        render_help_overlay(frame);
    }
}

fn breadcrumb_line(path: &[String]) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, label) in path.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        let style = if idx + 1 == path.len() {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label.clone(), style));
    }
    Line::from(spans)
}

fn row_line(row: &RenderRow, focused: bool) -> Line<'static> {
    let base = if focused {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let indicator = if focused { "> " } else { "  " };
    let mut spans = vec![Span::styled(indicator, base)];

    match &row.marker {
        RowMarker::Category {
            status,
            selected,
            total,
        } => {
            let color = match status {
                SelectionStatus::Full => Color::Green,
                SelectionStatus::Partial => Color::Yellow,
                SelectionStatus::Empty => Color::DarkGray,
            };
            spans.push(Span::styled(format!("{} ", status.glyph()), base.fg(color)));
            spans.push(Span::styled(row.label.clone(), base));
            spans.push(Span::styled(
                format!("  {selected}/{total} ›"),
                base.fg(Color::DarkGray),
            ));
        }
        RowMarker::Leaf { selected, value } => {
            let (check, color) = if *selected {
                ("[x] ", Color::Green)
            } else {
                ("[ ] ", Color::DarkGray)
            };
            spans.push(Span::styled(check, base.fg(color)));
            spans.push(Span::styled(row.label.clone(), base));
            if let Some(value) = value {
                spans.push(Span::styled(format!("  = {value}"), base.fg(Color::Cyan)));
            }
        }
    }
    Line::from(spans)
}

fn render_confirm(frame: &mut Frame, question: &str) {
    let area = centered_rect(frame.area(), 60, 24);
    frame.render_widget(Clear, area);
    let panel = Paragraph::new(vec![
        Line::from(question.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "[y] yes  [n] no  [Esc] cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title("Confirm")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .padding(Padding::new(1, 1, 1, 0)),
    );
    frame.render_widget(panel, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect(frame.area(), 70, 70);
    frame.render_widget(Clear, area);
    let help = Paragraph::new(vec![
        Line::from("○ nothing selected   ◐ some selected   ● all selected"),
        Line::from(""),
        Line::from("  ↑/↓ j/k        move"),
        Line::from("  Enter → l      open category / configure item"),
        Line::from("  Space          toggle item or whole category"),
        Line::from("  a / n          select / clear everything here"),
        Line::from("  Esc ← h        back (at the top: quit)"),
        Line::from("  s              save profile"),
        Line::from("  r              reset to defaults"),
        Line::from("  q              quit"),
        Line::from(""),
        Line::from("Press ? to close."),
    ])
    .block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(help, area);
}
