//! Screen regions for the runner and the end-of-run summary card.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const HUD_HEIGHT: u16 = 2;
const MIN_FIELD_WIDTH: u16 = 20;

pub struct RunnerLayout {
    pub field: Rect,
    /// Mode status on the first line, key hints on the second.
    pub hud: Rect,
    pub sidebar: Rect,
}

/// ```text
/// ┌─ Code Runner: Classic Mode ─────────┬─ Info ──────┐
/// │ field                               │ sidebar     │
/// │ hud (2 lines)                       │             │
/// └─────────────────────────────────────┴─────────────┘
/// ```
pub fn split_screen(frame: &mut Frame, area: Rect, title: &str, sidebar_width: u16) -> RunnerLayout {
    frame.render_widget(Clear, area);
    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightCyan));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let [left, sidebar] = columns(inner, sidebar_width);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(HUD_HEIGHT)])
        .split(left);

    RunnerLayout {
        field: rows[0],
        hud: rows[1],
        sidebar,
    }
}

fn columns(area: Rect, sidebar_width: u16) -> [Rect; 2] {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(MIN_FIELD_WIDTH),
            Constraint::Length(sidebar_width),
        ])
        .split(area);
    [chunks[0], chunks[1]]
}

/// `hints` are `(key, action)` pairs.
pub fn render_hud(frame: &mut Frame, area: Rect, status: &str, hints: &[(&str, &str)]) {
    if area.height == 0 {
        return;
    }
    frame.render_widget(
        Paragraph::new(status)
            .style(Style::default().fg(Color::LightCyan))
            .alignment(Alignment::Center),
        Rect { height: 1, ..area },
    );

    if area.height < HUD_HEIGHT || hints.is_empty() {
        return;
    }
    let spans: Vec<Span> = hints
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            let gap = if i == 0 { "" } else { "  " };
            [
                Span::raw(gap),
                Span::styled(*key, Style::default().fg(Color::White)),
                Span::styled(format!(" {}", action), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

/// Draws the sidebar border and returns the area inside it.
pub fn sidebar_block(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Centered card over the whole screen once a run has ended.
pub fn render_summary_card(frame: &mut Frame, area: Rect, crashed: bool, title: &str, body: &[String]) {
    let accent = if crashed { Color::Red } else { Color::Green };
    frame.render_widget(Clear, area);
    let card = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent));
    let inner = card.inner(area);
    frame.render_widget(card, area);

    let mut lines = Vec::with_capacity(body.len() + 4);
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());
    lines.extend(body.iter().map(|text| Line::from(text.clone())));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "[R] Run again  [Q] Quit",
        Style::default().fg(Color::DarkGray),
    )));

    let height = (lines.len() as u16).min(inner.height);
    let top = inner.y + inner.height.saturating_sub(height) / 2;
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center),
        Rect::new(inner.x, top, inner.width, height),
    );
}
