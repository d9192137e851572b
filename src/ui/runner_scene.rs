//! Runner scene rendering.
//!
//! The logical canvas is scaled onto a cell buffer with per-character
//! color, then stamped row-by-row as Paragraph widgets.

use super::layout::{render_hud, render_summary_card, sidebar_block, split_screen};
use code_runner::core::{game_statistics, is_new_high_score, GameState, GameStatus};
use code_runner::daily::{calculate_progress, motivational_message, DailyChallenge, Locale};
use code_runner::obstacles::{
    obstacle_opacity, should_show_jump_hint, ObstacleType, JUMP_HINT_DISTANCE,
};
use code_runner::physics::Hitbox;
use code_runner::power_ups::{calculate_power_up_effects, percent_remaining, PowerUpType};
use code_runner::scoring::{combo_progress, format_multiplier, format_score, score_grade};
use code_runner::session::challenge_metric;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const GROUND_CHAR: char = '▓';
const GROUND_SUB: char = '░';

pub fn render_runner_scene(
    frame: &mut Frame,
    area: Rect,
    state: &GameState,
    challenge: Option<&DailyChallenge>,
) {
    if state.status.is_finished() {
        render_run_over(frame, area, state);
        return;
    }

    let title = format!(" Code Runner: {} ", state.game_mode.name());
    let layout = split_screen(frame, area, &title, 26);

    render_play_field(frame, layout.field, state);
    match state.status {
        GameStatus::Idle => render_centered_prompt(frame, layout.field, "[ Press Enter to Start ]"),
        GameStatus::Paused => render_centered_prompt(frame, layout.field, "[ PAUSED ]"),
        _ => {}
    }

    render_status_line(frame, layout.hud, state);
    render_info_panel(frame, layout.sidebar, state, challenge);
}

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }
}

/// Cell range `[start, end)` covering `[lo, hi)` in canvas units, clipped
/// to `limit` cells. `None` when nothing is visible.
fn cell_span(lo: f64, hi: f64, scale: f64, limit: usize) -> Option<(usize, usize)> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= 0.0 {
        return None;
    }
    let start = (lo * scale).floor().max(0.0) as usize;
    let end = ((hi * scale).ceil() as usize).max(start + 1).min(limit);
    (start < end).then_some((start, end))
}

fn stamp(buffer: &mut [Vec<Cell>], body: &Hitbox, x_scale: f64, y_scale: f64, ch: char, fg: Color) {
    let rows = buffer.len();
    let cols = buffer.first().map_or(0, Vec::len);
    let (Some((c0, c1)), Some((r0, r1))) = (
        cell_span(body.x, body.right(), x_scale, cols),
        cell_span(body.y, body.bottom(), y_scale, rows),
    ) else {
        return;
    };
    for row in buffer.iter_mut().take(r1).skip(r0) {
        for cell in row.iter_mut().take(c1).skip(c0) {
            *cell = Cell { ch, fg };
        }
    }
}

fn obstacle_glyph(kind: ObstacleType) -> (char, Color) {
    match kind {
        ObstacleType::Bug => ('B', Color::Rgb(200, 70, 70)),
        ObstacleType::Error => ('E', Color::Rgb(220, 120, 40)),
        ObstacleType::Breaking => ('X', Color::Rgb(200, 40, 160)),
    }
}

fn power_up_glyph(kind: PowerUpType) -> (char, Color) {
    match kind {
        PowerUpType::Shield => ('S', Color::LightBlue),
        PowerUpType::SpeedBoost => ('>', Color::LightRed),
        PowerUpType::Magnet => ('M', Color::LightMagenta),
        PowerUpType::SlowMo => ('~', Color::LightGreen),
        PowerUpType::Ghost => ('G', Color::Gray),
    }
}

fn render_play_field(frame: &mut Frame, area: Rect, state: &GameState) {
    if area.height < 4 || area.width < 10 {
        return;
    }

    let render_width = area.width as usize;
    let render_height = area.height as usize;
    let x_scale = render_width as f64 / state.canvas_width;
    let y_scale = render_height as f64 / state.canvas_height;

    let mut buffer = vec![vec![Cell::default(); render_width]; render_height];

    // ── Ground ────────────────────────────────────────────────────────
    let ground_row = ((state.ground_y * y_scale).round() as usize).min(render_height - 1);
    for (r, row) in buffer.iter_mut().enumerate().skip(ground_row) {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = if r == ground_row {
                Cell {
                    ch: GROUND_CHAR,
                    fg: Color::Rgb(70, 90, 70),
                }
            } else if (c + r + state.frame_count as usize / 4) % 6 == 0 {
                Cell {
                    ch: GROUND_SUB,
                    fg: Color::Rgb(50, 60, 50),
                }
            } else {
                Cell::default()
            };
        }
    }

    // ── Entities ──────────────────────────────────────────────────────
    let chaos = state.mode_state.chaos_effects();
    let opacity = obstacle_opacity(chaos.invisible_obstacles, state.frame_count);
    if opacity >= 0.5 {
        for obstacle in &state.obstacles.obstacles {
            let (ch, fg) = obstacle_glyph(obstacle.kind);
            stamp(&mut buffer, &obstacle.body, x_scale, y_scale, ch, fg);
        }
    }
    for coffee in &state.obstacles.coffees {
        stamp(&mut buffer, &coffee.body, x_scale, y_scale, 'c', Color::Rgb(180, 120, 60));
    }
    for power_up in &state.power_ups.spawned {
        let (ch, fg) = power_up_glyph(power_up.kind);
        stamp(&mut buffer, &power_up.body, x_scale, y_scale, ch, fg);
    }

    let effects = calculate_power_up_effects(&state.power_ups.active);
    let player_color = if effects.has_ghost {
        Color::DarkGray
    } else if effects.has_shield {
        Color::LightBlue
    } else {
        Color::LightYellow
    };
    stamp(&mut buffer, &state.player.body, x_scale, y_scale, '█', player_color);

    // ── Jump hint ─────────────────────────────────────────────────────
    if state.is_playing()
        && should_show_jump_hint(&state.obstacles.obstacles, state.player.body.x, JUMP_HINT_DISTANCE)
    {
        write_text(&mut buffer, 0, 1, "JUMP!", Color::Yellow);
    }

    // ── Score (top-right) ─────────────────────────────────────────────
    let score_text = format!("Score: {}", format_score(state.score.current));
    let score_col = render_width.saturating_sub(score_text.chars().count() + 1);
    write_text(&mut buffer, 0, score_col, &score_text, Color::White);

    // ── Stamp rows ────────────────────────────────────────────────────
    for (row_idx, row_data) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data {
            if cell.fg != current_fg && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg),
                ));
            }
            current_fg = cell.fg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(current_text, Style::default().fg(current_fg)));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn write_text(buffer: &mut [Vec<Cell>], row: usize, col: usize, text: &str, fg: Color) {
    let Some(line) = buffer.get_mut(row) else {
        return;
    };
    for (i, ch) in text.chars().enumerate() {
        if let Some(cell) = line.get_mut(col + i) {
            *cell = Cell { ch, fg };
        }
    }
}

fn render_centered_prompt(frame: &mut Frame, area: Rect, prompt: &str) {
    if area.height < 3 || area.width < prompt.len() as u16 {
        return;
    }
    let x = area.x + area.width.saturating_sub(prompt.len() as u16) / 2;
    let y = area.y + area.height / 3;
    let line = Paragraph::new(Line::from(Span::styled(
        prompt,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(line, Rect::new(x, y, prompt.len() as u16, 1));
}

fn render_status_line(frame: &mut Frame, area: Rect, state: &GameState) {
    let status = state
        .mode_state
        .status_bar()
        .iter()
        .map(|item| format!("{}: {}", item.label, item.value))
        .collect::<Vec<_>>()
        .join("  |  ");

    let controls: &[(&str, &str)] = match state.status {
        GameStatus::Idle => &[("[Enter]", "Start"), ("[Q]", "Quit")],
        GameStatus::Paused => &[("[P]", "Resume"), ("[R]", "Restart"), ("[Q]", "Quit")],
        _ => &[("[Space/Up]", "Jump"), ("[P]", "Pause"), ("[Q]", "Quit")],
    };
    render_hud(frame, area, &status, controls);
}

fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))
}

fn render_info_panel(
    frame: &mut Frame,
    area: Rect,
    state: &GameState,
    challenge: Option<&DailyChallenge>,
) {
    let inner = sidebar_block(frame, area);
    let white = Style::default().fg(Color::White);

    let mut lines = vec![
        Line::from(vec![
            label("Difficulty: "),
            Span::styled(state.difficulty.name(), Style::default().fg(Color::LightCyan)),
        ]),
        Line::from(vec![
            label("Score: "),
            Span::styled(
                format_score(state.score.current),
                white.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![label("Best: "), Span::styled(format_score(state.score.high_score), white)]),
        Line::from(vec![
            label("Multiplier: "),
            Span::styled(format_multiplier(state.score.multiplier), white),
        ]),
        Line::from(vec![
            label("Combo: "),
            Span::styled(
                format!("{} ({:.0}%)", state.score.combo, combo_progress(&state.score)),
                white,
            ),
        ]),
        Line::from(""),
    ];

    for active in state.power_ups.active.iter().filter(|p| p.active) {
        let (ch, fg) = power_up_glyph(active.kind);
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", ch), Style::default().fg(fg)),
            Span::styled(
                format!("{} {:.0}%", active.kind.name(), percent_remaining(active)),
                white,
            ),
        ]));
    }

    lines.push(Line::from(""));
    for objective in state.mode_state.objectives() {
        lines.push(Line::from(Span::styled(objective, Style::default().fg(Color::Gray))));
    }

    if let Some(challenge) = challenge {
        let progress = calculate_progress(challenge, challenge_metric(challenge.kind, state));
        let pick = (state.frame_count / 300) as usize;
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Daily:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(challenge.name.en.clone(), white)));
        lines.push(Line::from(vec![
            label(&format!("{}/{} ", progress.current, progress.target)),
            Span::styled(
                if challenge.completed {
                    "Done!"
                } else {
                    motivational_message(&progress, Locale::En, pick)
                },
                Style::default().fg(Color::LightGreen),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_run_over(frame: &mut Frame, area: Rect, state: &GameState) {
    let stats = game_statistics(state);
    let crashed = state.status == GameStatus::GameOver;
    let title = if crashed {
        "SEGFAULT! GAME OVER"
    } else {
        "RUN COMPLETE"
    };

    let mut body = vec![
        format!(
            "Score: {}   Grade: {}",
            format_score(stats.final_score),
            score_grade(stats.final_score).as_str()
        ),
        format!(
            "Coffees: {}   Dodged: {}   Near misses: {}",
            stats.coffees_collected, stats.obstacles_dodged, stats.near_misses
        ),
        format!(
            "Max combo: {}   Accuracy: {:.1}%   Time: {}s",
            stats.max_combo, stats.accuracy, stats.survival_seconds
        ),
    ];
    if is_new_high_score(state) {
        body.push("NEW HIGH SCORE!".to_string());
    }

    render_summary_card(frame, area, crashed, title, &body);
}
