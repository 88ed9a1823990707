//! Terminal UI rendering with ratatui

use crate::board::Cell;
use crate::collision::ghost;
use crate::game::{GameData, Phase};
use crate::tetromino::{Rotation, Variant};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const BLOCK: &str = "██";
const GHOST: &str = "░░";
const EMPTY: &str = "  ";

/// Side panel width: next preview and stats
const PANEL_WIDTH: u16 = 18;

fn variant_color(variant: Variant) -> Color {
    let c = variant.color();
    Color::Rgb(c.r, c.g, c.b)
}

/// Render a whole frame from one snapshot
pub fn render(frame: &mut Frame, state: &GameData) {
    let area = frame.area();
    let board_width = state.board.width() as u16 * 2 + 2;
    let board_height = state.board.height() as u16 + 2;
    let game_area = center_rect(area, board_width + PANEL_WIDTH, board_height);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Length(PANEL_WIDTH),
        ])
        .split(game_area);

    render_board(frame, layout[0], state);

    let panel = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(8)])
        .split(layout[1]);

    render_next(frame, panel[0], state.next_variant);
    render_stats(frame, panel[1], state);

    match state.phase {
        Phase::Menu => render_overlay(frame, area, "BLOCKFALL", "Press Enter to start"),
        Phase::Paused => render_overlay(frame, area, "PAUSED", "Press P to resume"),
        Phase::GameOver => render_overlay(
            frame,
            area,
            "GAME OVER",
            &format!("Score {} - Enter to play again", state.score),
        ),
        Phase::Playing => {}
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_board(frame: &mut Frame, area: Rect, state: &GameData) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let active: Vec<(i32, i32)> = state
        .current_piece
        .map(|piece| piece.cells().collect())
        .unwrap_or_default();
    let shadow: Vec<(i32, i32)> = state
        .current_piece
        .map(|piece| ghost(&state.board, &piece).cells().collect())
        .unwrap_or_default();
    let active_color = state
        .current_piece
        .map(|piece| variant_color(piece.variant))
        .unwrap_or(Color::White);

    let lines: Vec<Line> = state
        .board
        .rows()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, cell)| {
                    let pos = (x as i32, y as i32);
                    if active.contains(&pos) {
                        Span::styled(BLOCK, Style::default().fg(active_color))
                    } else if shadow.contains(&pos) {
                        Span::styled(GHOST, Style::default().fg(active_color).dim())
                    } else {
                        match cell {
                            Cell::Occupied(variant) => {
                                Span::styled(BLOCK, Style::default().fg(variant_color(*variant)))
                            }
                            Cell::Empty => Span::raw(EMPTY),
                        }
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_next(frame: &mut Frame, area: Rect, variant: Variant) {
    let block = Block::default()
        .title(" Next ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let shape = variant.shape(Rotation::North);
    let style = Style::default().fg(variant_color(variant));
    let lines: Vec<Line> = (0..shape.height())
        .filter(|&y| (0..shape.width()).any(|x| shape.is_filled(x, y)))
        .map(|y| {
            let spans: Vec<Span> = (0..shape.width())
                .map(|x| {
                    if shape.is_filled(x, y) {
                        Span::styled(BLOCK, style)
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_stats(frame: &mut Frame, area: Rect, state: &GameData) {
    let block = Block::default()
        .title(" Stats ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White).bold();
    let lines = vec![
        Line::styled("Score", label),
        Line::styled(state.score.to_string(), value),
        Line::styled("Best", label),
        Line::styled(state.high_score.max(state.score).to_string(), value),
        Line::styled("Level", label),
        Line::styled(state.level.to_string(), value),
        Line::styled("Lines", label),
        Line::styled(state.lines_cleared_total.to_string(), value),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let width = (subtitle.len().max(title.len()) as u16 + 6).min(area.width);
    let overlay = center_rect(area, width, 5);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let text = vec![
        Line::styled(title.to_string(), Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle.to_string(), Style::default().fg(Color::Gray)),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}
