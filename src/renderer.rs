use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::config::{
    CELL_WIDTH, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT,
    GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GridSize,
};
use crate::game::{Game, GameStatus};
use crate::grid::{Cell, is_out_of_bounds};
use crate::input::Direction;

const BORDER_STYLE: Style = Style::new().fg(Color::DarkGray);
const HEAD_STYLE: Style = Style::new().fg(Color::LightGreen).add_modifier(Modifier::BOLD);
const BODY_STYLE: Style = Style::new().fg(Color::Green);
const FOOD_STYLE: Style = Style::new().fg(Color::Red);

/// Renders the board and score line from immutable state.
pub fn render(frame: &mut Frame<'_>, game: &Game) {
    let bounds = game.bounds();
    let [board_area, score_area] = Layout::vertical([
        Constraint::Length(bounds.height.saturating_add(2)),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let board_area = Rect {
        width: board_area
            .width
            .min(bounds.width.saturating_mul(CELL_WIDTH).saturating_add(2)),
        ..board_area
    };

    let block = Block::bordered()
        .title(" snake ")
        .border_style(BORDER_STYLE);
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_food(frame, inner, game);
    render_snake(frame, inner, game);
    render_score_line(frame, score_area, game);
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, game: &Game) {
    let Some((x, y)) = logical_to_terminal(inner, game.bounds(), game.food) else {
        return;
    };

    frame.buffer_mut().set_string(x, y, GLYPH_FOOD, FOOD_STYLE);
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, game: &Game) {
    let head = game.snake.head();
    let head_glyph = head_glyph(game.last_direction());

    let buffer = frame.buffer_mut();
    for segment in game.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, game.bounds(), *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(x, y, head_glyph, HEAD_STYLE);
        } else {
            buffer.set_string(x, y, GLYPH_SNAKE_BODY, BODY_STYLE);
        }
    }
}

fn render_score_line(frame: &mut Frame<'_>, area: Rect, game: &Game) {
    let status = match game.status {
        GameStatus::Running => Span::styled(
            "  arrows/wasd move  q quit",
            Style::new().fg(Color::DarkGray),
        ),
        GameStatus::GameOver => Span::styled(
            "  GAME OVER",
            Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let line = Line::from(vec![Span::raw(format!("Score: {}", game.score)), status]);
    frame.render_widget(Paragraph::new(line), area);
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if is_out_of_bounds(cell, bounds) {
        return None;
    }

    let x_offset = u16::try_from(cell.col).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(cell.row).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
