use chessboard_view::{BoardView, Panel, Region, Side, TileKind};
use ratatui::{prelude::*, widgets::*};

use crate::app::{key_for_action, App, CELL_HEIGHT, CELL_WIDTH};

const RANK_LABELS_WIDTH: u16 = 4;
const CONTROLS_WIDTH: u16 = 16;

struct BoardWidget<'a> {
    view: &'a BoardView,
    cursor: (usize, usize),
    selected: Option<(usize, usize)>,
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (row_idx, row) in self.view.grid().rows_top_down().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let x = area.x + col_idx as u16 * CELL_WIDTH;
                let y = area.y + row_idx as u16 * CELL_HEIGHT;
                // Only draw cells that fit completely
                if x + CELL_WIDTH > area.right() || y + CELL_HEIGHT > area.bottom() {
                    continue;
                }
                let coords = (cell.rank(), cell.file());
                let [r, g, b] = cell.tile().image().average_rgb();
                let background = if Some(coords) == self.selected {
                    Color::LightGreen
                } else if coords == self.cursor {
                    Color::LightBlue
                } else {
                    Color::Rgb(r, g, b)
                };
                // The glyph shape tells the sides apart, the color only has to contrast.
                let fg = match cell.tile().kind() {
                    TileKind::Light => Color::Black,
                    TileKind::Dark => Color::White,
                };
                buf.set_style(
                    Rect::new(x, y, CELL_WIDTH, CELL_HEIGHT),
                    Style::new().bg(background),
                );

                if let Some(icon) = cell.icon() {
                    let style = Style::new().fg(fg).bg(background).add_modifier(Modifier::BOLD);
                    buf.set_string(x + CELL_WIDTH / 2, y, icon.glyph().to_string(), style);
                } else if let Some(text) = cell.overlay() {
                    let style = Style::new().fg(fg).bg(background);
                    buf.set_stringn(x, y, text, usize::from(CELL_WIDTH), style);
                }
            }
        }
    }
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let dimension = app.view.dimension();
    let board_width = dimension.width() as u16 * CELL_WIDTH;
    let board_height = dimension.height() as u16 * CELL_HEIGHT;

    let main_layout = Layout::new(
        Direction::Vertical,
        [
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ],
    )
    .split(frame.size());
    let middle = Layout::new(
        Direction::Horizontal,
        [
            Constraint::Length(RANK_LABELS_WIDTH),
            Constraint::Length(board_width),
            Constraint::Length(CONTROLS_WIDTH),
            Constraint::Min(0),
        ],
    )
    .split(main_layout[1]);
    let center = Layout::new(
        Direction::Vertical,
        [
            Constraint::Length(board_height),
            Constraint::Length(1),
            Constraint::Min(0),
        ],
    )
    .split(middle[1]);

    frame.render_widget(scoreboard(app), main_layout[0]);
    frame.render_widget(rank_labels(app), middle[0]);
    frame.render_widget(
        BoardWidget {
            view: &app.view,
            cursor: app.cursor,
            selected: app.selected,
        },
        center[0],
    );
    frame.render_widget(file_labels(app), center[1]);
    frame.render_widget(controls(app), middle[2]);
    frame.render_widget(
        Paragraph::new(app.status.as_str()).style(Style::new().fg(Color::Yellow)),
        main_layout[2],
    );

    app.board_area = Some(center[0]);
}

fn scoreboard(app: &App) -> Paragraph<'_> {
    let mut spans = Vec::new();
    for (label, side) in app.screen.labels(Region::North).iter().zip(Side::PLAYING) {
        let score = app
            .view
            .score(side)
            .map_or_else(|| String::from("-"), |score| score.to_string());
        let style = if app.started && side == app.to_move {
            Style::new().add_modifier(Modifier::BOLD)
        } else {
            Style::new()
        };
        spans.push(Span::styled(format!(" {label} ({side}): {score} "), style));
    }
    Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL))
}

fn rank_labels(app: &App) -> Paragraph<'_> {
    let mut lines = Vec::new();
    for label in app.screen.labels(Region::West) {
        lines.push(Line::from(format!("{label:>2}")));
        for _ in 1..CELL_HEIGHT {
            lines.push(Line::default());
        }
    }
    Paragraph::new(lines)
}

fn file_labels(app: &App) -> Paragraph<'_> {
    let pad = usize::from(CELL_WIDTH / 2);
    let text: String = app
        .screen
        .labels(Region::South)
        .iter()
        .map(|label| format!("{:pad$}{label:<width$}", "", width = usize::from(CELL_WIDTH) - pad))
        .collect();
    Paragraph::new(text)
}

fn controls(app: &App) -> Paragraph<'_> {
    let mut lines = Vec::new();
    if let Some(Panel::Controls(actions)) = app.screen.get(Region::East) {
        for &action in actions {
            lines.push(Line::from(format!("[{}] {}", key_for_action(action), action.label())));
        }
    }
    lines.push(Line::default());
    lines.push(Line::from("[m] Mark"));
    lines.push(Line::from("[q] Quit"));
    Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Controls"))
}
