use rand::Rng;
use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line as Segment, Points},
        Block, BorderType, Borders, Clear, Gauge, Paragraph,
    },
    Frame,
};

use crate::game::{Direction, GameConfig, GameMode, GameState, Player, Snake};
use crate::metrics::GameMetrics;
use crate::session::{Phase, Session};

const PLAYER_ONE_COLOR: Color = Color::Rgb(0, 204, 102);
const PLAYER_TWO_COLOR: Color = Color::Rgb(0, 102, 204);
const APPLE_COLOR: Color = Color::Rgb(230, 0, 0);
const STEM_COLOR: Color = Color::Rgb(90, 58, 26);
const LEAF_COLOR: Color = Color::Rgb(46, 204, 113);
const XP_COLOR: Color = Color::Rgb(51, 255, 51);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<R: Rng>(&self, frame: &mut Frame, session: &Session<R>, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // XP bars
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(session, metrics), chunks[0]);

        // Center the board horizontally
        let board_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match (session.phase(), session.game()) {
            (Phase::Menu, _) | (_, None) => {
                frame.render_widget(self.render_menu(session), board_area);
            }
            (phase, Some(game)) => {
                self.render_board(frame, board_area, session, game);
                self.render_xp(frame, chunks[2], session.config(), game);
                match phase {
                    Phase::Paused => self.render_overlay(frame, board_area, "PAUSED", None),
                    Phase::Ended(outcome) => self.render_overlay(
                        frame,
                        board_area,
                        outcome.message(),
                        Some("ENTER - Menu"),
                    ),
                    _ => {}
                }
            }
        }

        let mode = session.game().map(|game| game.mode);
        frame.render_widget(self.render_controls(session.phase(), mode), chunks[3]);
    }

    fn render_board<R: Rng>(
        &self,
        frame: &mut Frame,
        area: Rect,
        session: &Session<R>,
        game: &GameState,
    ) {
        let config = session.config();
        let size = config.board_pixels();

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(format!(" Snake - {} ", game.mode.label())),
            )
            .marker(Marker::Braille)
            .x_bounds([0.0, size])
            .y_bounds([0.0, size])
            .paint(|ctx| {
                for player in game.players() {
                    let (Some(snake), Some(head)) = (game.snake(player), session.head_pixels(player))
                    else {
                        continue;
                    };
                    let color = match player {
                        Player::One => PLAYER_ONE_COLOR,
                        Player::Two => PLAYER_TWO_COLOR,
                    };
                    draw_snake(ctx, config, snake, head, color);
                }
                ctx.layer();
                for food in &game.foods {
                    draw_apple(ctx, config, food.to_pixels(config.cell_size));
                }
            });

        frame.render_widget(canvas, area);
    }

    fn render_xp(&self, frame: &mut Frame, area: Rect, config: &GameConfig, game: &GameState) {
        let halves = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        for player in game.players() {
            let xp = &game.experience[player.index()];
            let ratio = (xp.display / config.xp_per_level as f64).clamp(0.0, 1.0);
            let title = format!(" {} XP: {} ", player.label(), xp.level);
            let block = match player {
                Player::One => Block::bordered().title(title),
                Player::Two => Block::bordered().title(Line::from(title).right_aligned()),
            };
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(Style::default().fg(XP_COLOR).bg(Color::DarkGray))
                .label(format!("{}/{}", xp.apples, config.xp_per_level))
                .ratio(ratio);
            frame.render_widget(gauge, halves[player.index()]);
        }
    }

    fn render_menu<R: Rng>(&self, session: &Session<R>) -> Paragraph<'_> {
        let option = |text: &'static str| {
            Line::from(Span::styled(text, Style::default().fg(Color::White)))
        };
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            option("1 - Solo"),
            option("2 - VS Bot"),
            option("3 - VS Player"),
            Line::from(""),
            Line::from(Span::styled(
                format!("Apples on screen: {} (← / →)", session.apple_count()),
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(" Snake "),
        )
    }

    fn render_overlay(&self, frame: &mut Frame, area: Rect, message: &str, hint: Option<&str>) {
        let [row] = Layout::vertical([Constraint::Length(4)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Length(30)])
            .flex(Flex::Center)
            .areas(row);

        let mut text = vec![Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))];
        if let Some(hint) = hint {
            text.push(Line::from(Span::styled(
                hint.to_string(),
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::bordered().border_style(Style::default().fg(Color::Red))),
            popup,
        );
    }

    fn render_stats<R: Rng>(&self, session: &Session<R>, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));
        let value = |text: String| Span::styled(text, Style::default().fg(Color::White));

        let mode = session
            .game()
            .map(|game| game.mode.label())
            .unwrap_or("Menu");

        let text = vec![Line::from(vec![
            label("Mode: "),
            value(mode.to_string()),
            Span::raw("    "),
            label("Time: "),
            value(metrics.format_time()),
            Span::raw("    "),
            label("P1/P2/Draw: "),
            value(format!(
                "{}/{}/{}",
                metrics.player_one_wins, metrics.player_two_wins, metrics.draws
            )),
            Span::raw("    "),
            label("Best level: "),
            value(metrics.best_level.to_string()),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, phase: Phase, mode: Option<GameMode>) -> Paragraph<'_> {
        let key = |text: &'static str| Span::styled(text, Style::default().fg(Color::Cyan));
        let quit = |text: &'static str| Span::styled(text, Style::default().fg(Color::Red));

        let mut spans = match (phase, mode) {
            (Phase::Menu, _) | (_, None) => {
                let spans = vec![
                    key("1-3"),
                    Span::raw(" start | "),
                    key("←→"),
                    Span::raw(" apples | "),
                    quit("Q"),
                    Span::raw(" to quit"),
                ];
                return Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
            }
            (_, Some(GameMode::VersusPlayer)) => vec![
                key("WASD"),
                Span::raw(" P1 | "),
                key("↑↓←→"),
                Span::raw(" P2 | "),
            ],
            (_, Some(_)) => vec![key("WASD/↑↓←→"), Span::raw(" move | ")],
        };
        spans.extend([
            key("Space"),
            Span::raw(" pause | "),
            key("Enter"),
            Span::raw(" menu | "),
            quit("Ctrl+C"),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Canvas coordinates of a cell centre; the canvas y axis points up.
fn cell_center(config: &GameConfig, (px, py): (f64, f64)) -> (f64, f64) {
    let half = config.cell_size / 2.0;
    (px + half, config.board_pixels() - (py + half))
}

fn draw_snake(ctx: &mut Context, config: &GameConfig, snake: &Snake, head: (f64, f64), color: Color) {
    let cell = config.cell_size;
    let mut points = vec![cell_center(config, head)];
    points.extend(
        snake
            .body_segments()
            .iter()
            .map(|pos| cell_center(config, pos.to_pixels(cell))),
    );

    for pair in points.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        ctx.draw(&Segment::new(x1, y1, x2, y2, color));
    }
    for &(x, y) in &points[1..] {
        ctx.draw(&Circle {
            x,
            y,
            radius: cell / 2.0 - 3.0,
            color,
        });
    }

    let (hx, hy) = points[0];
    ctx.draw(&Circle {
        x: hx,
        y: hy,
        radius: cell / 2.0 - 4.0,
        color,
    });

    // Eyes sit a little toward the heading
    let (dx, dy) = snake.direction.delta();
    let (ex, ey) = (hx + dx as f64 * 4.0, hy - dy as f64 * 4.0);
    let eyes = match snake.direction {
        Direction::Up | Direction::Down => [(ex - 4.0, ey), (ex + 4.0, ey)],
        Direction::Left | Direction::Right => [(ex, ey - 4.0), (ex, ey + 4.0)],
    };
    ctx.draw(&Points {
        coords: &eyes,
        color: Color::White,
    });
}

fn draw_apple(ctx: &mut Context, config: &GameConfig, cell_pixels: (f64, f64)) {
    let (cx, cy) = cell_center(config, cell_pixels);
    let radius = config.cell_size / 2.0 - 3.0;

    ctx.draw(&Circle {
        x: cx,
        y: cy,
        radius,
        color: APPLE_COLOR,
    });
    ctx.draw(&Segment::new(cx, cy + radius, cx, cy + radius + 6.0, STEM_COLOR));
    ctx.draw(&Points {
        coords: &[(cx + 6.0, cy + radius + 5.0)],
        color: LEAF_COLOR,
    });
}
