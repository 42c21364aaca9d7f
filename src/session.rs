//! Menu / play / pause / game-over flow around a [`GameEngine`].
//!
//! The session owns everything the terminal loop needs between frames but
//! performs no I/O, so key handling and timing can be tested directly.

use log::info;
use rand::rngs::StdRng;
use rand::Rng;

use crate::game::{
    Direction, GameConfig, GameEngine, GameMode, GameState, HeadTween, Outcome, Player, TickInfo,
};
use crate::input::{KeyAction, KeySet};

/// Where the player currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    Paused,
    Ended(Outcome),
}

pub struct Session<R = StdRng> {
    engine: GameEngine<R>,
    phase: Phase,
    apple_count: usize,
    game: Option<GameState>,
    tweens: Vec<HeadTween>,
    should_quit: bool,
}

impl<R: Rng> Session<R> {
    pub fn new(engine: GameEngine<R>) -> Self {
        let apple_count = engine.config().default_apples;
        Self {
            engine,
            phase: Phase::Menu,
            apple_count,
            game: None,
            tweens: Vec::new(),
            should_quit: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn apple_count(&self) -> usize {
        self.apple_count
    }

    /// Current (or last finished) game
    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Interpolated top-left pixel of a snake's head
    pub fn head_pixels(&self, player: Player) -> Option<(f64, f64)> {
        self.tweens.get(player.index()).map(HeadTween::position)
    }

    pub fn handle_key(&mut self, action: KeyAction) {
        if action == KeyAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.phase {
            Phase::Menu => match action {
                KeyAction::Start(mode) => self.start(mode),
                KeyAction::Leave => self.should_quit = true,
                KeyAction::Steer(KeySet::Arrows, Direction::Left) => {
                    self.adjust_apples(-1);
                }
                KeyAction::Steer(KeySet::Arrows, Direction::Right) => {
                    self.adjust_apples(1);
                }
                _ => {}
            },
            Phase::Playing => match action {
                KeyAction::Steer(keys, direction) => self.steer(keys, direction),
                KeyAction::TogglePause => self.phase = Phase::Paused,
                KeyAction::Menu => self.show_menu(),
                _ => {}
            },
            Phase::Paused => match action {
                KeyAction::TogglePause => self.phase = Phase::Playing,
                KeyAction::Menu => self.show_menu(),
                _ => {}
            },
            Phase::Ended(_) => {
                if action == KeyAction::Menu {
                    self.show_menu();
                }
            }
        }
    }

    /// Run one simulation tick. Returns the outcome if the game ended on it.
    pub fn tick(&mut self) -> Option<Outcome> {
        if self.phase != Phase::Playing {
            return None;
        }
        let game = self.game.as_mut()?;
        let cell = self.engine.config().cell_size;

        let before: Vec<(f64, f64)> = game
            .snakes
            .iter()
            .map(|snake| snake.head().to_pixels(cell))
            .collect();

        let info: TickInfo = self.engine.tick(game);

        for ((tween, start), snake) in self.tweens.iter_mut().zip(before).zip(&game.snakes) {
            tween.retarget(start, snake.head().to_pixels(cell));
        }

        for player in game.players() {
            if info.leveled_up[player.index()] {
                info!(
                    "{} reached level {}",
                    player.label(),
                    game.experience[player.index()].level
                );
            }
        }

        let outcome = game.outcome?;
        let collision = info.collision?;
        info!(
            "{} game over after {} ticks: {} ({:?})",
            game.mode.label(),
            game.ticks,
            outcome.message(),
            collision.kind
        );
        self.phase = Phase::Ended(outcome);
        Some(outcome)
    }

    /// Advance per-frame animation: head interpolation and XP bar easing
    pub fn frame(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        let config = self.engine.config();

        if self.phase == Phase::Playing {
            let step = config.progress_per_frame();
            for tween in &mut self.tweens {
                tween.advance(step);
            }
        }
        for xp in &mut game.experience {
            xp.animate(config.xp_fill_speed);
        }
    }

    fn start(&mut self, mode: GameMode) {
        let game = self.engine.new_game(mode, self.apple_count);
        let cell = self.engine.config().cell_size;
        self.tweens = game
            .snakes
            .iter()
            .map(|snake| HeadTween::resting(snake.head().to_pixels(cell)))
            .collect();
        info!("starting {} game with {} apples", mode.label(), game.foods.len());
        self.game = Some(game);
        self.phase = Phase::Playing;
    }

    fn show_menu(&mut self) {
        self.phase = Phase::Menu;
        self.game = None;
        self.tweens.clear();
    }

    fn adjust_apples(&mut self, delta: isize) {
        let requested = self.apple_count.saturating_add_signed(delta);
        self.apple_count = self.engine.config().clamp_apples(requested);
    }

    fn steer(&mut self, keys: KeySet, direction: Direction) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        let player = match (keys, game.mode) {
            (KeySet::Arrows, GameMode::VersusPlayer) => Player::Two,
            _ => Player::One,
        };
        self.engine.request_turn(game, player, direction);
    }
}
