use super::{
    action::{Direction, Player},
    bot,
    config::GameConfig,
    state::{CollisionType, GameMode, GameState, Outcome, Position, Snake},
};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub kind: CollisionType,
    /// Snake at fault; `None` when both are (head-on or mutual body hit)
    pub culprit: Option<Player>,
    pub outcome: Outcome,
}

/// Information about a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInfo {
    /// Whether each player ate food this tick
    pub ate_food: [bool; 2],
    /// Whether each player completed a level this tick
    pub leveled_up: [bool; 2],
    /// Collision that ended the game, if one occurred
    pub collision: Option<Collision>,
}

impl TickInfo {
    pub fn terminated(&self) -> bool {
        self.collision.is_some()
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine with reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Set up a fresh game with `apples` food cells on the board
    pub fn new_game(&mut self, mode: GameMode, apples: usize) -> GameState {
        let center = (self.config.grid_size / 2) as i32;
        let length = self.config.initial_snake_length;

        let mut snakes = vec![Snake::new(
            Position::new(center, center),
            Direction::Right,
            length,
        )];
        if mode.has_second_snake() {
            snakes.push(Snake::new(
                Position::new(center, center + 2),
                Direction::Left,
                length,
            ));
        }

        let mut state = GameState::new(mode, snakes, Vec::new(), self.config.grid_size);
        for _ in 0..self.config.clamp_apples(apples) {
            match self.spawn_food(&state) {
                Some(food) => state.foods.push(food),
                None => break,
            }
        }
        state
    }

    /// Apply a player's turn request.
    ///
    /// Returns whether the request was accepted. Requests for a snake that
    /// does not exist, or for the bot's snake, are ignored.
    pub fn request_turn(&self, state: &mut GameState, player: Player, direction: Direction) -> bool {
        if state.is_over() {
            return false;
        }
        if state.mode == GameMode::VersusBot && player == Player::Two {
            return false;
        }
        let Some(snake) = state.snake_mut(player) else {
            return false;
        };
        let accepted = snake.request_turn(direction);
        if !accepted {
            debug!("{} turn {:?} ignored", player.label(), direction);
        }
        accepted
    }

    /// Execute one simulation tick
    pub fn tick(&mut self, state: &mut GameState) -> TickInfo {
        let mut info = TickInfo::default();
        if state.is_over() {
            return info;
        }

        self.advance(state, Player::One, &mut info);

        if state.snakes.len() > 1 {
            if state.mode == GameMode::VersusBot {
                if let Some(direction) = bot::choose_direction(state, Player::Two) {
                    debug!("bot heads {:?}", direction);
                    if let Some(snake) = state.snake_mut(Player::Two) {
                        snake.direction = direction;
                    }
                }
            }
            self.advance(state, Player::Two, &mut info);
        }

        state.ticks += 1;

        if let Some(collision) = self.check_collisions(state) {
            state.outcome = Some(collision.outcome);
            info.collision = Some(collision);
        }

        for snake in &mut state.snakes {
            snake.can_turn = true;
        }

        info
    }

    /// Move one snake a cell, eating and growing if it lands on food
    fn advance(&mut self, state: &mut GameState, player: Player, info: &mut TickInfo) {
        let Some(next) = state.snake(player).map(Snake::next_head) else {
            return;
        };
        let eats = state.has_food_at(next);

        if let Some(snake) = state.snake_mut(player) {
            snake.move_snake(eats);
        }
        if !eats {
            return;
        }

        state.foods.retain(|food| *food != next);
        match self.spawn_food(state) {
            Some(food) => state.foods.push(food),
            None => warn!("no free cell left for food, board keeps {} apples", state.foods.len()),
        }

        let idx = player.index();
        info.ate_food[idx] = true;
        info.leveled_up[idx] = state.experience[idx].record_apple(self.config.xp_per_level);
    }

    /// Pick a uniformly random cell holding neither a snake nor food
    pub fn spawn_food(&mut self, state: &GameState) -> Option<Position> {
        let size = state.grid_size as i32;
        let free: Vec<Position> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Position::new(x, y)))
            .filter(|pos| !state.is_occupied_by_snake(*pos) && !state.has_food_at(*pos))
            .collect();

        let food = free.choose(&mut self.rng).copied();
        if let Some(food) = food {
            debug!("food spawned at ({}, {})", food.x, food.y);
        }
        food
    }

    /// Whether a head cell is still on the board.
    ///
    /// Tested in pixel space with a tolerance of `wall_margin` cells so that
    /// interpolation overshoot never reads as a wall hit.
    pub fn in_play_bounds(&self, pos: Position) -> bool {
        let cell = self.config.cell_size;
        let margin = self.config.wall_margin * cell;
        let limit = self.config.board_pixels() - cell + margin;
        let (px, py) = pos.to_pixels(cell);
        -margin < px && px < limit && -margin < py && py < limit
    }

    /// Evaluate collisions after all snakes moved; first match wins.
    pub fn check_collisions(&self, state: &GameState) -> Option<Collision> {
        for player in state.players() {
            if let Some(kind) = self.own_fault(state, player) {
                return Some(Collision {
                    kind,
                    culprit: Some(player),
                    outcome: Outcome::loss_for(state.mode, player),
                });
            }
        }

        let (one, two) = match state.snakes.as_slice() {
            [one, two] => (one, two),
            _ => return None,
        };

        if one.head() == two.head() {
            return Some(Collision {
                kind: CollisionType::HeadOn,
                culprit: None,
                outcome: Outcome::Draw,
            });
        }

        let one_hit = two.collides_with_body(one.head());
        let two_hit = one.collides_with_body(two.head());
        let (culprit, outcome) = match (one_hit, two_hit) {
            (true, true) => (None, Outcome::Draw),
            (true, false) => (Some(Player::One), Outcome::PlayerTwoWins),
            (false, true) => (Some(Player::Two), Outcome::PlayerOneWins),
            (false, false) => return None,
        };
        Some(Collision {
            kind: CollisionType::Opponent,
            culprit,
            outcome,
        })
    }

    /// Wall or self collision of a single snake
    fn own_fault(&self, state: &GameState, player: Player) -> Option<CollisionType> {
        let snake = state.snake(player)?;
        if !self.in_play_bounds(snake.head()) {
            return Some(CollisionType::Wall);
        }
        if snake.collides_with_body(snake.head()) {
            return Some(CollisionType::SelfCollision);
        }
        None
    }
}
