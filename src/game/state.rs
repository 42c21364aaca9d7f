use super::action::{Direction, Player};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn manhattan(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Top-left pixel corner of this cell
    pub fn to_pixels(&self, cell_size: f64) -> (f64, f64) {
        (self.x as f64 * cell_size, self.y as f64 * cell_size)
    }
}

/// One snake on the board
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
    /// Cleared once a turn has been accepted during the current tick
    pub can_turn: bool,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self {
            body,
            direction,
            can_turn: true,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if position is any cell of the snake, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Head cell the snake would enter on the next move
    pub fn next_head(&self) -> Position {
        self.head().moved_in_direction(self.direction)
    }

    /// Move snake in current direction, growing if should_grow is true
    pub fn move_snake(&mut self, should_grow: bool) {
        let new_head = self.next_head();
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Try to change direction; at most one change is accepted per tick.
    ///
    /// Reversing straight into the neck is refused unless the snake is a
    /// single cell long.
    pub fn request_turn(&mut self, direction: Direction) -> bool {
        if !self.can_turn {
            return false;
        }
        if self.len() > 1 && self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        self.can_turn = false;
        true
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Which game is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Solo,
    VersusBot,
    VersusPlayer,
}

impl GameMode {
    pub fn has_second_snake(&self) -> bool {
        !matches!(self, GameMode::Solo)
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::Solo => "Solo",
            GameMode::VersusBot => "VS Bot",
            GameMode::VersusPlayer => "VS Player",
        }
    }
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    SoloLoss,
    PlayerOneWins,
    PlayerTwoWins,
    Draw,
}

impl Outcome {
    /// Outcome when `loser` crashed on their own
    pub fn loss_for(mode: GameMode, loser: Player) -> Self {
        if !mode.has_second_snake() {
            return Outcome::SoloLoss;
        }
        match loser.other() {
            Player::One => Outcome::PlayerOneWins,
            Player::Two => Outcome::PlayerTwoWins,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::SoloLoss => "GAME OVER",
            Outcome::PlayerOneWins => "Player 1 Wins!",
            Outcome::PlayerTwoWins => "Player 2 Wins!",
            Outcome::Draw => "Draw!",
        }
    }
}

/// Why a snake's game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Both heads entered the same cell
    HeadOn,
    /// Snake ran into the other snake's body
    Opponent,
}

/// Apple and level counters for one player
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Experience {
    /// Apples eaten since the last level up
    pub apples: u32,
    pub level: u32,
    /// Eased apple count shown by the XP bar
    pub display: f64,
}

impl Experience {
    /// Count one eaten apple. Returns true when this completed a level.
    pub fn record_apple(&mut self, xp_per_level: u32) -> bool {
        self.apples += 1;
        if self.apples >= xp_per_level {
            self.apples = 0;
            self.level += 1;
            return true;
        }
        false
    }

    /// Ease the display value toward the real counter
    pub fn animate(&mut self, speed: f64) {
        let target = self.apples as f64;
        if self.display < target {
            self.display = (self.display + speed).min(target);
        } else {
            self.display = target;
        }
    }
}

/// Complete simulation state of one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub mode: GameMode,
    pub snakes: Vec<Snake>,
    pub foods: Vec<Position>,
    pub experience: [Experience; 2],
    pub grid_size: usize,
    pub ticks: u32,
    pub outcome: Option<Outcome>,
}

impl GameState {
    /// Create a new game state
    pub fn new(mode: GameMode, snakes: Vec<Snake>, foods: Vec<Position>, grid_size: usize) -> Self {
        Self {
            mode,
            snakes,
            foods,
            experience: [Experience::default(); 2],
            grid_size,
            ticks: 0,
            outcome: None,
        }
    }

    pub fn snake(&self, player: Player) -> Option<&Snake> {
        self.snakes.get(player.index())
    }

    pub fn snake_mut(&mut self, player: Player) -> Option<&mut Snake> {
        self.snakes.get_mut(player.index())
    }

    pub fn players(&self) -> impl Iterator<Item = Player> {
        [Player::One, Player::Two]
            .into_iter()
            .take(self.snakes.len())
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.x < size && pos.y >= 0 && pos.y < size
    }

    /// Check if a position is occupied by any snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snakes.iter().any(|snake| snake.occupies(pos))
    }

    pub fn has_food_at(&self, pos: Position) -> bool {
        self.foods.contains(&pos)
    }
}
