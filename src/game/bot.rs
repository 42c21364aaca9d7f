//! Greedy bot steering for the second snake.
//!
//! The bot looks one cell ahead: of the four neighbouring cells that are on
//! the board and not occupied by either snake, it takes the one closest (in
//! Manhattan distance) to the apple nearest its head. It does no path search
//! and will happily steer into dead ends.

use super::action::{Direction, Player};
use super::state::{GameState, Position};

/// Direction the bot-controlled snake should take next.
///
/// Ties between candidates keep the earliest in [`Direction::ALL`]. When no
/// neighbouring cell is free, or there is no food, the current direction is
/// kept.
pub fn choose_direction(state: &GameState, player: Player) -> Option<Direction> {
    let snake = state.snake(player)?;
    let head = snake.head();

    let Some(target) = nearest_food(&state.foods, head) else {
        return Some(snake.direction);
    };

    let mut best = snake.direction;
    let mut best_dist = u32::MAX;

    for direction in Direction::ALL {
        let candidate = head.moved_in_direction(direction);
        if !state.is_in_bounds(candidate) || state.is_occupied_by_snake(candidate) {
            continue;
        }
        let dist = candidate.manhattan(target);
        if dist < best_dist {
            best_dist = dist;
            best = direction;
        }
    }

    Some(best)
}

/// Food cell closest to `from`, first one wins on ties
fn nearest_food(foods: &[Position], from: Position) -> Option<Position> {
    foods.iter().copied().min_by_key(|food| food.manhattan(from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{GameMode, Snake};

    fn state_with(bot: Snake, foods: Vec<Position>) -> GameState {
        let player = Snake::new(Position::new(1, 1), Direction::Right, 1);
        GameState::new(GameMode::VersusBot, vec![player, bot], foods, 10)
    }

    #[test]
    fn test_heads_toward_food() {
        let bot = Snake::new(Position::new(5, 5), Direction::Left, 3);
        let state = state_with(bot, vec![Position::new(5, 1)]);
        assert_eq!(
            choose_direction(&state, Player::Two),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_picks_nearest_food() {
        let bot = Snake::new(Position::new(5, 5), Direction::Up, 3);
        let state = state_with(bot, vec![Position::new(5, 0), Position::new(7, 5)]);
        assert_eq!(
            choose_direction(&state, Player::Two),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_tie_keeps_enumeration_order() {
        // Food diagonal up-left: Up and Left are equally good, Up comes first
        let bot = Snake::new(Position::new(5, 5), Direction::Down, 1);
        let state = state_with(bot, vec![Position::new(3, 3)]);
        assert_eq!(
            choose_direction(&state, Player::Two),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_never_steps_off_board() {
        // Food is behind a wall corner; only in-bounds moves are candidates
        let bot = Snake::new(Position::new(0, 0), Direction::Up, 1);
        let state = state_with(bot, vec![Position::new(0, 0).moved_by(0, 3)]);
        let choice = choose_direction(&state, Player::Two).unwrap();
        let next = Position::new(0, 0).moved_in_direction(choice);
        assert!(state.is_in_bounds(next));
    }

    #[test]
    fn test_avoids_other_snake() {
        let bot = Snake::new(Position::new(5, 5), Direction::Left, 3);
        // Player body directly above the bot, food further up
        let player = Snake {
            body: vec![Position::new(4, 4), Position::new(5, 4), Position::new(6, 4)],
            direction: Direction::Left,
            can_turn: true,
        };
        let state = GameState::new(
            GameMode::VersusBot,
            vec![player, bot],
            vec![Position::new(5, 1)],
            10,
        );
        let choice = choose_direction(&state, Player::Two).unwrap();
        assert_ne!(choice, Direction::Up);
    }

    #[test]
    fn test_boxed_in_keeps_direction() {
        let bot = Snake {
            body: vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 1),
                Position::new(0, 1),
            ],
            direction: Direction::Left,
            can_turn: true,
        };
        let state = state_with(bot, vec![Position::new(9, 9)]);
        assert_eq!(
            choose_direction(&state, Player::Two),
            Some(Direction::Left)
        );
    }
}
