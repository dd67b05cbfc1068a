//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::state::{Direction, GamePhase, GameState, StepOutcome};
use crate::consts::FOOD_SCORE;

/// Input intents collected during one frame (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Requested heading (arrow keys / WASD)
    pub direction: Option<Direction>,
    /// Pause toggle (pause key or pause button)
    pub pause: bool,
    /// Start a fresh game (restart key or restart button)
    pub restart: bool,
}

impl GameState {
    /// Advance the snake by one render tick.
    ///
    /// Moves only every `move_delay` calls, and only while playing with a
    /// direction set. A move into the boundary, the body or a wall ends the
    /// game and leaves the snake as it was.
    pub fn advance(&mut self) -> StepOutcome {
        if self.phase != GamePhase::Playing {
            return StepOutcome::Idle;
        }

        self.move_counter += 1;
        if self.move_counter < self.config.move_delay {
            return StepOutcome::Idle;
        }
        self.move_counter = 0;

        let Some(direction) = self.direction else {
            return StepOutcome::Idle;
        };

        let new_head = self.head() + direction.delta();
        if let Some(collision) = self.collision_at(new_head) {
            log::info!(
                "Game over: {:?} at ({}, {}), score {}",
                collision,
                new_head.x,
                new_head.y,
                self.score
            );
            self.phase = GamePhase::GameOver;
            return StepOutcome::Crashed(collision);
        }

        self.snake.push_front(new_head);

        if let Some(index) = self.food.iter().position(|&food| food == new_head) {
            self.food.remove(index);
            self.score += FOOD_SCORE;
            log::debug!(
                "Ate food at ({}, {}). Score: {}",
                new_head.x,
                new_head.y,
                self.score
            );
            if self.food.is_empty() {
                self.arm_regeneration();
            }
            StepOutcome::Ate
        } else {
            self.snake.pop_back();
            StepOutcome::Moved
        }
    }

    /// Fire the regeneration deadline if the virtual clock has reached it
    pub fn poll_regeneration(&mut self) -> bool {
        match self.regen_at {
            Some(at) if self.time_ticks >= at => {
                self.regenerate();
                true
            }
            _ => false,
        }
    }
}

/// Advance the game state by one fixed timestep.
///
/// Order within a tick: restart, pause toggle, steering, clock and
/// regeneration deadline, then movement. The clock runs in every phase.
pub fn tick(state: &mut GameState, input: &TickInput) -> StepOutcome {
    if input.restart {
        state.reset();
        return StepOutcome::Idle;
    }

    if input.pause {
        state.toggle_pause();
    }

    if let Some(direction) = input.direction {
        state.set_direction(direction);
    }

    state.time_ticks += 1;
    state.poll_regeneration();

    state.advance()
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use glam::IVec2;

    use super::*;
    use crate::sim::state::{Collision, SimConfig};

    /// Fresh game with no walls, one food at (15, 15), snake at (10, 10)
    fn open_field(seed: u64) -> GameState {
        let mut state = GameState::new(SimConfig::default(), seed);
        state.walls.clear();
        state.food = vec![IVec2::new(15, 15)];
        state
    }

    /// Run exactly one movement cadence
    fn step(state: &mut GameState) -> StepOutcome {
        let mut outcome = StepOutcome::Idle;
        for _ in 0..state.config.move_delay {
            outcome = state.advance();
        }
        outcome
    }

    #[test]
    fn test_moves_only_on_cadence() {
        let mut state = open_field(1);
        state.set_direction(Direction::Right);

        for _ in 0..state.config.move_delay - 1 {
            assert_eq!(state.advance(), StepOutcome::Idle);
            assert_eq!(state.head(), IVec2::new(10, 10));
        }
        assert_eq!(state.advance(), StepOutcome::Moved);
        assert_eq!(state.head(), IVec2::new(11, 10));
        assert_eq!(state.move_counter, 0);
    }

    #[test]
    fn test_idle_without_direction() {
        let mut state = open_field(1);
        for _ in 0..100 {
            assert_eq!(state.advance(), StepOutcome::Idle);
        }
        assert_eq!(state.head(), IVec2::new(10, 10));
    }

    #[test]
    fn test_crosses_five_tiles() {
        let mut state = open_field(1);
        state.set_direction(Direction::Right);

        for _ in 0..5 {
            assert_eq!(step(&mut state), StepOutcome::Moved);
        }

        assert_eq!(state.head(), IVec2::new(15, 10));
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.food, vec![IVec2::new(15, 15)]);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = open_field(1);
        state.food = vec![IVec2::new(12, 10), IVec2::new(15, 15)];
        state.set_direction(Direction::Right);

        assert_eq!(step(&mut state), StepOutcome::Moved);
        assert_eq!(step(&mut state), StepOutcome::Ate);

        assert_eq!(state.score, 10);
        assert_eq!(state.food, vec![IVec2::new(15, 15)]);
        assert_eq!(
            state.snake,
            VecDeque::from([IVec2::new(12, 10), IVec2::new(11, 10)])
        );
        assert!(!state.regen_pending());

        assert_eq!(step(&mut state), StepOutcome::Moved);
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn test_last_food_arms_regeneration() {
        let mut state = open_field(1);
        state.food = vec![IVec2::new(11, 10)];
        let input = TickInput {
            direction: Some(Direction::Right),
            ..Default::default()
        };
        tick(&mut state, &input);
        while state.score == 0 {
            tick(&mut state, &TickInput::default());
        }

        assert!(state.food.is_empty());
        assert!(state.regen_pending());
        let deadline = state.time_ticks + state.config.regen_delay_ticks;
        assert_eq!(state.regen_at, Some(deadline));

        // Park the snake so it cannot crash while the clock runs out
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        while state.time_ticks < deadline - 1 {
            tick(&mut state, &TickInput::default());
            assert!(state.regen_pending());
        }
        tick(&mut state, &TickInput::default());

        assert!(!state.regen_pending());
        assert!(!state.walls.is_empty());
        assert!((1..=3).contains(&state.food.len()));
        assert!(state.food.iter().all(|f| !state.snake.contains(f)));
    }

    #[test]
    fn test_boundary_ends_game() {
        let mut state = open_field(1);
        state.snake = VecDeque::from([IVec2::new(0, 5), IVec2::new(1, 5)]);
        state.direction = Some(Direction::Left);

        assert_eq!(step(&mut state), StepOutcome::Crashed(Collision::Boundary));
        assert!(state.is_game_over());
        assert_eq!(state.snake, VecDeque::from([IVec2::new(0, 5), IVec2::new(1, 5)]));
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut state = open_field(1);
        state.snake = VecDeque::from([
            IVec2::new(5, 5),
            IVec2::new(6, 5),
            IVec2::new(6, 6),
            IVec2::new(5, 6),
            IVec2::new(4, 6),
        ]);
        state.direction = Some(Direction::Down);
        let before = state.snake.clone();

        assert_eq!(step(&mut state), StepOutcome::Crashed(Collision::SelfBody));
        assert!(state.is_game_over());
        assert_eq!(state.snake, before);
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut state = open_field(1);
        state.walls = vec![IVec2::new(11, 10)];
        state.set_direction(Direction::Right);

        assert_eq!(step(&mut state), StepOutcome::Crashed(Collision::Wall));
        assert!(state.is_game_over());
        assert_eq!(state.head(), IVec2::new(10, 10));
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = open_field(1);
        state.phase = GamePhase::GameOver;
        state.direction = Some(Direction::Right);

        let input = TickInput {
            direction: Some(Direction::Up),
            pause: true,
            ..Default::default()
        };
        for _ in 0..60 {
            assert_eq!(tick(&mut state, &input), StepOutcome::Idle);
        }
        assert!(state.is_game_over());
        assert_eq!(state.direction, Some(Direction::Right));
        assert_eq!(state.head(), IVec2::new(10, 10));
    }

    #[test]
    fn test_paused_does_not_move() {
        let mut state = open_field(1);
        state.set_direction(Direction::Right);
        state.toggle_pause();
        for _ in 0..100 {
            assert_eq!(state.advance(), StepOutcome::Idle);
        }
        assert_eq!(state.head(), IVec2::new(10, 10));
        assert_eq!(state.move_counter, 0);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = open_field(1);
        state.score = 50;
        state.regen_at = Some(1000);
        state.phase = GamePhase::GameOver;

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake, VecDeque::from([IVec2::new(10, 10)]));
        assert!(!state.regen_pending());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(SimConfig::default(), 99999);
        let mut state2 = GameState::new(SimConfig::default(), 99999);

        let inputs = [
            TickInput {
                direction: Some(Direction::Down),
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                direction: Some(Direction::Left),
                ..Default::default()
            },
            TickInput {
                restart: true,
                ..Default::default()
            },
        ];

        for input in &inputs {
            for _ in 0..40 {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.snake, state2.snake);
        assert_eq!(state1.walls, state2.walls);
        assert_eq!(state1.food, state2.food);
    }
}
