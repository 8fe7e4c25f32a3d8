use log::{info, warn};

use super::board::Board;
use super::config::GameConfig;
use super::direction::Direction;
use super::events::{Collision, EventSink, GameEvent};
use super::placer::RandomPlacer;
use super::state::SnakeState;

/// Fixed-timestep driver for [`SnakeState`]
///
/// Owns the board, the food placer, and the notification sink; the host feeds
/// it frame deltas, direction requests, and classified collision events
/// through the `on_*` methods, and never touches any event-loop machinery of
/// the core.
pub struct GameLoop<S> {
    config: GameConfig,
    board: Board,
    placer: RandomPlacer,
    state: SnakeState,
    accumulator_ms: f32,
    sink: S,
}

impl<S: EventSink> GameLoop<S> {
    pub fn new(config: GameConfig, sink: S) -> Self {
        assert!(
            config.tick_interval_ms > 0.0 && config.move_distance > 0.0,
            "tick interval and move distance must be positive"
        );

        let board = Board::new(config.board_width, config.board_height);
        let state = SnakeState::new(config.reversal_guard);

        let mut game = Self {
            config,
            board,
            placer: RandomPlacer::new(),
            state,
            accumulator_ms: 0.0,
            sink,
        };
        game.spawn_food();
        game
    }

    pub fn state(&self) -> &SnakeState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SnakeState {
        &mut self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Host wiring for direction input events
    pub fn on_direction_changed(&mut self, requested: Direction) {
        self.state.set_direction(requested);
    }

    /// Host wiring for the external collision feed
    ///
    /// Reports arrive after the tick that produced the geometry, so a
    /// boundary game-over inside the tick always wins over a collision
    /// reported for the same step.
    pub fn on_collision(&mut self, collision: Collision) {
        match collision {
            Collision::HeadTouchedFood => self.consume_food(),
            Collision::HeadTouchedBody => self.game_over(),
            Collision::Other => {}
        }
    }

    /// Accumulate frame time and run every tick it pays for
    ///
    /// The interval is subtracted rather than the accumulator zeroed, so
    /// fractional overflow carries into the next frame and one long frame can
    /// run several ticks. Returns how many ticks ran.
    pub fn advance(&mut self, delta_ms: f32) -> u32 {
        self.accumulator_ms += delta_ms;

        let mut ticks = 0;
        while self.accumulator_ms >= self.config.tick_interval_ms {
            self.accumulator_ms -= self.config.tick_interval_ms;
            self.on_tick();
            ticks += 1;
        }
        ticks
    }

    /// Run exactly one simulation step
    pub fn on_tick(&mut self) {
        self.state.advance(self.config.move_distance);

        if !self.board.contains(self.state.head) {
            self.game_over();
            return;
        }

        // A placement failure from an earlier tick retries here
        if self.state.food.is_none() {
            self.spawn_food();
        }

        self.sink.handle(GameEvent::Stepped {
            head: self.state.head,
            body: self.state.body.clone(),
        });
    }

    /// Restart the round without a game-over notification
    pub fn reset(&mut self) {
        self.state.clear();
        self.accumulator_ms = 0.0;
        self.sink.handle(GameEvent::Reset);
        self.spawn_food();
    }

    fn game_over(&mut self) {
        info!("round over, score {}", self.state.score);
        self.sink.handle(GameEvent::GameOver {
            score: self.state.score,
        });
        self.reset();
    }

    fn consume_food(&mut self) {
        // A report can outlive the food it refers to; drop it quietly
        if self.state.food.take().is_none() {
            return;
        }

        self.state.grow();
        self.sink.handle(GameEvent::FoodConsumed {
            score: self.state.score,
        });
        self.spawn_food();
    }

    fn spawn_food(&mut self) {
        let excluded = [self.state.head, self.state.last_vacated];
        match self.placer.place(&self.board, &excluded) {
            Ok(pos) => {
                self.state.food = Some(pos);
                self.sink.handle(GameEvent::FoodSpawned(pos));
            }
            Err(err) => warn!("{err}; leaving food unplaced until next tick"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::Position;

    fn game() -> GameLoop<Vec<GameEvent>> {
        GameLoop::new(GameConfig::new(5.0, 5.0), Vec::new())
    }

    #[test]
    fn test_new_game_places_food() {
        let game = game();

        let food = game.state().food.expect("food should be placed");
        assert!(game.board().contains(food));
        assert!(!food.same_cell(game.state().head));
        assert!(matches!(game.sink()[0], GameEvent::FoodSpawned(_)));
    }

    #[test]
    fn test_fractional_accumulation_carries_over() {
        let mut game = game();

        assert_eq!(game.advance(150.0), 0);
        assert_eq!(game.advance(150.0), 1);

        assert_eq!(game.advance(450.0), 1);
        assert_eq!(game.advance(150.0), 1);
    }

    #[test]
    fn test_long_frame_runs_multiple_ticks() {
        let mut game = game();

        assert_eq!(game.advance(900.0), 3);
        assert_eq!(game.state().head.cell(), (3, 0));
    }

    #[test]
    fn test_tick_alone_never_changes_body_length() {
        let mut game = game();
        game.state_mut().body = vec![
            Position::snapped(-0.1, 0.0),
            Position::snapped(-0.2, 0.0),
            Position::snapped(-0.3, 0.0),
        ];

        game.on_tick();
        assert_eq!(game.state().body.len(), 3);

        game.on_tick();
        assert_eq!(game.state().body.len(), 3);
    }

    #[test]
    fn test_tick_emits_positions() {
        let mut game = game();
        game.sink_mut().clear();

        game.on_tick();

        match game.sink().last() {
            Some(GameEvent::Stepped { head, body }) => {
                assert_eq!(head.cell(), (1, 0));
                assert!(body.is_empty());
            }
            other => panic!("expected Stepped, got {other:?}"),
        }
    }

    #[test]
    fn test_walk_to_the_wall() {
        let mut game = game();

        // 7500ms of frame time pays for 25 ticks: the head ends exactly on
        // the +x rim, still in play
        assert_eq!(game.advance(7500.0), 25);
        assert_eq!(game.state().head.cell(), (25, 0));
        assert!(!game
            .sink()
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. })));

        // The next tick steps off the plane: game over, fresh round
        game.sink_mut().clear();
        assert_eq!(game.advance(300.0), 1);

        assert_eq!(game.sink()[0], GameEvent::GameOver { score: 0 });
        assert_eq!(game.sink()[1], GameEvent::Reset);
        assert!(matches!(game.sink()[2], GameEvent::FoodSpawned(_)));
        assert!(game.state().head.same_cell(Position::ORIGIN));
        assert!(game.state().body.is_empty());
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().direction, Direction::Right);
    }

    #[test]
    fn test_reset_zeroes_the_accumulator() {
        let mut game = game();
        game.state_mut().head = Position::snapped(2.5, 0.0);

        // One tick steps off the rim and resets; the 150ms of overflow that
        // was banked must not survive into the new round
        assert_eq!(game.advance(450.0), 1);
        assert_eq!(game.advance(150.0), 0);
        assert_eq!(game.advance(300.0), 1);
    }

    #[test]
    fn test_food_consumption_grows_at_vacated_cell() {
        let mut game = game();

        game.advance(300.0);
        game.sink_mut().clear();

        game.on_collision(Collision::HeadTouchedFood);

        assert_eq!(game.state().score, 1);
        assert_eq!(game.state().body.len(), 1);
        assert!(game.state().body[0].same_cell(Position::ORIGIN));

        // Old food released, replacement requested
        assert_eq!(game.sink()[0], GameEvent::FoodConsumed { score: 1 });
        assert!(matches!(game.sink()[1], GameEvent::FoodSpawned(_)));
        assert!(game.state().food.is_some());
    }

    #[test]
    fn test_stale_food_report_is_ignored() {
        let mut game = game();
        game.state_mut().food = None;
        game.sink_mut().clear();

        game.on_collision(Collision::HeadTouchedFood);

        assert_eq!(game.state().score, 0);
        assert!(game.state().body.is_empty());
        assert!(game.sink().is_empty());
    }

    #[test]
    fn test_body_collision_ends_the_round() {
        let mut game = game();
        game.state_mut().body = vec![Position::snapped(0.1, 0.0)];
        game.state_mut().score = 3;
        game.sink_mut().clear();

        game.on_collision(Collision::HeadTouchedBody);

        assert_eq!(game.sink()[0], GameEvent::GameOver { score: 3 });
        assert_eq!(game.sink()[1], GameEvent::Reset);
        assert_eq!(game.state().score, 0);
        assert!(game.state().body.is_empty());
    }

    #[test]
    fn test_other_collisions_are_ignored() {
        let mut game = game();
        game.sink_mut().clear();

        game.on_collision(Collision::Other);

        assert!(game.sink().is_empty());
        assert_eq!(game.state().score, 0);
    }

    #[test]
    fn test_direction_wiring_respects_guard() {
        let mut game = game();

        game.on_direction_changed(Direction::Left);
        assert_eq!(game.state().direction, Direction::Right);

        game.on_direction_changed(Direction::Forward);
        assert_eq!(game.state().direction, Direction::Forward);
    }

    #[test]
    fn test_unguarded_config_allows_reversal() {
        let mut config = GameConfig::new(5.0, 5.0);
        config.reversal_guard = false;
        let mut game = GameLoop::new(config, Vec::new());

        game.on_direction_changed(Direction::Left);
        assert_eq!(game.state().direction, Direction::Left);
    }

    #[test]
    fn test_manual_reset_restores_direction_and_score() {
        let mut game = game();
        game.on_direction_changed(Direction::Back);
        game.advance(600.0);
        game.state_mut().score = 4;
        game.sink_mut().clear();

        game.reset();

        assert_eq!(game.sink()[0], GameEvent::Reset);
        assert!(!game
            .sink()
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. })));
        assert_eq!(game.state().direction, Direction::Right);
        assert_eq!(game.state().score, 0);
        assert!(game.state().head.same_cell(Position::ORIGIN));
    }
}
