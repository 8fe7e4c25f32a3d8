use rand::rngs::ThreadRng;
use rand::Rng;
use thiserror::Error;

use super::board::Board;
use super::state::Position;

/// Rejection sampling gives up after this many draws
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Every draw within the attempt budget landed on an occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no free cell for food after {attempts} attempts")]
pub struct PlacementExhausted {
    pub attempts: u32,
}

/// Draws grid-aligned food positions avoiding a small excluded set
///
/// The excluded set is intentionally just the head and the most recently
/// vacated cell. Food can land under the middle of a long body; the cell
/// frees up as the body slides on, so the overlap corrects itself.
pub struct RandomPlacer {
    rng: ThreadRng,
    max_attempts: u32,
}

impl RandomPlacer {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    /// Mostly for tests that want exhaustion to hit quickly
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            rng: rand::thread_rng(),
            max_attempts,
        }
    }

    /// Draw a uniformly random grid cell on `board` not shared with any
    /// position in `excluded`
    ///
    /// Snapping a draw near the rim can push it just past the half-extent,
    /// so out-of-board candidates are rejected along with occupied ones.
    pub fn place(
        &mut self,
        board: &Board,
        excluded: &[Position],
    ) -> Result<Position, PlacementExhausted> {
        for _ in 0..self.max_attempts {
            let candidate = Position::snapped(
                self.rng.gen_range(-board.half_width()..=board.half_width()),
                self.rng.gen_range(-board.half_height()..=board.half_height()),
            );

            if !board.contains(candidate) {
                continue;
            }
            if excluded.iter().any(|p| p.same_cell(candidate)) {
                continue;
            }
            return Ok(candidate);
        }

        Err(PlacementExhausted {
            attempts: self.max_attempts,
        })
    }
}

impl Default for RandomPlacer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placements_stay_on_board_and_avoid_excluded() {
        let board = Board::new(2.5, 2.5);
        let excluded = [Position::snapped(0.1, 0.2), Position::snapped(-0.4, 0.0)];
        let mut placer = RandomPlacer::new();

        for _ in 0..10_000 {
            let pos = placer.place(&board, &excluded).unwrap();
            assert!(board.contains(pos));
            assert!(!excluded.iter().any(|p| p.same_cell(pos)));
        }
    }

    #[test]
    fn test_exhaustion_on_fully_excluded_board() {
        // A 0.05-unit board snaps every draw to the origin cell
        let board = Board::new(0.05, 0.05);
        let mut placer = RandomPlacer::with_max_attempts(64);

        let err = placer.place(&board, &[Position::ORIGIN]).unwrap_err();
        assert_eq!(err, PlacementExhausted { attempts: 64 });
    }

    #[test]
    fn test_empty_excluded_set_always_places() {
        let board = Board::new(0.05, 0.05);
        let mut placer = RandomPlacer::new();

        let pos = placer.place(&board, &[]).unwrap();
        assert_eq!(pos.cell(), (0, 0));
    }
}
