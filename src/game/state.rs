use super::direction::Direction;

/// A point on the board plane, kept on the one-decimal grid
///
/// The plane is the x/z slice of the host's 3D scene; the vertical axis never
/// enters the core. Cell identity goes through the integer-tenths projection,
/// never raw float equality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, z: 0.0 };

    /// Build a position snapped to the grid
    pub fn snapped(x: f32, z: f32) -> Self {
        Self {
            x: quantize(x),
            z: quantize(z),
        }
    }

    /// The position one step away in `direction`, snapped back onto the grid
    ///
    /// Re-snapping after every step keeps float drift from accumulating over
    /// a long round.
    pub fn stepped(&self, direction: Direction, distance: f32) -> Self {
        let (dx, dz) = direction.delta();
        Position::snapped(self.x + dx * distance, self.z + dz * distance)
    }

    /// Integer-tenths projection of this position
    pub fn cell(&self) -> (i32, i32) {
        ((self.x * 10.0).round() as i32, (self.z * 10.0).round() as i32)
    }

    /// True when both positions occupy the same grid cell
    pub fn same_cell(&self, other: Position) -> bool {
        self.cell() == other.cell()
    }
}

/// Snap a coordinate to one decimal place, the game's grid granularity
fn quantize(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

/// The snake's mutable round state
///
/// Owns everything that changes while a round runs. Board bounds, timing, and
/// food placement live in the game loop driving it, so this type stays
/// directly testable.
#[derive(Debug, Clone)]
pub struct SnakeState {
    /// Head position, moved once per tick
    pub head: Position,
    /// Trailing segments, index 0 closest to the head
    pub body: Vec<Position>,
    /// Current heading, consulted at the next tick
    pub direction: Direction,
    /// The cell most recently vacated by the tail, or by the head while the
    /// body is empty. New segments appear here; food placement avoids it.
    pub last_vacated: Position,
    /// The single live food cell; `None` only while placement is retrying
    pub food: Option<Position>,
    /// Apples eaten this round
    pub score: u32,
    /// When set, direction requests opposite to the current heading are
    /// dropped
    pub reversal_guard: bool,
}

impl SnakeState {
    pub fn new(reversal_guard: bool) -> Self {
        Self {
            head: Position::ORIGIN,
            body: Vec::new(),
            direction: Direction::default(),
            last_vacated: Position::ORIGIN,
            food: None,
            score: 0,
            reversal_guard,
        }
    }

    /// Apply a direction request from the host
    pub fn set_direction(&mut self, requested: Direction) {
        if self.reversal_guard && requested.is_opposite(self.direction) {
            return;
        }
        self.direction = requested;
    }

    /// Advance the head one grid step and shift the body after it
    ///
    /// Follow-the-leader: each segment takes over the cell its predecessor
    /// held before the move, head to tail. The cell the last link leaves
    /// behind is recorded as `last_vacated`.
    pub fn advance(&mut self, move_distance: f32) {
        let pre_move = self.head;
        self.head = self.head.stepped(self.direction, move_distance);

        let mut handed_down = pre_move;
        for segment in &mut self.body {
            let vacated = *segment;
            *segment = handed_down;
            handed_down = vacated;
        }
        self.last_vacated = handed_down;
    }

    /// Grow by one segment at the most recently vacated cell and score it
    pub fn grow(&mut self) {
        self.body.push(self.last_vacated);
        self.score += 1;
    }

    /// Put the round back to its starting state
    pub fn clear(&mut self) {
        self.head = Position::ORIGIN;
        self.body.clear();
        self.direction = Direction::default();
        self.last_vacated = Position::ORIGIN;
        self.food = None;
        self.score = 0;
    }
}
