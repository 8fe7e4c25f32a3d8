use super::state::Position;

/// Collision reports from the host's physics layer, already tagged by body
/// identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// The head entered the food cell
    HeadTouchedFood,
    /// The head entered one of its own body cells
    HeadTouchedBody,
    /// Any contact pair the game does not care about
    Other,
}

/// Lifecycle notifications the core emits for its render/physics collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Positions after a tick, head plus every trailing segment
    Stepped { head: Position, body: Vec<Position> },
    /// Fresh food was materialized at the given cell
    FoodSpawned(Position),
    /// The live food was eaten; `score` is the new total
    FoodConsumed { score: u32 },
    /// The head left the board or hit the body; the round is over
    GameOver { score: u32 },
    /// Round state went back to its starting configuration
    Reset,
}

/// Receiver for [`GameEvent`]s, implemented by whatever the host wires in
pub trait EventSink {
    fn handle(&mut self, event: GameEvent);
}

/// Discards every event
impl EventSink for () {
    fn handle(&mut self, _event: GameEvent) {}
}

/// Captures events in order; used by tests
impl EventSink for Vec<GameEvent> {
    fn handle(&mut self, event: GameEvent) {
        self.push(event);
    }
}
