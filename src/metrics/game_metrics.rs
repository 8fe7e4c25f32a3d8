use std::time::{Duration, Instant};

use crate::game::{EventSink, GameEvent};

/// Session counters the host keeps across rounds
pub struct GameMetrics {
    pub round_start: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub rounds_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            rounds_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.round_start.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_round_over(&mut self, final_score: u32) {
        self.rounds_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Rounds end and restart through the core's event feed
impl EventSink for GameMetrics {
    fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::GameOver { score } => self.on_round_over(score),
            GameEvent::Reset => self.on_round_start(),
            _ => {}
        }
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_round_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.rounds_played, 1);

        metrics.on_round_over(5);
        assert_eq!(metrics.high_score, 10); // Should not decrease
        assert_eq!(metrics.rounds_played, 2);

        metrics.on_round_over(15);
        assert_eq!(metrics.high_score, 15); // Should update
        assert_eq!(metrics.rounds_played, 3);
    }

    #[test]
    fn test_event_wiring() {
        let mut metrics = GameMetrics::new();

        metrics.handle(GameEvent::GameOver { score: 7 });
        metrics.handle(GameEvent::Reset);
        metrics.handle(GameEvent::FoodConsumed { score: 1 });

        assert_eq!(metrics.high_score, 7);
        assert_eq!(metrics.rounds_played, 1);
    }

    #[test]
    fn test_round_start_resets_time() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(50));
        metrics.update();

        assert!(metrics.elapsed_time.as_millis() >= 50);

        metrics.on_round_start();
        metrics.update();
        assert!(metrics.elapsed_time.as_millis() < 50);
    }
}
