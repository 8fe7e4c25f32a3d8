use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{Collision, GameConfig, GameLoop, SnakeState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Terminal host for the game core
///
/// Stands in for the external 3D engine: it owns the frame clock, maps key
/// events to direction changes, reports what the head ran into after each
/// tick, and draws the plane.
pub struct HumanMode {
    game: GameLoop<GameMetrics>,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            game: GameLoop::new(config, GameMetrics::new()),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Feed the accumulator at ~60 Hz; the core decides when ticks happen
        let mut frame_timer = interval(Duration::from_millis(16));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Advance the simulation by however long the frame took
                _ = frame_timer.tick() => {
                    let delta_ms = last_frame.elapsed().as_secs_f32() * 1000.0;
                    last_frame = Instant::now();

                    if self.game.advance(delta_ms) > 0 {
                        // Physics stand-in: report what the head ran into
                        if let Some(contact) = classify_contacts(self.game.state()) {
                            self.game.on_collision(contact);
                        }
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.game.sink_mut().update();
                    let game = &self.game;
                    let renderer = &self.renderer;
                    terminal.draw(|frame| {
                        renderer.render(frame, game.state(), game.board(), game.sink());
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => self.game.on_direction_changed(direction),
                KeyAction::Restart => self.game.reset(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Grid-granularity stand-in for the engine's trigger volumes
///
/// Body contact outranks food so a round cannot grow and die on the same
/// cell.
fn classify_contacts(state: &SnakeState) -> Option<Collision> {
    if state
        .body
        .iter()
        .any(|segment| segment.same_cell(state.head))
    {
        return Some(Collision::HeadTouchedBody);
    }

    match state.food {
        Some(food) if food.same_cell(state.head) => Some(Collision::HeadTouchedFood),
        _ => None,
    }
}
