use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::GameEngine;
use crate::input::InputHandler;
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::session::{Phase, Session};

/// Interactive terminal game: menu, solo, versus bot and versus player
pub struct PlayMode<R> {
    session: Session<R>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
}

impl<R: Rng> PlayMode<R> {
    pub fn new(engine: GameEngine<R>) -> Self {
        Self {
            session: Session::new(engine),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
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

        // Simulation ticks run on their own clock, independent of frame rate
        let mut tick_timer = interval(self.session.config().tick_duration());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(self.session.config().frame_duration());
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if self.handle_event(event) {
                            // First move lands one full tick after the start key
                            tick_timer.reset();
                        }
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.session.frame();
                    if self.session.phase() == Phase::Playing {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, &self.metrics);
                    }).context("Failed to draw frame")?;
                }
            }

            if self.session.should_quit() {
                info!("quit requested");
                break;
            }
        }

        Ok(())
    }

    /// Apply a terminal event. Returns true when it started a new game.
    fn handle_event(&mut self, event: Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return false;
        }

        let was_playing = self.session.game().is_some();
        let action = self.input_handler.handle_key_event(key);
        self.session.handle_key(action);

        let started = !was_playing && self.session.phase() == Phase::Playing;
        if started {
            self.metrics.on_game_start();
        }
        started
    }

    fn update_game(&mut self) {
        if let Some(outcome) = self.session.tick() {
            let top_level = self
                .session
                .game()
                .map(|game| game.experience.iter().map(|xp| xp.level).max().unwrap_or(0))
                .unwrap_or(0);
            self.metrics.on_game_over(outcome, top_level);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameMode, Outcome};
    use crate::input::KeyAction;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn play_mode() -> PlayMode<rand::rngs::StdRng> {
        PlayMode::new(GameEngine::with_seed(GameConfig::default(), 5))
    }

    #[test]
    fn test_key_event_starts_game() {
        let mut mode = play_mode();
        let key = KeyEvent::new(KeyCode::Char('2'), KeyModifiers::NONE);
        assert!(mode.handle_event(Event::Key(key)));

        assert_eq!(mode.session.phase(), Phase::Playing);
        assert_eq!(mode.session.game().unwrap().mode, GameMode::VersusBot);
    }

    #[test]
    fn test_only_game_start_restarts_tick_clock() {
        let mut mode = play_mode();
        let press = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));

        // Menu adjustments do not start anything
        assert!(!mode.handle_event(press(KeyCode::Right)));
        assert!(mode.handle_event(press(KeyCode::Char('1'))));

        // Steering, pausing and resuming an ongoing game do not either
        assert!(!mode.handle_event(press(KeyCode::Char('w'))));
        assert!(!mode.handle_event(press(KeyCode::Char(' '))));
        assert!(!mode.handle_event(press(KeyCode::Char(' '))));

        // Back to the menu and into a new game
        assert!(!mode.handle_event(press(KeyCode::Enter)));
        assert!(mode.handle_event(press(KeyCode::Char('3'))));
    }

    #[test]
    fn test_game_over_is_counted() {
        let mut mode = play_mode();
        mode.session.handle_key(KeyAction::Start(GameMode::Solo));

        for _ in 0..30 {
            mode.update_game();
        }

        assert_eq!(mode.session.phase(), Phase::Ended(Outcome::SoloLoss));
        assert_eq!(mode.metrics.games_played, 1);
    }
}
