//! Game engine: attach/detach lifecycle and the per-frame loop
//!
//! The engine owns the game state and drives it from host frame callbacks.
//! Every frame it simulates (when running), renders, and requests the next
//! frame. Only `detach` stops the chain.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::input::{Action, Keyboard};
use crate::platform::{FrameHandle, Host};
use crate::renderer::{self, Overlay, Surface};
use crate::sim::{self, GamePhase, GameState};
use crate::tuning::{Tuning, TuningError};

/// Attachment state of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, never attached
    Uninitialized,
    /// Subscribed to input and running frames
    Attached,
    /// Detached: no frames, no input
    Detached,
}

/// One game instance bound to a host
pub struct Engine<H: Host> {
    host: H,
    lifecycle: Lifecycle,
    pending_frame: Option<FrameHandle>,
    state: GameState,
    keyboard: Keyboard,
    tuning: Tuning,
    rng: Pcg32,
}

impl<H: Host> Engine<H> {
    /// Bind a host to a fresh game. Fails if `tuning` does not validate.
    pub fn new(host: H, tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            host,
            lifecycle: Lifecycle::Uninitialized,
            pending_frame: None,
            state: GameState::new(&tuning),
            keyboard: Keyboard::new(),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_attached(&self) -> bool {
        self.lifecycle == Lifecycle::Attached
    }

    /// Initialise a fresh game, subscribe to input and start the frame chain
    pub fn attach(&mut self) {
        if self.is_attached() {
            log::warn!("Engine already attached; ignoring attach");
            return;
        }

        self.state.reset(&self.tuning);
        self.keyboard.clear();
        self.host.subscribe_input();
        self.lifecycle = Lifecycle::Attached;
        self.schedule_frame();

        log::info!(
            "Game attached ({} invaders, {} lives)",
            self.state.invaders.len(),
            self.state.player.lives
        );
    }

    /// Cancel the pending frame and unsubscribe from input
    pub fn detach(&mut self) {
        if !self.is_attached() {
            return;
        }

        if let Some(handle) = self.pending_frame.take() {
            self.host.cancel_frame(handle);
        }
        self.host.unsubscribe_input();
        self.lifecycle = Lifecycle::Detached;

        log::info!("Game detached (score {})", self.state.score);
    }

    /// Run one frame: simulate if running, draw, then schedule the next frame.
    /// Returns the overlay to show, `None` while running.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<Overlay> {
        if !self.is_attached() {
            return None;
        }
        self.pending_frame = None;

        if self.state.is_running() {
            let input = self.keyboard.tick_input();
            sim::tick(&mut self.state, &input, &self.tuning, &mut self.rng);
            if self.state.phase == GamePhase::GameOver {
                if self.state.won {
                    log::info!("All invaders destroyed! Final score: {}", self.state.score);
                } else {
                    log::info!("Game over. Final score: {}", self.state.score);
                }
            }
        }

        renderer::draw(&self.state, surface);
        let overlay = Overlay::for_state(&self.state);

        self.schedule_frame();
        overlay
    }

    /// Key pressed: update held keys and apply any edge action
    pub fn key_down(&mut self, code: &str) {
        if !self.is_attached() {
            return;
        }
        if let Some(action) = self.keyboard.press(code) {
            self.apply(action);
        }
    }

    /// Key released
    pub fn key_up(&mut self, code: &str) {
        if !self.is_attached() {
            return;
        }
        self.keyboard.release(code);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Fire => {
                if self.state.is_running() && self.state.fire(&self.tuning) {
                    log::debug!("Fire ({} bullets live)", self.state.bullets.len());
                }
            }
            Action::TogglePause => {
                self.state.toggle_pause();
                log::debug!("Phase now {:?}", self.state.phase);
            }
            Action::Restart => {
                if self.state.phase == GamePhase::GameOver {
                    self.state.reset(&self.tuning);
                    log::info!("Game restarted");
                }
            }
        }
    }

    fn schedule_frame(&mut self) {
        self.pending_frame = self.host.request_frame();
        if self.pending_frame.is_none() {
            log::error!("Host refused to schedule a frame; game loop stalled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessHost;
    use crate::renderer::Recorder;

    fn attached() -> Engine<HeadlessHost> {
        let mut engine = Engine::new(HeadlessHost::new(), Tuning::without_invader_fire(), 1).unwrap();
        engine.attach();
        engine
    }

    fn run_frame(engine: &mut Engine<HeadlessHost>) -> Option<Overlay> {
        engine.host_mut().take_pending();
        engine.frame(&mut Recorder::new())
    }

    #[test]
    fn test_attach_subscribes_and_schedules() {
        let engine = attached();
        assert_eq!(engine.lifecycle(), Lifecycle::Attached);
        assert!(engine.host().is_subscribed());
        assert!(engine.host().pending_frame().is_some());
        assert_eq!(engine.state().phase, GamePhase::Running);
    }

    #[test]
    fn test_double_attach_is_noop() {
        let mut engine = attached();
        engine.attach();
        assert_eq!(engine.host().subscribe_calls(), 1);
    }

    #[test]
    fn test_detach_exactly_once() {
        let mut engine = attached();
        let pending = engine.host().pending_frame().unwrap();
        engine.detach();
        engine.detach();

        assert_eq!(engine.lifecycle(), Lifecycle::Detached);
        assert_eq!(engine.host().unsubscribe_calls(), 1);
        assert_eq!(engine.host().cancelled_frames(), &[pending]);
        assert!(engine.host().pending_frame().is_none());
    }

    #[test]
    fn test_frame_reschedules() {
        let mut engine = attached();
        for _ in 0..3 {
            assert!(run_frame(&mut engine).is_none());
            assert!(engine.host().pending_frame().is_some());
        }
    }

    #[test]
    fn test_frame_after_detach_is_inert() {
        let mut engine = attached();
        engine.detach();
        let mut rec = Recorder::new();
        assert!(engine.frame(&mut rec).is_none());
        assert!(rec.commands.is_empty());
        assert!(engine.host().pending_frame().is_none());
    }

    #[test]
    fn test_held_key_moves_player() {
        let mut engine = attached();
        let x = engine.state().player.rect.left();
        engine.key_down("ArrowRight");
        run_frame(&mut engine);
        run_frame(&mut engine);
        assert_eq!(engine.state().player.rect.left(), x + 10.0);

        engine.key_up("ArrowRight");
        run_frame(&mut engine);
        assert_eq!(engine.state().player.rect.left(), x + 10.0);
    }

    #[test]
    fn test_pause_renders_without_simulating() {
        let mut engine = attached();
        engine.key_down("KeyP");
        engine.key_down("ArrowLeft");
        let x = engine.state().player.rect.left();

        let overlay = run_frame(&mut engine).expect("pause overlay");
        assert_eq!(overlay.title, "PAUSED");
        assert_eq!(engine.state().player.rect.left(), x);
        assert_eq!(engine.state().frame_counter, 0);
        assert!(engine.host().pending_frame().is_some());

        engine.key_down("KeyP");
        assert!(run_frame(&mut engine).is_none());
        assert!(engine.state().player.rect.left() < x);
    }

    #[test]
    fn test_fire_ignored_while_paused() {
        let mut engine = attached();
        engine.key_down("KeyP");
        engine.key_down("Space");
        assert!(engine.state().bullets.is_empty());
    }

    #[test]
    fn test_restart_only_in_game_over() {
        let mut engine = attached();
        engine.key_down("Space");
        engine.key_down("Enter");
        assert_eq!(engine.state().bullets.len(), 1);
        assert_eq!(engine.state().phase, GamePhase::Running);
    }

    #[test]
    fn test_restart_after_loss() {
        let mut engine = attached();
        engine.state.score = 90;
        engine.state.player.lives = 0;
        engine.state.invaders.truncate(5);
        engine.state.end(false);

        let overlay = run_frame(&mut engine).expect("result overlay");
        assert_eq!(overlay.title, "GAME OVER");

        engine.key_down("Enter");
        assert_eq!(engine.state().phase, GamePhase::Running);
        assert_eq!(engine.state().score, 0);
        assert_eq!(engine.state().player.lives, 3);
        assert_eq!(engine.state().invaders.len(), 40);
    }

    #[test]
    fn test_keys_ignored_when_detached() {
        let mut engine = Engine::new(HeadlessHost::new(), Tuning::default(), 1).unwrap();
        engine.key_down("Space");
        assert!(engine.state().bullets.is_empty());
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            invader_step_interval: 0,
            ..Tuning::default()
        };
        let err = Engine::new(HeadlessHost::new(), tuning, 1).err().expect("zero interval");
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "invader_step_interval",
                ..
            }
        ));
    }
}
