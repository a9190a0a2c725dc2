//! KI Games native entry point
//!
//! The game itself runs in the browser (the library registers its custom
//! element on wasm start). Natively this runs a headless autopilot game
//! through the same engine and logs the outcome.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use ki_games::platform::HeadlessHost;
    use ki_games::renderer::Recorder;
    use ki_games::sim::GamePhase;
    use ki_games::{Engine, Tuning};

    /// Environment variable naming an optional JSON tuning file
    const TUNING_ENV: &str = "KI_INVADERS_TUNING";
    /// Give up after this many frames (~5 minutes at 60 fps)
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var(TUNING_ENV) else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path, e);
                    Tuning::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    /// Track the lowest invader above the cannon and keep firing
    fn autopilot(engine: &mut Engine<HeadlessHost>) {
        let state = engine.state();
        let cannon_x = state.player.rect.center_x();
        let target = state
            .invaders
            .iter()
            .max_by(|a, b| a.rect.top().total_cmp(&b.rect.top()))
            .map(|inv| inv.rect.center_x());

        let (left, right) = match target {
            Some(x) if x < cannon_x - 2.0 => (true, false),
            Some(x) if x > cannon_x + 2.0 => (false, true),
            _ => (false, false),
        };

        if left {
            engine.key_down("ArrowLeft");
        } else {
            engine.key_up("ArrowLeft");
        }
        if right {
            engine.key_down("ArrowRight");
        } else {
            engine.key_up("ArrowRight");
        }
        engine.key_down("Space");
        engine.key_up("Space");
    }

    pub fn run() {
        env_logger::init();
        log::info!("KI Games (native) starting headless invaders run...");

        let tuning = load_tuning();
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let mut engine = match Engine::new(HeadlessHost::new(), tuning, seed) {
            Ok(engine) => engine,
            Err(e) => {
                log::error!("Invalid tuning: {}", e);
                return;
            }
        };
        engine.attach();

        let mut surface = Recorder::new();
        let mut frames = 0;
        while frames < MAX_FRAMES && engine.state().phase != GamePhase::GameOver {
            if engine.host_mut().take_pending().is_none() {
                break;
            }
            autopilot(&mut engine);
            surface.reset();
            engine.frame(&mut surface);
            frames += 1;
        }

        let state = engine.state();
        log::info!(
            "Finished after {} frames: {} (score {}, lives {}, {} invaders left)",
            frames,
            if state.won { "won" } else { "not won" },
            state.score,
            state.player.lives,
            state.invaders.len()
        );
        match serde_json::to_string(state) {
            Ok(json) => log::debug!("Final state: {}", json),
            Err(e) => log::warn!("Cannot serialize final state: {}", e),
        }

        engine.detach();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
