use ki_games::consts::*;
use ki_games::platform::HeadlessHost;
use ki_games::renderer::Recorder;
use ki_games::sim::{
    Bullet, Direction, GamePhase, GameState, Invader, InvaderKind, TickInput, step_invaders, tick,
};
use ki_games::{Engine, Tuning};

use rand::SeedableRng;
use rand_pcg::Pcg32;

fn quiet_engine() -> Engine<HeadlessHost> {
    let mut engine = Engine::new(HeadlessHost::new(), Tuning::without_invader_fire(), 42).unwrap();
    engine.attach();
    engine
}

fn run_frames(engine: &mut Engine<HeadlessHost>, n: usize) {
    let mut surface = Recorder::new();
    for _ in 0..n {
        engine.host_mut().take_pending();
        surface.reset();
        engine.frame(&mut surface);
    }
}

// ── Fresh game, idle for one invader interval ────────────────────────────────

#[test]
fn idle_for_25_ticks_moves_block_one_step() {
    let mut engine = quiet_engine();
    let start: Vec<_> = engine.state().invaders.iter().map(|i| i.rect.pos).collect();

    run_frames(&mut engine, 25);

    let state = engine.state();
    assert_eq!(state.direction, Direction::Right);
    for (inv, before) in state.invaders.iter().zip(&start) {
        assert_eq!(inv.rect.pos.x, before.x + 1.0);
        assert_eq!(inv.rect.pos.y, before.y);
    }
    assert_eq!(state.score, 0);
    assert_eq!(state.player.lives, 3);
    assert_eq!(state.phase, GamePhase::Running);
}

// ── Fire rate limit ──────────────────────────────────────────────────────────

#[test]
fn third_rapid_fire_is_ignored() {
    let mut engine = quiet_engine();
    engine.key_down("Space");
    engine.key_up("Space");
    engine.key_down("Space");
    engine.key_up("Space");
    assert_eq!(engine.state().bullets.len(), 2);

    engine.key_down("Space");
    assert_eq!(engine.state().bullets.len(), 2);

    // Still capped after the bullets have moved
    run_frames(&mut engine, 1);
    engine.key_down("Space");
    assert_eq!(engine.state().bullets.len(), 2);
}

// ── Left edge reversal ───────────────────────────────────────────────────────

#[test]
fn block_reverses_at_left_edge_and_drops() {
    let tuning = Tuning::without_invader_fire();
    let mut state = GameState::new(&tuning);
    state.direction = Direction::Left;
    for inv in &mut state.invaders {
        inv.rect.pos.x -= INVADER_OFFSET_LEFT;
    }
    let ys: Vec<f32> = state.invaders.iter().map(|i| i.rect.pos.y).collect();
    let xs: Vec<f32> = state.invaders.iter().map(|i| i.rect.pos.x).collect();

    step_invaders(&mut state, &tuning);

    assert_eq!(state.direction, Direction::Right);
    for ((inv, y), x) in state.invaders.iter().zip(&ys).zip(&xs) {
        assert_eq!(inv.rect.pos.y, y + tuning.invader_drop);
        assert_eq!(inv.rect.pos.x, *x);
    }
}

#[test]
fn block_walks_to_left_edge_then_drops() {
    let tuning = Tuning::without_invader_fire();
    let mut state = GameState::new(&tuning);
    let mut rng = Pcg32::seed_from_u64(3);
    state.direction = Direction::Left;

    // Leftmost column starts at x = 30; 30 one-pixel steps reach the edge
    let interval = tuning.invader_step_interval as usize;
    for _ in 0..30 * interval {
        tick(&mut state, &TickInput::default(), &tuning, &mut rng);
    }
    assert_eq!(state.invaders[0].rect.left(), 0.0);
    assert_eq!(state.direction, Direction::Left);

    // Nothing moves until the interval completes
    for _ in 0..interval - 1 {
        tick(&mut state, &TickInput::default(), &tuning, &mut rng);
    }
    assert_eq!(state.invaders[0].rect.top(), INVADER_OFFSET_TOP);
    assert_eq!(state.direction, Direction::Left);

    tick(&mut state, &TickInput::default(), &tuning, &mut rng);
    assert_eq!(state.direction, Direction::Right);
    assert_eq!(state.invaders[0].rect.left(), 0.0);
    assert_eq!(state.invaders[0].rect.top(), INVADER_OFFSET_TOP + tuning.invader_drop);
    assert_eq!(state.phase, GamePhase::Running);
}

#[test]
fn block_walks_to_right_edge_then_drops() {
    let tuning = Tuning::without_invader_fire();
    let mut state = GameState::new(&tuning);
    let mut rng = Pcg32::seed_from_u64(1);

    // Rightmost invader starts at x = 300, right edge 320; 280 one-pixel steps reach 600
    let interval = tuning.invader_step_interval as usize;
    for _ in 0..280 * interval {
        tick(&mut state, &TickInput::default(), &tuning, &mut rng);
    }
    let rightmost = state
        .invaders
        .iter()
        .map(|i| i.rect.right())
        .fold(f32::MIN, f32::max);
    assert_eq!(rightmost, GAME_WIDTH);
    assert_eq!(state.direction, Direction::Right);
    assert_eq!(state.invaders[0].rect.top(), INVADER_OFFSET_TOP);

    for _ in 0..interval {
        tick(&mut state, &TickInput::default(), &tuning, &mut rng);
    }
    assert_eq!(state.direction, Direction::Left);
    assert_eq!(state.invaders[0].rect.top(), INVADER_OFFSET_TOP + tuning.invader_drop);
}

// ── Win condition ────────────────────────────────────────────────────────────

#[test]
fn clearing_all_invaders_wins_regardless_of_lives() {
    let tuning = Tuning::without_invader_fire();
    let mut state = GameState::new(&tuning);
    let mut rng = Pcg32::seed_from_u64(2);
    state.player.lives = 1;
    state.invaders = vec![Invader::new(100.0, 100.0, InvaderKind::A)];
    state.bullets.push(Bullet::player(105.0, 125.0));

    tick(&mut state, &TickInput::default(), &tuning, &mut rng);

    assert!(state.invaders.is_empty());
    assert_eq!(state.score, 10);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(state.won);
    assert_eq!(state.player.lives, 1);
}

// ── Restart ──────────────────────────────────────────────────────────────────

#[test]
fn restart_after_loss_resets_everything() {
    // Constant invader fire and a single life: the game ends quickly
    let mut engine = Engine::new(
        HeadlessHost::new(),
        Tuning {
            invader_non_fire_rate: 0.0,
            starting_lives: 1,
            ..Tuning::default()
        },
        9,
    )
    .unwrap();
    engine.attach();
    let mut frames = 0;
    while engine.state().phase != GamePhase::GameOver && frames < 100_000 {
        run_frames(&mut engine, 1);
        frames += 1;
    }
    assert_eq!(engine.state().phase, GamePhase::GameOver);

    engine.key_down("Enter");
    let state = engine.state();
    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.score, 0);
    assert_eq!(state.player.lives, 1);
    assert_eq!(state.invaders.len(), INVADER_COLS * INVADER_ROWS);
    assert!(state.bullets.is_empty());
    assert!(state.invader_bullets.is_empty());
    assert!(!state.won);
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

#[test]
fn detach_stops_the_loop() {
    let mut engine = quiet_engine();
    run_frames(&mut engine, 5);
    engine.detach();

    assert!(engine.host().pending_frame().is_none());
    assert!(!engine.host().is_subscribed());
    assert_eq!(engine.host().unsubscribe_calls(), 1);

    let counter = engine.state().frame_counter;
    run_frames(&mut engine, 5);
    assert_eq!(engine.state().frame_counter, counter);
}

#[test]
fn reattach_starts_a_fresh_game() {
    let mut engine = quiet_engine();
    engine.key_down("Space");
    run_frames(&mut engine, 30);
    engine.detach();
    engine.attach();

    let state = engine.state();
    assert_eq!(state.frame_counter, 0);
    assert!(state.bullets.is_empty());
    assert_eq!(state.invaders[0].rect.left(), INVADER_OFFSET_LEFT);
    assert_eq!(engine.host().subscribe_calls(), 2);
}
