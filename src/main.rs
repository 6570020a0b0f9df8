//! Skyhopper entry point
//!
//! Headless demo: runs the simulation core at display rate with a naive
//! autopilot until the run ends. Useful as a smoke exercise of the tick
//! pipeline; a real frontend drives [`skyhopper::Engine`] the same way
//! from its refresh callback and draws each [`skyhopper::RenderSnapshot`].

use std::thread;
use std::time::{Duration, Instant};

use skyhopper::engine::Engine;
use skyhopper::highscores::JsonFileScoreStore;
use skyhopper::sim::{GamePhase, TickInput};
use skyhopper::tuning::Difficulty;

const FRAME: Duration = Duration::from_millis(16);
/// Hard stop so the demo always exits
const MAX_DEMO_MS: f64 = 60_000.0;

fn main() {
    env_logger::init();
    log::info!("Skyhopper core demo (headless)");

    let store = JsonFileScoreStore::new(std::env::temp_dir());
    let mut engine = Engine::new(Difficulty::Normal, 0xC0FFEE, Box::new(store));
    engine.set_viewport(1280.0, 720.0);
    engine.start_run();

    let started = Instant::now();
    loop {
        let now_ms = started.elapsed().as_secs_f64() * 1000.0;

        // Naive autopilot: flap when sinking past the midline, fire
        // whenever the gun has recharged
        let (sinking, gun_ready) = {
            let snap = engine.snapshot();
            let midline = 720.0 / 2.0;
            (
                snap.player.y + snap.player.height > midline && snap.player.velocity > 0.0,
                snap.cooldown_progress >= 1.0,
            )
        };
        let input = TickInput {
            jump: sinking,
            shoot: gun_ready,
            toggle_pause: false,
        };

        let snap = engine.frame(now_ms, &input);
        if snap.phase == GamePhase::GameOver {
            println!("run over: score {}, best {}", snap.score, snap.high_score);
            break;
        }
        if now_ms > MAX_DEMO_MS {
            println!("demo time up: score {}, best {}", snap.score, snap.high_score);
            break;
        }

        thread::sleep(FRAME);
    }
}
