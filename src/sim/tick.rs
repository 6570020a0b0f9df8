//! The per-tick simulation pipeline
//!
//! One call to [`tick`] advances the run by one display frame: phase
//! machine, spawner, player physics, projectiles, obstacle motion and
//! collision outcomes, particles, score accrual, background scroll — in
//! that fixed order. A fatal collision short-circuits the rest of the
//! tick so nothing mutates after termination is signaled.

use std::f32::consts::FRAC_PI_4;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{check_collision, swept_past};
use super::state::{
    Bullet, Cloud, Color, GamePhase, GameState, Obstacle, ObstacleKind, Particle, Player, GOLD,
    ORANGE, RED, WHITE,
};
use crate::consts::*;

/// Input commands for a single tick, edge-triggered
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Overwrite vertical velocity with the jump impulse
    pub jump: bool,
    /// Fire a projectile (subject to cooldown)
    pub shoot: bool,
    /// Flip between Active and Paused
    pub toggle_pause: bool,
}

/// Advance the simulation by one frame.
///
/// `raw_dt_ms` is the wall-clock delta between host frames. The simulation
/// delta is equal to it while `Active` and zero in every other phase; the
/// countdown sequence is the one consumer of the raw value outside play.
pub fn tick(state: &mut GameState, input: &TickInput, raw_dt_ms: f64) {
    // A bad host clock must never corrupt the run
    let raw_dt_ms = raw_dt_ms.max(0.0);

    if input.toggle_pause {
        match state.phase {
            GamePhase::Active => {
                state.phase = GamePhase::Paused;
                log::debug!("paused at {:.0} ms", state.now_ms);
            }
            GamePhase::Paused => state.phase = GamePhase::Active,
            // Nothing to freeze elsewhere
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Inactive | GamePhase::GameOver | GamePhase::Paused => return,
        GamePhase::Countdown => {
            run_countdown(state, raw_dt_ms);
            return;
        }
        GamePhase::Active => {}
    }

    let dt = raw_dt_ms;
    state.now_ms += dt;
    let now = state.now_ms;
    let scale = state.scale;
    let viewport_w = state.viewport_w;
    let viewport_h = state.viewport_h;
    let hyper = state.hyper_active();
    let pad = COLLISION_PAD * scale;

    // Edge-triggered actions. Jump overwrites velocity so jump height is
    // consistent regardless of current fall speed.
    if input.jump {
        state.player.velocity = state.config.jump_strength * scale;
        spawn_jump_dust(&mut state.particles, &mut state.rng, scale, &state.player);
    }
    if input.shoot {
        try_shoot(state, now, hyper);
    }

    // --- Spawner ---
    spawn_obstacles(state, now);
    spawn_clouds(state, now);

    // --- Player physics ---
    state.player.velocity += state.config.gravity * scale;
    state.player.y += state.player.velocity;
    let normalized_vel = state.player.velocity / scale;
    state.player.rotation = (normalized_vel * ROTATION_SENSITIVITY).clamp(-FRAC_PI_4, FRAC_PI_4);

    if state.player.y + state.player.height > viewport_h {
        // Floor contact is terminal
        state.player.y = viewport_h - state.player.height;
        let at = Vec2::new(state.player.x, state.player.y);
        spawn_explosion(&mut state.particles, &mut state.rng, scale, at, RED, 20);
        state.phase = GamePhase::GameOver;
        log::info!("run over: hit the ground, score {}", state.score);
        return;
    }
    if state.player.y < 0.0 {
        // Clamp to the ceiling with a small positive rebound so the
        // player never sticks there
        state.player.y = 0.0;
        state.player.velocity = CEILING_REBOUND * scale;
    }

    // --- Bullets ---
    let mut bi = 0;
    'bullets: while bi < state.bullets.len() {
        let old_x = state.bullets[bi].x;
        state.bullets[bi].x += state.bullets[bi].speed;
        let bullet = state.bullets[bi];

        for obstacle in state.obstacles.iter_mut() {
            // Falling obstacles are spent; bonus items are not shootable
            if obstacle.falling || obstacle.kind == ObstacleKind::BonusItem {
                continue;
            }
            let hit = check_collision(bullet.rect(), obstacle.rect(), pad)
                || swept_past(old_x, bullet.rect(), obstacle.rect());
            if hit {
                obstacle.falling = true;
                let at = obstacle.center();
                spawn_explosion(&mut state.particles, &mut state.rng, scale, at, WHITE, 8);
                state.bullets.remove(bi);
                continue 'bullets;
            }
        }

        if bullet.x > viewport_w {
            state.bullets.remove(bi);
            continue;
        }
        bi += 1;
    }

    // --- Clouds ---
    for cloud in &mut state.clouds {
        cloud.x -= cloud.speed;
    }
    state.clouds.retain(|c| c.x + c.width >= 0.0);

    // --- Obstacles ---
    let mut oi = 0;
    while oi < state.obstacles.len() {
        let obstacle = &mut state.obstacles[oi];

        if obstacle.falling {
            // Scripted free-fall, exempt from collision
            obstacle.y += 10.0 * scale;
            obstacle.x -= 2.0 * scale;
            obstacle.rotation += 0.2;
            oi += 1;
            continue;
        }

        obstacle.x -= obstacle.speed;

        if check_collision(state.player.rect(), obstacle.rect(), pad) {
            let at = obstacle.center();
            match obstacle.kind {
                ObstacleKind::BonusItem => {
                    state.obstacles.remove(oi);
                    spawn_explosion(&mut state.particles, &mut state.rng, scale, at, GOLD, 30);
                    state.hyper_until_ms = now + HYPER_DURATION_MS;
                    state.score += BONUS_SCORE;
                    log::info!("bonus collected, hyper armed; score {}", state.score);
                    continue;
                }
                _ if hyper => {
                    obstacle.falling = true;
                    spawn_explosion(&mut state.particles, &mut state.rng, scale, at, ORANGE, 15);
                    oi += 1;
                    continue;
                }
                _ => {
                    let at = Vec2::new(state.player.x, state.player.y);
                    spawn_explosion(&mut state.particles, &mut state.rng, scale, at, RED, 20);
                    state.phase = GamePhase::GameOver;
                    log::info!("run over: obstacle collision, score {}", state.score);
                    return;
                }
            }
        }
        oi += 1;
    }
    state
        .obstacles
        .retain(|o| o.x + o.width >= DESPAWN_MARGIN && o.y <= viewport_h);

    // --- Particles ---
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.life -= PARTICLE_DECAY;
    }
    state.particles.retain(|p| p.life > 0.0);

    // --- Score ---
    state.score_acc_ms += dt;
    if state.score_acc_ms >= SCORE_TICK_MS {
        state.score += 1;
        state.score_acc_ms = 0.0;
    }

    // --- Background scroll ---
    if viewport_w > 0.0 {
        for (offset, speed) in state.bg_offsets.iter_mut().zip(BG_LAYER_SPEEDS) {
            *offset = (*offset - speed * scale * (dt as f32 / 16.0)) % viewport_w;
        }
    }
}

/// Advance the pre-run countdown on the raw frame delta. Three one-second
/// display ticks, then a short grace on "GO" before the run goes live.
fn run_countdown(state: &mut GameState, raw_dt_ms: f64) {
    state.countdown_timer_ms += raw_dt_ms;
    while state.countdown_ticks > 0 && state.countdown_timer_ms >= COUNTDOWN_TICK_MS {
        state.countdown_timer_ms -= COUNTDOWN_TICK_MS;
        state.countdown_ticks -= 1;
    }
    if state.countdown_ticks == 0 && state.countdown_timer_ms >= COUNTDOWN_GRACE_MS {
        state.phase = GamePhase::Active;
        log::info!("countdown complete, run live (seed {})", state.seed);
    }
}

/// Fire a projectile if the cooldown allows it
fn try_shoot(state: &mut GameState, now: f64, hyper: bool) {
    if now - state.last_shot_ms < state.shoot_cooldown_ms() {
        return;
    }
    let scale = state.scale;

    // Recoil is gentler in hyper mode for stability during rapid fire
    let recoil = if hyper { HYPER_SHOOT_RECOIL } else { SHOOT_RECOIL };
    state.player.velocity += recoil * scale;

    let speed = if hyper { HYPER_BULLET_SPEED } else { BULLET_SPEED };
    let size_mult = if hyper { HYPER_BULLET_SIZE_MULT } else { 1.0 };
    state.bullets.push(Bullet {
        x: state.player.x + state.player.width * 0.8,
        y: state.player.y + state.player.height * 0.5,
        width: BULLET_WIDTH * scale * size_mult,
        height: BULLET_HEIGHT * scale * size_mult,
        speed: speed * scale,
    });
    state.last_shot_ms = now;
}

/// Time-gated obstacle generation with difficulty-dependent rate and mix
fn spawn_obstacles(state: &mut GameState, now: f64) {
    if now - state.last_spawn_ms <= state.config.spawn_rate_ms {
        return;
    }
    let scale = state.scale;
    let type_roll: f32 = state.rng.random();

    let (kind, width, height, speed) = if state.rng.random::<f32>() < 0.10 {
        // Rare pickup, drifts in slower than the traffic
        (ObstacleKind::BonusItem, 40.0, 40.0, state.config.game_speed * 0.8)
    } else if state.score > 10 && type_roll > 0.65 {
        // Fast airplanes join the mix once the run is underway
        if state.rng.random::<f32>() > 0.5 {
            (ObstacleKind::AirplaneA, 95.0, 60.0, state.config.game_speed + 4.5)
        } else {
            (ObstacleKind::AirplaneB, 95.0, 60.0, state.config.game_speed + 6.5)
        }
    } else {
        (ObstacleKind::Bird, 55.0, 55.0, state.config.game_speed)
    };

    let y = state.rng.random::<f32>() * (state.viewport_h - 100.0 * scale);
    let obstacle = Obstacle {
        x: state.viewport_w,
        y,
        width: width * scale,
        height: height * scale,
        speed: speed * scale,
        kind,
        falling: false,
        rotation: 0.0,
    };
    log::debug!("spawn {:?} at y {:.0}", kind, y);
    state.obstacles.push(obstacle);
    state.last_spawn_ms = now;
}

/// Decorative cloud generation on a fixed interval, independent of
/// difficulty; restricted to the upper half of the viewport
fn spawn_clouds(state: &mut GameState, now: f64) {
    if now - state.last_cloud_ms <= CLOUD_INTERVAL_MS {
        return;
    }
    let scale = state.scale;
    let cloud = Cloud {
        x: state.viewport_w,
        y: state.rng.random::<f32>() * (state.viewport_h * 0.5),
        width: (80.0 + state.rng.random::<f32>() * 40.0) * scale,
        height: 50.0 * scale,
        speed: (1.0 + state.rng.random::<f32>()) * scale,
    };
    state.clouds.push(cloud);
    state.last_cloud_ms = now;
}

/// Radial particle burst at `at`; caller picks color and count
pub(crate) fn spawn_explosion(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    scale: f32,
    at: Vec2,
    color: Color,
    count: usize,
) {
    for _ in 0..count {
        particles.push(Particle {
            pos: at,
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 12.0 * scale,
                (rng.random::<f32>() - 0.5) * 12.0 * scale,
            ),
            life: 1.0,
            color,
            size: (rng.random::<f32>() * 5.0 + 2.0) * scale,
        });
    }
}

/// Small white dust puff near the player's feet, slight downward bias
fn spawn_jump_dust(particles: &mut Vec<Particle>, rng: &mut Pcg32, scale: f32, player: &Player) {
    for _ in 0..5 {
        particles.push(Particle {
            pos: Vec2::new(player.x, player.y + 30.0 * scale),
            vel: Vec2::new(
                (rng.random::<f32>() - 0.5) * 4.0 * scale,
                rng.random::<f32>() * 3.0 * scale,
            ),
            life: 0.6,
            color: WHITE,
            size: (rng.random::<f32>() * 4.0 + 2.0) * scale,
        });
    }
}
