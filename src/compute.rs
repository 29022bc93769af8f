/// Pure game-logic functions for the Playing state.
///
/// Every public function takes an immutable reference to the current
/// [`World`] (and, where needed, an RNG handle) and returns a brand-new
/// `World`.  Side effects are limited to the injected RNG.

use log::{debug, info, trace};
use rand::Rng;

use crate::config::Config;
use crate::entities::{Arena, BulletOwner, Enemy, Entity, Explosion, Player, World};
use crate::input::Controls;
use crate::level::Level;

// ── Scoring ──────────────────────────────────────────────────────────────────

pub const ENEMY_SCORE: u32 = 100;
pub const BOSS_HIT_SCORE: u32 = 50;
pub const BOSS_KILL_SCORE: u32 = 1000;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Spawn `level` into a fresh world.  `score` is carried over from earlier
/// levels of the same run.
pub fn init_world(mut level: Level, arena: Arena, score: u32, cfg: &Config) -> World {
    let (enemies, boss) = level.spawn(&arena, cfg);
    World {
        player: Player::new(&arena),
        enemies,
        boss,
        bullets: Vec::new(),
        explosions: Vec::new(),
        level,
        score,
        frame: 0,
        arena,
    }
}

// ── Input-driven updates (pure) ──────────────────────────────────────────────

pub fn move_player_left(world: &World, cfg: &Config) -> World {
    let mut next = world.clone();
    next.player.steer(-cfg.player_speed, &world.arena);
    next
}

pub fn move_player_right(world: &World, cfg: &Config) -> World {
    let mut next = world.clone();
    next.player.steer(cfg.player_speed, &world.arena);
    next
}

/// Fire from the player's nose, limited by the shot cooldown and the cap on
/// player bullets in flight.
pub fn player_shoot(world: &World, cfg: &Config) -> World {
    let active = world
        .bullets
        .iter()
        .filter(|b| b.alive && b.owner == BulletOwner::Player)
        .count();
    if active >= cfg.max_player_bullets || !world.player.can_shoot() {
        return world.clone();
    }
    let mut next = world.clone();
    let bullet = next
        .player
        .fire(cfg.player_bullet_speed, cfg.player_shoot_cooldown_ms);
    next.bullets.push(bullet);
    next
}

/// Apply the held-key state for one frame.  Left wins over right.
pub fn apply_controls(world: &World, controls: Controls, cfg: &Config) -> World {
    let moved = if controls.left {
        move_player_left(world, cfg)
    } else if controls.right {
        move_player_right(world, cfg)
    } else {
        world.clone()
    };
    if controls.shoot {
        player_shoot(&moved, cfg)
    } else {
        moved
    }
}

// ── Per-frame tick (nearly pure, RNG is injected) ─────────────────────────

/// Advance the simulation by one frame of `cfg.frame_ms()`.
pub fn tick(world: &World, cfg: &Config, rng: &mut impl Rng) -> World {
    let dt = cfg.frame_ms();
    let arena = world.arena;
    let mut next = world.clone();
    next.frame += 1;

    // ── 1. Movement & timers ────────────────────────────────────────────────
    next.player.update(dt, &arena);
    for bullet in &mut next.bullets {
        bullet.update(dt, &arena);
    }
    steer_fleet(&mut next.enemies, &arena);
    for enemy in &mut next.enemies {
        enemy.update(dt, &arena);
    }
    for explosion in &mut next.explosions {
        explosion.update(dt, &arena);
    }
    if let Some(boss) = next.boss.as_mut() {
        boss.update(dt, &arena);
    }
    retain_alive(&mut next);

    // ── 2. Enemy & boss fire ────────────────────────────────────────────────
    if let Some(bullet) = next.boss.as_mut().and_then(|b| b.update_shooting(dt)) {
        next.bullets.push(bullet);
    }
    let mut enemy_bullets = next
        .bullets
        .iter()
        .filter(|b| b.owner == BulletOwner::Enemy)
        .count();
    for enemy in &mut next.enemies {
        if enemy_bullets >= cfg.max_enemy_bullets {
            break;
        }
        if let Some(bullet) = enemy.try_fire(cfg.enemy_bullet_speed, rng) {
            next.bullets.push(bullet);
            enemy_bullets += 1;
        }
    }

    // ── 3. Collisions ───────────────────────────────────────────────────────
    resolve_player_hits(&mut next, cfg);
    resolve_enemy_hits(&mut next, cfg);
    retain_alive(&mut next);

    // ── 4. Completion ───────────────────────────────────────────────────────
    let remaining = next.enemies.len();
    next.level.update(remaining);
    trace!(
        "frame {}: {} enemies, {} bullets, score {}",
        next.frame,
        remaining,
        next.bullets.len(),
        next.score
    );
    next
}

/// Let explosions play out while the world is frozen under a menu.
pub fn fade_explosions(world: &World, cfg: &Config) -> World {
    let mut next = world.clone();
    for explosion in &mut next.explosions {
        explosion.update(cfg.frame_ms(), &world.arena);
    }
    next.explosions.retain(|e| e.is_alive());
    next
}

/// Turn the whole formation around as soon as one live enemy would touch a
/// wall on this frame's step.
fn steer_fleet(enemies: &mut [Enemy], arena: &Arena) {
    let hits_edge = enemies.iter().filter(|e| e.alive).any(|e| {
        let next_x = e.x + e.speed * e.direction;
        next_x <= arena.left() || next_x + Enemy::WIDTH >= arena.right()
    });
    if !hits_edge {
        return;
    }
    for enemy in enemies.iter_mut() {
        enemy.direction = -enemy.direction;
    }
    debug!("fleet reversed");
}

/// Drop every entity that is no longer alive.
fn retain_alive(world: &mut World) {
    world.bullets.retain(|b| b.is_alive());
    world.enemies.retain(|e| e.is_alive());
    world.explosions.retain(|e| e.is_alive());
}

/// Player bullets against enemies and the boss.
fn resolve_player_hits(world: &mut World, cfg: &Config) {
    for bullet in world.bullets.iter_mut() {
        if !bullet.alive || bullet.owner != BulletOwner::Player {
            continue;
        }
        let shot = bullet.bounding_box();

        if let Some(enemy) = world
            .enemies
            .iter_mut()
            .find(|e| e.is_alive() && e.bounding_box().overlaps(&shot))
        {
            bullet.alive = false;
            enemy.alive = false;
            world
                .explosions
                .push(Explosion::at(&enemy.bounding_box(), cfg.explosion_ms, false));
            world.level.enemy_killed();
            world.score += ENEMY_SCORE;
            continue;
        }

        let Some(boss) = world.boss.as_mut() else {
            continue;
        };
        if !boss.is_alive() || !boss.bounding_box().overlaps(&shot) {
            continue;
        }
        bullet.alive = false;
        world.score += BOSS_HIT_SCORE;
        if boss.take_damage(cfg.boss_hit_damage) {
            debug!("{} hit: {}/{}", boss.name(), boss.current_hp, boss.max_hp());
            continue;
        }
        info!("{} defeated", boss.name());
        world
            .explosions
            .push(Explosion::at(&boss.bounding_box(), cfg.explosion_ms * 2, true));
        world.score += BOSS_KILL_SCORE;
        world.level.boss_killed();
        world.boss = None;
    }
}

/// Enemy and boss bullets against the player.  Any hit is fatal.
fn resolve_enemy_hits(world: &mut World, cfg: &Config) {
    if !world.player.is_alive() {
        return;
    }
    let ship = world.player.bounding_box();
    let hit = world
        .bullets
        .iter_mut()
        .find(|b| b.alive && b.owner == BulletOwner::Enemy && b.bounding_box().overlaps(&ship));
    if let Some(bullet) = hit {
        bullet.alive = false;
        world.player.alive = false;
        world
            .explosions
            .push(Explosion::at(&ship, cfg.explosion_ms * 2, true));
        info!("player destroyed on frame {}", world.frame);
    }
}
