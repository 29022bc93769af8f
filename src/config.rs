/// Tunable gameplay constants.
///
/// Speeds are in terminal cells per frame, timers in milliseconds.  One frame
/// advances the clock by [`Config::frame_ms`].

// ── Defaults ─────────────────────────────────────────────────────────────────

const FPS: u32 = 30;

/// Input is ignored on the level-complete screen for this long.
const LEVEL_COMPLETE_DWELL_MS: u32 = 5000;

/// HP removed from a boss per player bullet.
const BOSS_HIT_DAMAGE: u32 = 1;

const PLAYER_SPEED: f32 = 0.7;
const PLAYER_SHOOT_COOLDOWN_MS: u32 = 250;
const MAX_PLAYER_BULLETS: usize = 3;
const PLAYER_BULLET_SPEED: f32 = 1.0;

const ENEMY_BASE_SPEED: f32 = 0.2;
/// Per-frame chance an enemy fires once its cooldown has run out (×1.0 level).
const ENEMY_BASE_SHOOT_CHANCE: f64 = 0.01;
const ENEMY_SHOOT_COOLDOWN_MS: u32 = 1000;
const ENEMY_BULLET_SPEED: f32 = 0.5;
const MAX_ENEMY_BULLETS: usize = 5;

const EXPLOSION_MS: u32 = 400;

// Five enemies per row at 8-cell spacing plus borders.
const MIN_WIDTH: u16 = 50;
const MIN_HEIGHT: u16 = 24;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub fps: u32,
    pub level_complete_dwell_ms: u32,
    pub boss_hit_damage: u32,
    pub player_speed: f32,
    pub player_shoot_cooldown_ms: u32,
    pub max_player_bullets: usize,
    pub player_bullet_speed: f32,
    pub enemy_base_speed: f32,
    pub enemy_base_shoot_chance: f64,
    pub enemy_shoot_cooldown_ms: u32,
    pub enemy_bullet_speed: f32,
    pub max_enemy_bullets: usize,
    pub explosion_ms: u32,
    pub min_width: u16,
    pub min_height: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fps: FPS,
            level_complete_dwell_ms: LEVEL_COMPLETE_DWELL_MS,
            boss_hit_damage: BOSS_HIT_DAMAGE,
            player_speed: PLAYER_SPEED,
            player_shoot_cooldown_ms: PLAYER_SHOOT_COOLDOWN_MS,
            max_player_bullets: MAX_PLAYER_BULLETS,
            player_bullet_speed: PLAYER_BULLET_SPEED,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_base_shoot_chance: ENEMY_BASE_SHOOT_CHANCE,
            enemy_shoot_cooldown_ms: ENEMY_SHOOT_COOLDOWN_MS,
            enemy_bullet_speed: ENEMY_BULLET_SPEED,
            max_enemy_bullets: MAX_ENEMY_BULLETS,
            explosion_ms: EXPLOSION_MS,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
        }
    }
}

impl Config {
    /// Fixed time step of one frame.
    pub fn frame_ms(&self) -> u32 {
        1000 / self.fps.max(1)
    }
}
