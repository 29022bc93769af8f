/// Game entities: the player ship, enemies, bosses, bullets and explosions.
///
/// Positions are the top-left corner of an entity in terminal cells, kept as
/// floats so per-level speed multipliers stay smooth.  Every entity moves by
/// its own rule through the [`Entity`] trait; rendering and collision only
/// look at entities that are still alive.

use rand::Rng;

use crate::level::Level;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Strict overlap: touching edges do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }
}

/// The bordered play area.  Row 0 is the HUD, row 1 and `height - 2` are the
/// top and bottom borders, the last row holds the controls hint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: u16,
    pub height: u16,
}

impl Arena {
    pub fn new(width: u16, height: u16) -> Self {
        Arena { width, height }
    }

    pub fn left(&self) -> f32 {
        1.0
    }

    /// First column past the playable area (the right wall).
    pub fn right(&self) -> f32 {
        self.width.saturating_sub(1) as f32
    }

    pub fn top(&self) -> f32 {
        2.0
    }

    /// First row past the playable area (the bottom border).
    pub fn bottom(&self) -> f32 {
        self.height.saturating_sub(2) as f32
    }
}

// ── Entity capability set ─────────────────────────────────────────────────────

pub trait Entity {
    /// Advance by one frame of `dt_ms` milliseconds.
    fn update(&mut self, dt_ms: u32, arena: &Arena);
    fn bounding_box(&self) -> Rect;
    fn is_alive(&self) -> bool;
}

/// Moves `x` by `step` and reflects `direction` off the arena walls.
fn patrol(x: &mut f32, direction: &mut f32, step: f32, width: f32, arena: &Arena) {
    *x += step * *direction;
    if *x <= arena.left() {
        *x = arena.left();
        *direction = 1.0;
    } else if *x + width >= arena.right() {
        *x = arena.right() - width;
        *direction = -1.0;
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    /// Rows per frame; negative travels up.
    pub vy: f32,
    pub owner: BulletOwner,
    pub alive: bool,
}

impl Bullet {
    pub fn new(x: f32, y: f32, vy: f32, owner: BulletOwner) -> Self {
        Bullet { x, y, vy, owner, alive: true }
    }
}

impl Entity for Bullet {
    fn update(&mut self, _dt_ms: u32, arena: &Arena) {
        if !self.alive {
            return;
        }
        self.y += self.vy;
        if self.y < arena.top() || self.y >= arena.bottom() {
            self.alive = false;
        }
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(self.x, self.y, 1.0, 1.0)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Short-lived blast left behind by a destroyed ship.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    /// Centre of the blast.
    pub x: f32,
    pub y: f32,
    pub remaining_ms: u32,
    /// Boss-sized blast.
    pub large: bool,
}

impl Explosion {
    pub fn at(rect: &Rect, lifetime_ms: u32, large: bool) -> Self {
        Explosion {
            x: rect.center_x(),
            y: rect.center_y(),
            remaining_ms: lifetime_ms,
            large,
        }
    }
}

impl Entity for Explosion {
    fn update(&mut self, dt_ms: u32, _arena: &Arena) {
        self.remaining_ms = self.remaining_ms.saturating_sub(dt_ms);
    }

    fn bounding_box(&self) -> Rect {
        let r = if self.large { 2.0 } else { 1.0 };
        Rect::new(self.x - r, self.y - r, r * 2.0, r * 2.0)
    }

    fn is_alive(&self) -> bool {
        self.remaining_ms > 0
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub alive: bool,
    /// Milliseconds until the next shot is allowed.
    pub shoot_timer_ms: u32,
}

impl Player {
    /// Sprite is 3 columns × 2 rows.
    pub const WIDTH: f32 = 3.0;
    pub const HEIGHT: f32 = 2.0;

    /// Bottom centre of the arena.
    pub fn new(arena: &Arena) -> Self {
        Player {
            x: ((arena.width as f32 - Self::WIDTH) / 2.0).floor(),
            y: arena.height.saturating_sub(4) as f32,
            alive: true,
            shoot_timer_ms: 0,
        }
    }

    /// Shift horizontally by `dx`, clamped to the arena walls.
    pub fn steer(&mut self, dx: f32, arena: &Arena) {
        let max_x = arena.right() - Self::WIDTH;
        self.x = (self.x + dx).clamp(arena.left(), max_x.max(arena.left()));
    }

    pub fn can_shoot(&self) -> bool {
        self.alive && self.shoot_timer_ms == 0
    }

    /// Bullet leaving the nose of the ship.
    pub fn fire(&mut self, speed: f32, cooldown_ms: u32) -> Bullet {
        self.shoot_timer_ms = cooldown_ms;
        Bullet::new(self.x + 1.0, self.y - 1.0, -speed.abs(), BulletOwner::Player)
    }
}

impl Entity for Player {
    fn update(&mut self, dt_ms: u32, _arena: &Arena) {
        self.shoot_timer_ms = self.shoot_timer_ms.saturating_sub(dt_ms);
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    /// +1.0 drifting right, -1.0 drifting left.
    pub direction: f32,
    pub speed: f32,
    /// Chance per frame to fire once the cooldown has run out.
    pub shoot_chance: f64,
    pub shoot_cooldown_ms: u32,
    pub shoot_timer_ms: u32,
    pub alive: bool,
}

impl Enemy {
    pub const WIDTH: f32 = 3.0;
    pub const HEIGHT: f32 = 2.0;

    pub fn new(x: f32, y: f32, speed: f32, shoot_chance: f64, shoot_cooldown_ms: u32) -> Self {
        Enemy {
            x,
            y,
            direction: 1.0,
            speed,
            shoot_chance,
            shoot_cooldown_ms,
            shoot_timer_ms: shoot_cooldown_ms,
            alive: true,
        }
    }

    /// Rolls the dice once the cooldown is over.
    pub fn try_fire(&mut self, bullet_speed: f32, rng: &mut impl Rng) -> Option<Bullet> {
        if !self.alive || self.shoot_timer_ms > 0 {
            return None;
        }
        if !rng.gen_bool(self.shoot_chance.clamp(0.0, 1.0)) {
            return None;
        }
        self.shoot_timer_ms = self.shoot_cooldown_ms;
        Some(Bullet::new(
            self.x + 1.0,
            self.y + Self::HEIGHT,
            bullet_speed.abs(),
            BulletOwner::Enemy,
        ))
    }
}

impl Entity for Enemy {
    fn update(&mut self, dt_ms: u32, arena: &Arena) {
        if !self.alive {
            return;
        }
        patrol(&mut self.x, &mut self.direction, self.speed, Self::WIDTH, arena);
        self.shoot_timer_ms = self.shoot_timer_ms.saturating_sub(dt_ms);
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}

// ── Boss ──────────────────────────────────────────────────────────────────────

/// Hull colour of a boss; the renderer maps it to a terminal colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BossPalette {
    Purple,
    RedOrange,
    Gold,
}

/// Everything that distinguishes one boss from another.
#[derive(Clone, Debug, PartialEq)]
pub struct BossSpec {
    pub name: &'static str,
    pub max_hp: u32,
    /// Cells per frame.
    pub speed: f32,
    pub shoot_cooldown_ms: u32,
    pub bullet_speed: f32,
    pub palette: BossPalette,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Boss {
    pub spec: BossSpec,
    pub x: f32,
    pub y: f32,
    pub current_hp: u32,
    pub direction: f32,
    /// Time accumulated towards the next shot.
    pub shoot_timer_ms: u32,
    /// Remaining hit-flash time.
    pub hit_timer_ms: u32,
}

impl Boss {
    pub const WIDTH: f32 = 9.0;
    pub const HEIGHT: f32 = 3.0;
    pub const HIT_FLASH_MS: u32 = 200;
    const FLASH_PERIOD_MS: u32 = 50;

    /// Top centre of the arena at full health.
    pub fn new(spec: BossSpec, arena: &Arena) -> Self {
        Boss {
            x: ((arena.width as f32 - Self::WIDTH) / 2.0).floor(),
            y: arena.top(),
            current_hp: spec.max_hp,
            direction: 1.0,
            shoot_timer_ms: 0,
            hit_timer_ms: 0,
            spec,
        }
    }

    pub fn max_hp(&self) -> u32 {
        self.spec.max_hp
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Returns whether the boss survived the hit.  HP never drops below zero.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        self.current_hp = self.current_hp.saturating_sub(damage);
        self.hit_timer_ms = Self::HIT_FLASH_MS;
        self.is_alive()
    }

    /// Current HP as a fraction of max, in `0.0..=1.0`.
    pub fn hp_fraction(&self) -> f32 {
        if self.spec.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f32 / self.spec.max_hp as f32
    }

    /// Whether the hull should be drawn in the flash colour this frame.
    pub fn is_flashing(&self) -> bool {
        self.hit_timer_ms > 0 && (self.hit_timer_ms / Self::FLASH_PERIOD_MS) % 2 == 1
    }

    /// Fires from the bottom centre every `shoot_cooldown_ms`.
    pub fn update_shooting(&mut self, dt_ms: u32) -> Option<Bullet> {
        if !self.is_alive() {
            return None;
        }
        self.shoot_timer_ms += dt_ms;
        if self.shoot_timer_ms < self.spec.shoot_cooldown_ms {
            return None;
        }
        self.shoot_timer_ms = 0;
        let rect = self.bounding_box();
        Some(Bullet::new(
            rect.center_x().floor(),
            rect.y + rect.h,
            self.spec.bullet_speed.abs(),
            BulletOwner::Enemy,
        ))
    }
}

impl Entity for Boss {
    fn update(&mut self, dt_ms: u32, arena: &Arena) {
        if !self.is_alive() {
            return;
        }
        patrol(&mut self.x, &mut self.direction, self.spec.speed, Self::WIDTH, arena);
        self.hit_timer_ms = self.hit_timer_ms.saturating_sub(dt_ms);
    }

    fn bounding_box(&self) -> Rect {
        Rect::new(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }

    fn is_alive(&self) -> bool {
        self.current_hp > 0
    }
}

// ── Master world state ────────────────────────────────────────────────────────

/// Everything that exists while a level is being played.  Cloneable so the
/// per-frame functions in `compute` can return a new copy.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    /// Player and enemy bullets alike.
    pub bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
    pub level: Level,
    pub score: u32,
    pub frame: u64,
    pub arena: Arena,
}
