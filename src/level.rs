/// Levels: declarative difficulty records plus the runtime counters of the
/// level being played, and the manager that sequences them.

use log::{info, warn};

use crate::config::Config;
use crate::entities::{Arena, Boss, BossPalette, BossSpec, Enemy};
use crate::error::{GameError, Result};

// ── Layout ───────────────────────────────────────────────────────────────────

/// Rows of evenly spaced enemies, centred horizontally.  Odd rows are shifted
/// right by a third of the column spacing.
#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    pub rows: u16,
    pub per_row: u16,
    /// Columns between neighbouring enemies.
    pub spacing: u16,
    /// Rows between neighbouring enemy rows.
    pub row_spacing: u16,
    /// Row of the first enemy line.
    pub start_y: u16,
}

impl Formation {
    pub const fn grid(rows: u16, per_row: u16) -> Self {
        Formation { rows, per_row, spacing: 8, row_spacing: 3, start_y: 6 }
    }

    pub fn count(&self) -> usize {
        self.rows as usize * self.per_row as usize
    }

    /// Spawn coordinates, row by row.  Deterministic for a given arena.
    pub fn positions(&self, arena: &Arena) -> Vec<(f32, f32)> {
        let span = self.per_row.saturating_sub(1) as i32 * self.spacing as i32;
        let start_x = ((arena.width as i32 - span) / 2 - 1).max(1);
        (0..self.rows)
            .flat_map(|row| {
                let y = self.start_y + row * self.row_spacing;
                let offset = if row % 2 == 1 { self.spacing / 3 } else { 0 };
                (0..self.per_row).map(move |col| {
                    let x = start_x + (col * self.spacing + offset) as i32;
                    (x as f32, y as f32)
                })
            })
            .collect()
    }
}

/// Static configuration of one level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelSpec {
    pub name: &'static str,
    pub formation: Formation,
    pub speed_multiplier: f32,
    pub shoot_multiplier: f64,
    pub boss: Option<BossSpec>,
}

// ── Catalog ──────────────────────────────────────────────────────────────────

fn guardian_destroyer() -> BossSpec {
    BossSpec {
        name: "Guardian Destroyer",
        max_hp: 5,
        speed: 0.5,
        shoot_cooldown_ms: 1000,
        bullet_speed: 0.5,
        palette: BossPalette::Purple,
    }
}

fn war_machine() -> BossSpec {
    BossSpec {
        name: "War Machine",
        max_hp: 8,
        speed: 0.5,
        shoot_cooldown_ms: 800,
        bullet_speed: 0.5,
        palette: BossPalette::RedOrange,
    }
}

fn omega_commander() -> BossSpec {
    BossSpec {
        name: "Omega Commander",
        max_hp: 12,
        speed: 0.5,
        shoot_cooldown_ms: 600,
        bullet_speed: 0.6,
        palette: BossPalette::Gold,
    }
}

/// The five shipped levels, easiest first.
pub fn default_catalog() -> Vec<LevelSpec> {
    vec![
        LevelSpec {
            name: "First Contact",
            formation: Formation::grid(1, 5),
            speed_multiplier: 1.0,
            shoot_multiplier: 1.0,
            boss: None,
        },
        LevelSpec {
            name: "Double Trouble",
            formation: Formation::grid(2, 5),
            speed_multiplier: 1.3,
            shoot_multiplier: 1.5,
            boss: None,
        },
        LevelSpec {
            name: "Invasion Force",
            formation: Formation::grid(3, 5),
            speed_multiplier: 1.6,
            shoot_multiplier: 2.0,
            boss: Some(guardian_destroyer()),
        },
        LevelSpec {
            name: "War Zone",
            formation: Formation::grid(3, 5),
            speed_multiplier: 1.8,
            shoot_multiplier: 2.3,
            boss: Some(war_machine()),
        },
        LevelSpec {
            name: "Final Stand",
            formation: Formation::grid(4, 5),
            speed_multiplier: 2.0,
            shoot_multiplier: 2.5,
            boss: Some(omega_commander()),
        },
    ]
}

// ── Level ────────────────────────────────────────────────────────────────────

/// Snapshot for HUD and summary screens.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelInfo {
    pub number: usize,
    pub name: &'static str,
    pub total_enemies: usize,
    pub enemies_killed: usize,
    pub is_complete: bool,
    pub progress_percentage: f32,
}

/// A catalog entry being played.  The configuration never changes; the
/// counters are reset by [`Level::spawn`].
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    index: usize,
    spec: LevelSpec,
    total_enemies: usize,
    enemies_killed: usize,
    boss_defeated: bool,
    is_complete: bool,
}

impl Level {
    pub fn new(index: usize, spec: LevelSpec) -> Self {
        Level {
            index,
            total_enemies: spec.formation.count(),
            spec,
            enemies_killed: 0,
            boss_defeated: false,
            is_complete: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based level number for display.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn enemy_count(&self) -> usize {
        self.spec.formation.count()
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.spec.speed_multiplier
    }

    pub fn shoot_multiplier(&self) -> f64 {
        self.spec.shoot_multiplier
    }

    pub fn boss_spec(&self) -> Option<&BossSpec> {
        self.spec.boss.as_ref()
    }

    pub fn enemy_positions(&self, arena: &Arena) -> Vec<(f32, f32)> {
        self.spec.formation.positions(arena)
    }

    /// Enemy with this level's multipliers applied.
    pub fn create_enemy(&self, x: f32, y: f32, cfg: &Config) -> Enemy {
        Enemy::new(
            x,
            y,
            cfg.enemy_base_speed * self.spec.speed_multiplier,
            cfg.enemy_base_shoot_chance * self.spec.shoot_multiplier,
            cfg.enemy_shoot_cooldown_ms,
        )
    }

    /// Builds the enemy roster and boss for this level and resets the
    /// counters.  Ownership of the roster passes to the caller.
    pub fn spawn(&mut self, arena: &Arena, cfg: &Config) -> (Vec<Enemy>, Option<Boss>) {
        let enemies: Vec<Enemy> = self
            .enemy_positions(arena)
            .into_iter()
            .map(|(x, y)| self.create_enemy(x, y, cfg))
            .collect();
        let boss = self.spec.boss.clone().map(|spec| Boss::new(spec, arena));

        self.total_enemies = enemies.len();
        self.enemies_killed = 0;
        self.boss_defeated = false;
        self.is_complete = false;

        info!(
            "spawned level {} \"{}\": {} enemies, boss: {}",
            self.number(),
            self.name(),
            enemies.len(),
            boss.as_ref().map(|b| b.name()).unwrap_or("none"),
        );
        (enemies, boss)
    }

    pub fn enemy_killed(&mut self) {
        self.enemies_killed += 1;
    }

    pub fn boss_killed(&mut self) {
        self.boss_defeated = true;
    }

    pub fn boss_defeated(&self) -> bool {
        self.boss_defeated
    }

    /// Marks the level complete once the roster is empty and the boss, if
    /// any, is down.  Never reverts until the next spawn.
    pub fn update(&mut self, remaining_enemies: usize) {
        if self.is_complete || remaining_enemies > 0 {
            return;
        }
        if self.spec.boss.is_none() || self.boss_defeated {
            self.is_complete = true;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// `(enemies_killed, total_enemies)`
    pub fn progress(&self) -> (usize, usize) {
        (self.enemies_killed, self.total_enemies)
    }

    pub fn info(&self) -> LevelInfo {
        let progress_percentage = if self.total_enemies > 0 {
            self.enemies_killed as f32 / self.total_enemies as f32 * 100.0
        } else {
            0.0
        };
        LevelInfo {
            number: self.number(),
            name: self.name(),
            total_enemies: self.total_enemies,
            enemies_killed: self.enemies_killed,
            is_complete: self.is_complete,
            progress_percentage,
        }
    }
}

// ── LevelManager ─────────────────────────────────────────────────────────────

/// Ordered level catalog and the index of the level in play.
#[derive(Clone, Debug)]
pub struct LevelManager {
    catalog: Vec<LevelSpec>,
    current: usize,
}

impl Default for LevelManager {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

impl LevelManager {
    pub fn new(catalog: Vec<LevelSpec>) -> Self {
        LevelManager { catalog, current: 0 }
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn level_names(&self) -> Vec<&'static str> {
        self.catalog.iter().map(|spec| spec.name).collect()
    }

    /// Makes `index` the current level.  On failure the current level is
    /// left as it was.
    pub fn load_level(&mut self, index: usize) -> Result<Level> {
        let spec = self.catalog.get(index).cloned().ok_or_else(|| {
            warn!("rejected load of level index {}", index);
            GameError::NoSuchLevel { index, count: self.catalog.len() }
        })?;
        self.current = index;
        info!("loaded level {} \"{}\"", index + 1, spec.name);
        Ok(Level::new(index, spec))
    }

    /// Fresh copy of the current level.
    pub fn current_level(&mut self) -> Result<Level> {
        self.load_level(self.current)
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.catalog.len()
    }

    pub fn next_level(&mut self) -> Result<Level> {
        if !self.has_next() {
            return Err(GameError::NoMoreLevels { current: self.current });
        }
        self.load_level(self.current + 1)
    }
}
