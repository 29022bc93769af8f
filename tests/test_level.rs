use std::collections::HashSet;

use galaxy_shooter::config::Config;
use galaxy_shooter::entities::Arena;
use galaxy_shooter::error::GameError;
use galaxy_shooter::level::*;

fn arena() -> Arena {
    Arena::new(60, 30)
}

// ── Catalog ───────────────────────────────────────────────────────────────────

#[test]
fn catalog_has_five_levels_in_order() {
    let levels = LevelManager::default();
    assert_eq!(levels.level_count(), 5);
    assert_eq!(
        levels.level_names(),
        vec!["First Contact", "Double Trouble", "Invasion Force", "War Zone", "Final Stand"]
    );
}

#[test]
fn invasion_force_configuration() {
    let mut levels = LevelManager::default();
    let level = levels.load_level(2).unwrap();
    assert_eq!(level.number(), 3);
    assert_eq!(level.name(), "Invasion Force");
    assert_eq!(level.enemy_count(), 15);
    assert_eq!(level.speed_multiplier(), 1.6);
    assert_eq!(level.shoot_multiplier(), 2.0);
    let boss = level.boss_spec().expect("level 3 has a boss");
    assert_eq!(boss.name, "Guardian Destroyer");
    assert_eq!(boss.max_hp, 5);
    assert_eq!(boss.shoot_cooldown_ms, 1000);
}

#[test]
fn bosses_get_tougher() {
    let catalog = default_catalog();
    let hp: Vec<Option<u32>> = catalog.iter().map(|s| s.boss.as_ref().map(|b| b.max_hp)).collect();
    assert_eq!(hp, vec![None, None, Some(5), Some(8), Some(12)]);
}

#[test]
fn enemy_count_matches_positions_for_every_level() {
    let mut levels = LevelManager::default();
    for i in 0..levels.level_count() {
        let level = levels.load_level(i).unwrap();
        assert_eq!(level.enemy_count(), level.enemy_positions(&arena()).len(), "level {}", i + 1);
    }
}

// ── Formation ─────────────────────────────────────────────────────────────────

#[test]
fn three_by_five_gives_fifteen_distinct_positions() {
    let formation = Formation::grid(3, 5);
    let positions = formation.positions(&arena());
    assert_eq!(positions.len(), 15);

    let distinct: HashSet<(i32, i32)> =
        positions.iter().map(|&(x, y)| (x as i32, y as i32)).collect();
    assert_eq!(distinct.len(), 15);

    for row in positions.chunks(5) {
        let y = row[0].1;
        assert!(row.iter().all(|p| p.1 == y));
        let xs: HashSet<i32> = row.iter().map(|p| p.0 as i32).collect();
        assert_eq!(xs.len(), 5, "two enemies share a row position");
    }
}

#[test]
fn formation_is_deterministic() {
    let f = Formation::grid(4, 5);
    assert_eq!(f.positions(&arena()), f.positions(&arena()));
}

#[test]
fn formation_fits_inside_arena() {
    let a = Arena::new(50, 24);
    for spec in default_catalog() {
        for (x, y) in spec.formation.positions(&a) {
            assert!(x >= a.left() && x + 3.0 <= a.right(), "{} x={}", spec.name, x);
            assert!(y >= a.top() && y + 2.0 <= a.bottom(), "{} y={}", spec.name, y);
        }
    }
}

// ── Level ─────────────────────────────────────────────────────────────────────

fn solo_level(boss: bool) -> Level {
    let mut catalog = default_catalog();
    let mut spec = catalog.remove(if boss { 2 } else { 0 });
    spec.formation = Formation::grid(1, 3);
    Level::new(0, spec)
}

#[test]
fn spawn_applies_multipliers() {
    let cfg = Config::default();
    let mut levels = LevelManager::default();
    let mut level = levels.load_level(2).unwrap();
    let (enemies, boss) = level.spawn(&arena(), &cfg);

    assert_eq!(enemies.len(), 15);
    for e in &enemies {
        assert_eq!(e.speed, cfg.enemy_base_speed * 1.6);
        assert_eq!(e.shoot_chance, cfg.enemy_base_shoot_chance * 2.0);
    }
    assert_eq!(boss.unwrap().current_hp, 5);
}

#[test]
fn spawn_resets_counters() {
    let cfg = Config::default();
    let mut level = solo_level(false);
    level.spawn(&arena(), &cfg);
    level.enemy_killed();
    level.enemy_killed();
    level.update(0);
    assert!(level.is_complete());

    level.spawn(&arena(), &cfg);
    assert_eq!(level.progress(), (0, 3));
    assert!(!level.is_complete());
}

#[test]
fn completion_needs_boss_down() {
    let mut level = solo_level(true);
    level.update(0);
    assert!(!level.is_complete());
    level.boss_killed();
    level.update(1);
    assert!(!level.is_complete());
    level.update(0);
    assert!(level.is_complete());
}

#[test]
fn completion_does_not_revert() {
    let mut level = solo_level(false);
    level.update(0);
    assert!(level.is_complete());
    level.update(3);
    assert!(level.is_complete());
}

#[test]
fn info_reports_progress() {
    let mut level = solo_level(false);
    level.enemy_killed();
    let info = level.info();
    assert_eq!(info.number, 1);
    assert_eq!(info.name, "First Contact");
    assert_eq!((info.enemies_killed, info.total_enemies), (1, 3));
    assert!((info.progress_percentage - 100.0 / 3.0).abs() < 0.01);
    assert!(!info.is_complete);
}

// ── LevelManager ──────────────────────────────────────────────────────────────

#[test]
fn load_out_of_range_fails_and_keeps_current() {
    let mut levels = LevelManager::default();
    levels.load_level(1).unwrap();

    let err = levels.load_level(5).unwrap_err();
    assert!(matches!(err, GameError::NoSuchLevel { index: 5, count: 5 }));
    assert_eq!(levels.current_index(), 1);
    assert_eq!(levels.current_level().unwrap().name(), "Double Trouble");
}

#[test]
fn next_level_advances_until_the_last() {
    let mut levels = LevelManager::default();
    for expected in 1..5 {
        assert!(levels.has_next());
        assert_eq!(levels.next_level().unwrap().index(), expected);
    }
    assert!(!levels.has_next());
    let err = levels.next_level().unwrap_err();
    assert!(matches!(err, GameError::NoMoreLevels { current: 4 }));
    assert_eq!(levels.current_index(), 4);
}

#[test]
fn loaded_level_is_not_spawned() {
    let mut levels = LevelManager::default();
    let level = levels.load_level(0).unwrap();
    assert_eq!(level.progress(), (0, 5));
    assert!(!level.is_complete());
    assert!(!level.boss_defeated());
}
