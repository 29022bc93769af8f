use galaxy_shooter::config::Config;
use galaxy_shooter::entities::{Arena, Bullet, BulletOwner};
use galaxy_shooter::game::*;
use galaxy_shooter::input::{Action, Controls};
use galaxy_shooter::level::{Formation, LevelManager, LevelSpec};
use galaxy_shooter::menu::MenuAction;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// 20 ms frames, 100 ms dwell, enemies that never fire.
fn quick_config() -> Config {
    Config {
        fps: 50,
        level_complete_dwell_ms: 100,
        enemy_base_shoot_chance: 0.0,
        ..Config::default()
    }
}

fn tiny_catalog() -> Vec<LevelSpec> {
    ["Alpha", "Beta"]
        .into_iter()
        .map(|name| LevelSpec {
            name,
            formation: Formation::grid(1, 2),
            speed_multiplier: 1.0,
            shoot_multiplier: 1.0,
            boss: None,
        })
        .collect()
}

fn new_game() -> Game {
    Game::with_levels(quick_config(), Arena::new(60, 30), LevelManager::new(tiny_catalog()))
}

fn idle() -> Controls {
    Controls::default()
}

/// Main menu → "Start Game".
fn start(game: &mut Game) {
    game.handle_action(Action::MenuConfirm);
    assert_eq!(game.state(), GameState::Playing);
}

/// Empty the roster and let one frame notice.
fn clear_level(game: &mut Game, rng: &mut StdRng) {
    game.world_mut().unwrap().enemies.clear();
    game.step(&[], idle(), rng);
    assert_eq!(game.state(), GameState::LevelComplete);
}

fn sit_out_dwell(game: &mut Game, rng: &mut StdRng) {
    while !game.accepts_input() {
        game.update(idle(), rng);
    }
}

/// Drop an enemy bullet right onto the ship.
fn shoot_player(game: &mut Game) {
    let world = game.world_mut().unwrap();
    let (x, y) = (world.player.x + 1.0, world.player.y - 0.5);
    world.bullets.push(Bullet::new(x, y, 0.5, BulletOwner::Enemy));
}

// ── Transition table ──────────────────────────────────────────────────────────

#[test]
fn table_start_pause_resume() {
    assert_eq!(
        transition(GameState::MainMenu, Event::Menu(MenuAction::StartGame)),
        (GameState::Playing, vec![Effect::StartLevel(0)])
    );
    assert_eq!(
        transition(GameState::Playing, Event::Input(Action::Pause)),
        (GameState::Paused, vec![])
    );
    assert_eq!(
        transition(GameState::Paused, Event::Input(Action::Pause)),
        (GameState::Playing, vec![])
    );
    assert_eq!(
        transition(GameState::Paused, Event::Menu(MenuAction::Resume)),
        (GameState::Playing, vec![])
    );
}

#[test]
fn table_outcomes_of_play() {
    assert_eq!(transition(GameState::Playing, Event::PlayerHit).0, GameState::GameOver);
    assert_eq!(transition(GameState::Playing, Event::LevelCleared).0, GameState::LevelComplete);
    assert_eq!(
        transition(GameState::GameOver, Event::Menu(MenuAction::RestartLevel)),
        (GameState::Playing, vec![Effect::RestartLevel])
    );
    assert_eq!(
        transition(GameState::LevelComplete, Event::Menu(MenuAction::NextLevel)),
        (GameState::Playing, vec![Effect::NextLevel])
    );
    assert_eq!(
        transition(GameState::LevelComplete, Event::Menu(MenuAction::SelectLevel)).0,
        GameState::LevelSelect
    );
    assert_eq!(
        transition(GameState::LevelSelect, Event::Menu(MenuAction::PlayLevel(3))),
        (GameState::Playing, vec![Effect::StartLevel(3)])
    );
}

#[test]
fn table_quit_from_anywhere() {
    for state in [
        GameState::MainMenu,
        GameState::Playing,
        GameState::Paused,
        GameState::GameOver,
        GameState::LevelComplete,
        GameState::LevelSelect,
    ] {
        assert_eq!(
            transition(state, Event::Input(Action::Quit)),
            (state, vec![Effect::Quit])
        );
    }
}

#[test]
fn table_ignores_unrelated_events() {
    assert_eq!(
        transition(GameState::Paused, Event::Input(Action::Shoot)),
        (GameState::Paused, vec![])
    );
    assert_eq!(
        transition(GameState::MainMenu, Event::PlayerHit),
        (GameState::MainMenu, vec![])
    );
    assert_eq!(
        transition(GameState::Playing, Event::Input(Action::Restart)),
        (GameState::Playing, vec![])
    );
}

// ── Game flow ─────────────────────────────────────────────────────────────────

#[test]
fn starts_on_main_menu_without_world() {
    let game = new_game();
    assert_eq!(game.state(), GameState::MainMenu);
    assert!(game.world().is_none());
    assert!(game.menu().is_some());
}

#[test]
fn start_loads_first_level() {
    let mut game = new_game();
    start(&mut game);
    let world = game.world().unwrap();
    assert_eq!(world.level.index(), 0);
    assert_eq!(world.enemies.len(), 2);
    assert!(game.menu().is_none());
}

#[test]
fn paused_ignores_shoot_and_resumes_unchanged() {
    let mut rng = seeded_rng();
    let mut game = new_game();
    start(&mut game);
    game.step(&[], idle(), &mut rng);
    game.step(&[Action::Pause], idle(), &mut rng);
    assert_eq!(game.state(), GameState::Paused);
    let snapshot = game.world().unwrap().clone();

    let held = Controls { left: true, right: false, shoot: true };
    game.step(&[Action::MoveLeft, Action::MoveRight], held, &mut rng);
    game.step(&[], held, &mut rng);
    assert_eq!(game.state(), GameState::Paused);
    assert_eq!(game.world().unwrap(), &snapshot);

    game.handle_action(Action::Pause);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.world().unwrap(), &snapshot);
}

#[test]
fn space_confirms_the_selected_option() {
    let mut rng = seeded_rng();
    let mut game = new_game();
    game.step(&[Action::Shoot], idle(), &mut rng); // "Start Game"
    assert_eq!(game.state(), GameState::Playing);

    game.step(&[Action::Pause, Action::Shoot], idle(), &mut rng); // "Resume"
    assert_eq!(game.state(), GameState::Playing);
}

#[test]
fn explosions_play_out_under_game_over_menu() {
    let mut rng = seeded_rng();
    let mut game = new_game();
    start(&mut game);
    shoot_player(&mut game);
    game.step(&[], idle(), &mut rng);
    assert_eq!(game.state(), GameState::GameOver);
    assert!(!game.world().unwrap().explosions.is_empty());

    for _ in 0..100 {
        game.step(&[], idle(), &mut rng); // 2 s
    }
    let world = game.world().unwrap();
    assert!(world.explosions.is_empty());
    assert!(!world.player.alive);
    assert_eq!(game.state(), GameState::GameOver);
}

#[test]
fn player_hit_ends_in_game_over_then_restart() {
    let mut rng = seeded_rng();
    let mut game = new_game();
    start(&mut game);
    shoot_player(&mut game);
    game.step(&[], idle(), &mut rng);
    assert_eq!(game.state(), GameState::GameOver);
    assert!(!game.world().unwrap().player.alive);

    game.step(&[Action::Restart], idle(), &mut rng);
    assert_eq!(game.state(), GameState::Playing);
    let world = game.world().unwrap();
    assert!(world.player.alive);
    assert_eq!(world.level.index(), 0);
    assert_eq!(world.enemies.len(), 2);
}

#[test]
fn game_over_menu_returns_to_main_menu() {
    let mut rng = seeded_rng();
    let mut game = new_game();
    start(&mut game);
    shoot_player(&mut game);
    game.step(&[], idle(), &mut rng);
    game.step(&[Action::MenuDown, Action::MenuConfirm], idle(), &mut rng);
    assert_eq!(game.state(), GameState::MainMenu);
    assert!(game.world().is_none());
}

#[test]
fn cleared_level_goes_to_level_complete() {
    let mut rng = seeded_rng();
    let mut game = new_game();
    start(&mut game);
    clear_level(&mut game, &mut rng);
    assert!(game.world().unwrap().level.is_complete());
    assert_eq!(game.dwell_elapsed_ms(), 0);
}

#[test]
fn dwell_ignores_input_until_threshold() {
    let mut rng = seeded_rng();
    let mut game = new_game();
    start(&mut game);
    clear_level(&mut game, &mut rng);

    for _ in 0..4 {
        game.update(idle(), &mut rng); // 80 ms
    }
    game.handle_action(Action::MenuDown);
    game.handle_action(Action::Quit);
    assert_eq!(game.menu().unwrap().selected_index(), 0);
    assert!(!game.has_quit());

    game.update(idle(), &mut rng); // exactly 100 ms
    assert!(game.accepts_input());
    game.handle_action(Action::MenuDown);
    assert_eq!(game.menu().unwrap().selected_index(), 1);
}

#[test]
fn next_level_carries_score() {
    let mut rng = seeded_rng();
    let mut game = new_game();
    start(&mut game);
    game.world_mut().unwrap().score = 500;
    clear_level(&mut game, &mut rng);
    sit_out_dwell(&mut game, &mut rng);

    game.handle_action(Action::MenuConfirm); // "Next Level"
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.levels().current_index(), 1);
    let world = game.world().unwrap();
    assert_eq!(world.level.name(), "Beta");
    assert_eq!(world.score, 500);
}

#[test]
fn restart_restores_score_at_level_start() {
    let mut rng = seeded_rng();
    let mut game = new_game();
    start(&mut game);
    game.world_mut().unwrap().score = 500;
    clear_level(&mut game, &mut rng);
    sit_out_dwell(&mut game, &mut rng);
    game.handle_action(Action::MenuConfirm);

    game.world_mut().unwrap().score = 900;
    game.handle_action(Action::Pause);
    game.handle_action(Action::Restart);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.world().unwrap().score, 500);
    assert_eq!(game.levels().current_index(), 1);
}

#[test]
fn next_on_last_level_falls_back_to_restart() {
    let mut rng = seeded_rng();
    let mut game = new_game();
    start(&mut game);
    clear_level(&mut game, &mut rng);
    sit_out_dwell(&mut game, &mut rng);
    game.handle_action(Action::MenuConfirm); // onto "Beta", the last level
    clear_level(&mut game, &mut rng);
    sit_out_dwell(&mut game, &mut rng);

    assert!(!game.levels().has_next());
    game.dispatch(Event::Menu(MenuAction::NextLevel));
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.levels().current_index(), 1);
    let world = game.world().unwrap();
    assert!(!world.level.is_complete());
    assert_eq!(world.enemies.len(), 2);
}

#[test]
fn level_select_starts_chosen_level() {
    let mut game = new_game();
    game.handle_action(Action::MenuDown); // "Select Level"
    game.handle_action(Action::MenuConfirm);
    assert_eq!(game.state(), GameState::LevelSelect);

    game.handle_action(Action::MenuDown);
    game.handle_action(Action::MenuConfirm);
    assert_eq!(game.state(), GameState::Playing);
    assert_eq!(game.levels().current_index(), 1);
}

#[test]
fn unknown_level_leaves_state_unchanged() {
    let mut game = new_game();
    game.handle_action(Action::MenuDown);
    game.handle_action(Action::MenuConfirm);
    assert_eq!(game.state(), GameState::LevelSelect);

    game.dispatch(Event::Menu(MenuAction::PlayLevel(9)));
    assert_eq!(game.state(), GameState::LevelSelect);
    assert_eq!(game.levels().current_index(), 0);
    assert!(game.world().is_none());
}

#[test]
fn escape_backs_out_of_level_select() {
    let mut game = new_game();
    game.handle_action(Action::MenuDown);
    game.handle_action(Action::MenuConfirm);
    game.handle_action(Action::Pause);
    assert_eq!(game.state(), GameState::MainMenu);
}

#[test]
fn quit_stops_the_loop() {
    let mut rng = seeded_rng();
    let mut game = new_game();
    assert_eq!(game.step(&[Action::Quit], idle(), &mut rng), Flow::Quit);
    assert!(game.has_quit());

    let mut game = new_game();
    game.handle_action(Action::MenuUp); // wraps to "Quit"
    assert_eq!(game.step(&[Action::MenuConfirm], idle(), &mut rng), Flow::Quit);
}

#[test]
fn held_keys_steer_the_ship() {
    let mut rng = seeded_rng();
    let mut game = new_game();
    start(&mut game);
    let x0 = game.world().unwrap().player.x;
    game.step(&[], Controls { left: true, right: false, shoot: true }, &mut rng);
    let world = game.world().unwrap();
    assert!(world.player.x < x0);
    assert_eq!(
        world.bullets.iter().filter(|b| b.owner == BulletOwner::Player).count(),
        1
    );
}
