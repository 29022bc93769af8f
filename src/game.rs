/// The game state machine.
///
/// [`transition`] is a pure table from `(state, event)` to the next state and
/// the effects it asks for.  [`Game`] owns the level manager, the active world
/// and the current menu, applies those effects, and drives one frame at a time.

use log::{info, trace, warn};
use rand::Rng;

use crate::compute;
use crate::config::Config;
use crate::entities::{Arena, World};
use crate::input::{Action, Controls};
use crate::level::{Level, LevelManager};
use crate::menu::{Menu, MenuAction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    MainMenu,
    Playing,
    Paused,
    GameOver,
    LevelComplete,
    LevelSelect,
}

/// Something that happened this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Input(Action),
    /// An option confirmed on the active menu.
    Menu(MenuAction),
    PlayerHit,
    LevelCleared,
}

/// Work the game must do when entering the next state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    StartLevel(usize),
    RestartLevel,
    NextLevel,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Pure transition table.  Events with no entry leave the state alone.
pub fn transition(state: GameState, event: Event) -> (GameState, Vec<Effect>) {
    use GameState::*;

    match (state, event) {
        (_, Event::Input(Action::Quit)) | (_, Event::Menu(MenuAction::Quit)) => {
            (state, vec![Effect::Quit])
        }

        (MainMenu, Event::Menu(MenuAction::StartGame)) => (Playing, vec![Effect::StartLevel(0)]),
        (MainMenu | LevelComplete, Event::Menu(MenuAction::SelectLevel)) => (LevelSelect, vec![]),

        (Playing, Event::Input(Action::Pause)) => (Paused, vec![]),
        (Playing, Event::PlayerHit) => (GameOver, vec![]),
        (Playing, Event::LevelCleared) => (LevelComplete, vec![]),

        (Paused, Event::Input(Action::Pause)) | (Paused, Event::Menu(MenuAction::Resume)) => {
            (Playing, vec![])
        }

        (Paused | GameOver | LevelComplete, Event::Input(Action::Restart))
        | (Paused | GameOver | LevelComplete, Event::Menu(MenuAction::RestartLevel)) => {
            (Playing, vec![Effect::RestartLevel])
        }

        (LevelComplete, Event::Menu(MenuAction::NextLevel)) => (Playing, vec![Effect::NextLevel]),

        (LevelSelect, Event::Menu(MenuAction::PlayLevel(index))) => {
            (Playing, vec![Effect::StartLevel(index)])
        }
        (LevelSelect, Event::Input(Action::Pause)) => (MainMenu, vec![]),

        (Paused | GameOver | LevelComplete | LevelSelect, Event::Menu(MenuAction::MainMenu)) => {
            (MainMenu, vec![])
        }

        _ => (state, vec![]),
    }
}

pub struct Game {
    config: Config,
    arena: Arena,
    levels: LevelManager,
    state: GameState,
    world: Option<World>,
    menu: Option<Menu>,
    /// Time spent on the level-complete screen.
    dwell_elapsed_ms: u32,
    /// Score at the start of the current level, restored on restart.
    level_start_score: u32,
    quit: bool,
}

impl Game {
    pub fn new(config: Config, arena: Arena) -> Self {
        Self::with_levels(config, arena, LevelManager::default())
    }

    pub fn with_levels(config: Config, arena: Arena, levels: LevelManager) -> Self {
        Game {
            config,
            arena,
            levels,
            state: GameState::MainMenu,
            world: None,
            menu: Some(Menu::main()),
            dwell_elapsed_ms: 0,
            level_start_score: 0,
            quit: false,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn levels(&self) -> &LevelManager {
        &self.levels
    }

    /// The roster of the level in play; kept while paused or on the
    /// game-over and level-complete screens, dropped on the main menu.
    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn menu(&self) -> Option<&Menu> {
        self.menu.as_ref()
    }

    pub fn has_quit(&self) -> bool {
        self.quit
    }

    pub fn dwell_elapsed_ms(&self) -> u32 {
        self.dwell_elapsed_ms
    }

    pub fn dwell_remaining_ms(&self) -> u32 {
        self.config
            .level_complete_dwell_ms
            .saturating_sub(self.dwell_elapsed_ms)
    }

    /// False while the level-complete screen is still dwelling.
    pub fn accepts_input(&self) -> bool {
        self.state != GameState::LevelComplete
            || self.dwell_elapsed_ms >= self.config.level_complete_dwell_ms
    }

    // ── Frame ────────────────────────────────────────────────────────────────

    /// One frame: handle this frame's key presses, then advance the active
    /// state.  Rendering is left to the caller.
    pub fn step(&mut self, actions: &[Action], controls: Controls, rng: &mut impl Rng) -> Flow {
        for &action in actions {
            self.handle_action(action);
            if self.quit {
                return Flow::Quit;
            }
        }
        self.update(controls, rng);
        if self.quit {
            Flow::Quit
        } else {
            Flow::Continue
        }
    }

    /// Route one key press to the active menu or the transition table.
    pub fn handle_action(&mut self, action: Action) {
        if !self.accepts_input() {
            trace!("ignoring {:?}: {} ms of dwell left", action, self.dwell_remaining_ms());
            return;
        }
        match (action, self.menu.as_mut()) {
            (Action::MenuUp, Some(menu)) => menu.select_previous(),
            (Action::MenuDown, Some(menu)) => menu.select_next(),
            (Action::MenuConfirm | Action::Shoot, Some(menu)) => {
                if let Some(chosen) = menu.confirm() {
                    self.dispatch(Event::Menu(chosen));
                }
            }
            _ => self.dispatch(Event::Input(action)),
        }
    }

    /// State-specific per-frame work.
    pub fn update(&mut self, controls: Controls, rng: &mut impl Rng) {
        match self.state {
            GameState::Playing => {
                let Some(world) = self.world.as_ref() else {
                    return;
                };
                let steered = compute::apply_controls(world, controls, &self.config);
                let next = compute::tick(&steered, &self.config, rng);
                let player_down = !next.player.alive;
                let cleared = next.level.is_complete();
                self.world = Some(next);

                if player_down {
                    self.dispatch(Event::PlayerHit);
                } else if cleared {
                    self.dispatch(Event::LevelCleared);
                }
            }
            GameState::LevelComplete => {
                self.dwell_elapsed_ms = self
                    .dwell_elapsed_ms
                    .saturating_add(self.config.frame_ms());
                self.fade_explosions();
            }
            GameState::GameOver => self.fade_explosions(),
            _ => {}
        }
    }

    fn fade_explosions(&mut self) {
        if let Some(world) = self.world.as_ref() {
            self.world = Some(compute::fade_explosions(world, &self.config));
        }
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    /// Feed one event through the transition table and apply its effects.
    /// If an effect fails (an unknown level) the state does not change.
    pub fn dispatch(&mut self, event: Event) {
        let (next, effects) = transition(self.state, event);
        for effect in effects {
            let applied = match effect {
                Effect::Quit => {
                    info!("quit requested from {:?}", self.state);
                    self.quit = true;
                    true
                }
                Effect::StartLevel(index) => self.start_level(index),
                Effect::RestartLevel => self.restart_level(),
                Effect::NextLevel => self.next_level(),
            };
            if !applied {
                return;
            }
        }
        self.enter(next);
    }

    fn enter(&mut self, next: GameState) {
        if next == self.state {
            return;
        }
        info!("{:?} -> {:?}", self.state, next);
        self.state = next;
        self.menu = match next {
            GameState::MainMenu => Some(Menu::main()),
            GameState::Playing => None,
            GameState::Paused => Some(Menu::pause()),
            GameState::GameOver => Some(Menu::game_over()),
            GameState::LevelComplete => Some(Menu::level_complete(self.levels.has_next())),
            GameState::LevelSelect => Some(Menu::level_select(&self.levels.level_names())),
        };
        match next {
            GameState::MainMenu => self.world = None,
            GameState::LevelComplete => self.dwell_elapsed_ms = 0,
            _ => {}
        }
    }

    fn begin(&mut self, level: Level, score: u32) {
        self.level_start_score = score;
        self.world = Some(compute::init_world(level, self.arena, score, &self.config));
    }

    fn start_level(&mut self, index: usize) -> bool {
        match self.levels.load_level(index) {
            Ok(level) => {
                self.begin(level, 0);
                true
            }
            Err(err) => {
                warn!("{}; staying in {:?}", err, self.state);
                false
            }
        }
    }

    fn restart_level(&mut self) -> bool {
        match self.levels.current_level() {
            Ok(level) => {
                self.begin(level, self.level_start_score);
                true
            }
            Err(err) => {
                warn!("{}; staying in {:?}", err, self.state);
                false
            }
        }
    }

    /// Falls back to restarting the current level when there is no next one.
    fn next_level(&mut self) -> bool {
        let score = self.world.as_ref().map_or(self.level_start_score, |w| w.score);
        match self.levels.next_level() {
            Ok(level) => {
                self.begin(level, score);
                true
            }
            Err(err) => {
                warn!("{}; restarting the current level", err);
                self.restart_level()
            }
        }
    }
}
