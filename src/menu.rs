/// Menu screens.  A menu only tracks which option is selected; confirming
/// hands back an action token and the game decides what happens next.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuKind {
    Main,
    Pause,
    GameOver,
    LevelComplete,
    LevelSelect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    SelectLevel,
    Resume,
    RestartLevel,
    NextLevel,
    /// Catalog index of the chosen level.
    PlayLevel(usize),
    MainMenu,
    Quit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuOption {
    pub label: String,
    pub action: MenuAction,
}

impl MenuOption {
    fn new(label: impl Into<String>, action: MenuAction) -> Self {
        MenuOption { label: label.into(), action }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Menu {
    pub kind: MenuKind,
    pub title: &'static str,
    options: Vec<MenuOption>,
    selected: usize,
}

impl Menu {
    fn new(kind: MenuKind, title: &'static str, options: Vec<MenuOption>) -> Self {
        Menu { kind, title, options, selected: 0 }
    }

    pub fn main() -> Self {
        Self::new(
            MenuKind::Main,
            "GALAXY SHOOTER",
            vec![
                MenuOption::new("Start Game", MenuAction::StartGame),
                MenuOption::new("Select Level", MenuAction::SelectLevel),
                MenuOption::new("Quit", MenuAction::Quit),
            ],
        )
    }

    pub fn pause() -> Self {
        Self::new(
            MenuKind::Pause,
            "PAUSED",
            vec![
                MenuOption::new("Resume", MenuAction::Resume),
                MenuOption::new("Restart Level", MenuAction::RestartLevel),
                MenuOption::new("Main Menu", MenuAction::MainMenu),
            ],
        )
    }

    pub fn game_over() -> Self {
        Self::new(
            MenuKind::GameOver,
            "GAME OVER",
            vec![
                MenuOption::new("Restart Level", MenuAction::RestartLevel),
                MenuOption::new("Main Menu", MenuAction::MainMenu),
                MenuOption::new("Quit", MenuAction::Quit),
            ],
        )
    }

    /// "Next Level" is only offered when there is one.
    pub fn level_complete(has_next: bool) -> Self {
        let mut options = Vec::with_capacity(4);
        if has_next {
            options.push(MenuOption::new("Next Level", MenuAction::NextLevel));
        }
        options.push(MenuOption::new("Restart Level", MenuAction::RestartLevel));
        options.push(MenuOption::new("Select Level", MenuAction::SelectLevel));
        options.push(MenuOption::new("Main Menu", MenuAction::MainMenu));
        Self::new(MenuKind::LevelComplete, "LEVEL COMPLETE!", options)
    }

    /// One entry per level plus a way back.
    pub fn level_select(names: &[&str]) -> Self {
        let mut options: Vec<MenuOption> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                MenuOption::new(format!("Level {}: {}", i + 1, name), MenuAction::PlayLevel(i))
            })
            .collect();
        options.push(MenuOption::new("Back", MenuAction::MainMenu));
        Self::new(MenuKind::LevelSelect, "SELECT LEVEL", options)
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }

    pub fn confirm(&self) -> Option<MenuAction> {
        self.options.get(self.selected).map(|o| o.action)
    }
}
