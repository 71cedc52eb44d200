// Main menu: option list and selection

/// Menu entries, top to bottom
pub const MENU_OPTIONS: [&str; 4] = ["Start Game", "Load Game", "Options", "Quit"];

pub const MENU_TITLE: &str = "MY ADVENTURE GAME";
pub const MENU_VERSION: &str = "v1.0.0";

/// What confirming an entry asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    StartGame,
    LoadGame,
    Options,
    Quit,
}

impl MenuCommand {
    fn from_index(index: usize) -> Self {
        match index {
            0 => Self::StartGame,
            1 => Self::LoadGame,
            2 => Self::Options,
            _ => Self::Quit,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MainMenu {
    selected: usize,
}

impl MainMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &'static [&'static str] {
        &MENU_OPTIONS
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Previous entry, wrapping to the bottom
    pub fn move_up(&mut self) {
        self.selected = (self.selected + MENU_OPTIONS.len() - 1) % MENU_OPTIONS.len();
    }

    /// Next entry, wrapping to the top
    pub fn move_down(&mut self) {
        self.selected = (self.selected + 1) % MENU_OPTIONS.len();
    }

    pub fn confirm(&self) -> MenuCommand {
        MenuCommand::from_index(self.selected)
    }
}
