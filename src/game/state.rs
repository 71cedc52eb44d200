// Top-level game states

use std::fmt;

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    MainMenu,
    Playing,
    GameOver,
}

impl GameState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MainMenu => "Main Menu",
            Self::Playing => "Playing",
            Self::GameOver => "Game Over",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_in_main_menu() {
        assert_eq!(GameState::default(), GameState::MainMenu);
    }

    #[test]
    fn test_display() {
        assert_eq!(GameState::GameOver.to_string(), "Game Over");
    }
}
