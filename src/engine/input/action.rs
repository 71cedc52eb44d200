// Game action definitions and mappings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    RotateLeft,
    RotateRight,

    // Combat
    Attack,

    // Debug
    DebugDamage,
    ToggleDebug,

    // Menus
    MenuUp,
    MenuDown,
    Confirm,
    Restart,
}

/// Which set of bindings a key is looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputContext {
    /// Walking around a level
    Gameplay,
    /// Main menu and game over screen
    Menu,
}

/// Represents an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings while playing
pub fn default_gameplay_bindings() -> Vec<(InputSource, Action)> {
    vec![
        // W/S walk along the facing angle, A/D strafe
        (InputSource::key(KeyCode::KeyW), Action::MoveForward),
        (InputSource::key(KeyCode::KeyS), Action::MoveBack),
        (InputSource::key(KeyCode::KeyA), Action::StrafeLeft),
        (InputSource::key(KeyCode::KeyD), Action::StrafeRight),
        (InputSource::key(KeyCode::ArrowLeft), Action::RotateLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::RotateRight),
        (InputSource::key(KeyCode::Space), Action::Attack),
        (InputSource::key(KeyCode::KeyH), Action::DebugDamage),
        (InputSource::key(KeyCode::F3), Action::ToggleDebug),
    ]
}

/// Default keyboard bindings for the menu and game over screens
pub fn default_menu_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::ArrowUp), Action::MenuUp),
        (InputSource::key(KeyCode::ArrowDown), Action::MenuDown),
        (InputSource::key(KeyCode::Enter), Action::Confirm),
        (InputSource::key(KeyCode::NumpadEnter), Action::Confirm),
        (InputSource::key(KeyCode::Space), Action::Confirm),
        (InputSource::key(KeyCode::KeyR), Action::Restart),
    ]
}

/// Default bindings for a context
pub fn default_bindings(context: InputContext) -> Vec<(InputSource, Action)> {
    match context {
        InputContext::Gameplay => default_gameplay_bindings(),
        InputContext::Menu => default_menu_bindings(),
    }
}
