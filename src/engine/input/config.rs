// Input configuration and remapping system

use super::action::{default_bindings, Action, InputContext, InputSource};
use std::collections::HashMap;

/// Key bindings for one input context
/// Maps input sources (keys) to game actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Context this config is for
    context: InputContext,

    /// Mapping from input sources to actions
    bindings: HashMap<InputSource, Action>,

    /// Reverse mapping for quick lookups (action -> all sources)
    action_to_sources: HashMap<Action, Vec<InputSource>>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new(context: InputContext) -> Self {
        Self {
            context,
            bindings: HashMap::new(),
            action_to_sources: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(context: InputContext, bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self::new(context);
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Create a configuration holding the default bindings of a context
    pub fn with_defaults(context: InputContext) -> Self {
        Self::from_bindings(context, default_bindings(context))
    }

    pub fn context(&self) -> InputContext {
        self.context
    }

    /// Bind an input source to an action
    pub fn bind(&mut self, source: InputSource, action: Action) {
        // Remove any existing binding for this source
        self.unbind_source(source);

        self.bindings.insert(source, action);
        self.action_to_sources.entry(action).or_default().push(source);
    }

    /// Unbind an input source
    pub fn unbind_source(&mut self, source: InputSource) {
        if let Some(action) = self.bindings.remove(&source) {
            if let Some(sources) = self.action_to_sources.get_mut(&action) {
                sources.retain(|s| *s != source);
                if sources.is_empty() {
                    self.action_to_sources.remove(&action);
                }
            }
        }
    }

    /// Unbind all sources for an action
    pub fn unbind_action(&mut self, action: Action) {
        if let Some(sources) = self.action_to_sources.remove(&action) {
            for source in sources {
                self.bindings.remove(&source);
            }
        }
    }

    /// Get the action bound to an input source
    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Get all input sources bound to an action
    pub fn get_sources(&self, action: Action) -> Vec<InputSource> {
        self.action_to_sources
            .get(&action)
            .cloned()
            .unwrap_or_default()
    }

    /// Check if an action has any bindings
    pub fn has_binding(&self, action: Action) -> bool {
        self.action_to_sources.contains_key(&action)
    }

    /// Clear all bindings
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.action_to_sources.clear();
    }

    /// Reset to the default bindings of this context
    pub fn reset_to_defaults(&mut self) {
        self.clear();
        for (source, action) in default_bindings(self.context) {
            self.bind(source, action);
        }
    }
}

/// Bindings for every context
///
/// A key may mean different things in different contexts (Space attacks while
/// playing and confirms in menus); lookups return every match.
#[derive(Debug)]
pub struct InputConfigManager {
    gameplay: InputConfig,
    menu: InputConfig,
}

impl InputConfigManager {
    /// Create a config manager with default bindings
    pub fn new() -> Self {
        Self {
            gameplay: InputConfig::with_defaults(InputContext::Gameplay),
            menu: InputConfig::with_defaults(InputContext::Menu),
        }
    }

    /// Get the configuration for a context
    pub fn get_config(&self, context: InputContext) -> &InputConfig {
        match context {
            InputContext::Gameplay => &self.gameplay,
            InputContext::Menu => &self.menu,
        }
    }

    /// Get a mutable reference to a context's configuration
    pub fn get_config_mut(&mut self, context: InputContext) -> &mut InputConfig {
        match context {
            InputContext::Gameplay => &mut self.gameplay,
            InputContext::Menu => &mut self.menu,
        }
    }

    /// Every action an input source is bound to, across contexts
    pub fn get_actions(&self, source: InputSource) -> impl Iterator<Item = Action> + '_ {
        [&self.gameplay, &self.menu]
            .into_iter()
            .filter_map(move |config| config.get_action(source))
    }

    /// Reset all configurations to defaults
    pub fn reset_all_to_defaults(&mut self) {
        self.gameplay.reset_to_defaults();
        self.menu.reset_to_defaults();
    }
}

impl Default for InputConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_config_creation() {
        let config = InputConfig::new(InputContext::Menu);
        assert_eq!(config.context(), InputContext::Menu);
        assert!(!config.has_binding(Action::Confirm));
    }

    #[test]
    fn test_bind_action() {
        let mut config = InputConfig::new(InputContext::Gameplay);
        let source = InputSource::key(KeyCode::KeyJ);
        config.bind(source, Action::Attack);

        assert_eq!(config.get_action(source), Some(Action::Attack));
    }

    #[test]
    fn test_unbind_source() {
        let mut config = InputConfig::with_defaults(InputContext::Gameplay);
        let source = InputSource::key(KeyCode::KeyW);
        config.unbind_source(source);

        assert_eq!(config.get_action(source), None);
        assert!(!config.has_binding(Action::MoveForward));
    }

    #[test]
    fn test_unbind_action() {
        let mut config = InputConfig::with_defaults(InputContext::Menu);
        config.unbind_action(Action::Confirm);

        assert_eq!(config.get_action(InputSource::key(KeyCode::Enter)), None);
        assert_eq!(config.get_action(InputSource::key(KeyCode::Space)), None);
    }

    #[test]
    fn test_get_sources() {
        let config = InputConfig::with_defaults(InputContext::Menu);
        let sources = config.get_sources(Action::Confirm);
        assert_eq!(sources.len(), 3);
        assert!(sources.contains(&InputSource::key(KeyCode::Enter)));
        assert!(sources.contains(&InputSource::key(KeyCode::Space)));
    }

    #[test]
    fn test_rebind_source() {
        let mut config = InputConfig::new(InputContext::Gameplay);
        let source = InputSource::key(KeyCode::KeyA);

        config.bind(source, Action::StrafeLeft);
        config.bind(source, Action::RotateLeft);

        assert_eq!(config.get_action(source), Some(Action::RotateLeft));
        assert!(!config.has_binding(Action::StrafeLeft));
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut config = InputConfig::new(InputContext::Gameplay);
        config.bind(InputSource::key(KeyCode::KeyZ), Action::Attack);
        config.reset_to_defaults();

        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyZ)), None);
        assert!(config.has_binding(Action::Attack));
    }

    #[test]
    fn test_manager_space_maps_to_both_contexts() {
        let manager = InputConfigManager::new();
        let actions: Vec<_> = manager.get_actions(InputSource::key(KeyCode::Space)).collect();
        assert_eq!(actions, vec![Action::Attack, Action::Confirm]);
    }

    #[test]
    fn test_manager_reset_all() {
        let mut manager = InputConfigManager::new();
        manager.get_config_mut(InputContext::Gameplay).clear();
        assert!(!manager.get_config(InputContext::Gameplay).has_binding(Action::Attack));

        manager.reset_all_to_defaults();
        assert!(manager.get_config(InputContext::Gameplay).has_binding(Action::Attack));
    }
}
