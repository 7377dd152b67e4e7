use std::{collections::VecDeque, iter::Iterator};

use serde::Deserialize;
use smol_str::SmolStr;
use winit::event::{ElementState, VirtualKeyCode};

use crate::actions;

/// Input mapper
///
/// Maps host keyboard events to named actions of the viewer, such as
/// `exit` or `export`. Actions are identified by a readable string so
/// key bindings can live in the YAML config.
#[derive(Debug)]
pub struct InputMap {
    actions: Box<[SmolStr]>,
    /// Mapping of host keyboard keys to application actions, by index.
    keys: Box<[(VirtualKeyCode, usize)]>,
    /// Buffer of collected actions, as they happen.
    events: VecDeque<SmolStr>,
    /// Current state of the action. Whether its key is pressed down.
    state: Vec<InputState>,
}

/// One binding from the config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InputDef {
    pub action: SmolStr,
    #[serde(default)]
    pub keyboard_keys: Vec<VirtualKeyCode>,
}

impl InputDef {
    pub fn new(action: &str, keyboard_keys: &[VirtualKeyCode]) -> Self {
        Self {
            action: SmolStr::new(action),
            keyboard_keys: keyboard_keys.to_vec(),
        }
    }

    /// Bindings used when the config does not specify any.
    pub fn defaults() -> Vec<InputDef> {
        vec![
            InputDef::new(actions::EXIT, &[VirtualKeyCode::Escape, VirtualKeyCode::Q]),
            InputDef::new(actions::EXPORT, &[VirtualKeyCode::S]),
        ]
    }
}

#[derive(Debug)]
struct InputState {
    action: SmolStr,
    pressed: bool,
}

impl InputMap {
    pub fn new(defs: &[InputDef]) -> Self {
        log::debug!("input definitions: {:#?}", defs);

        let keys = Self::build_keys(defs);
        let actions = defs.iter().map(|def| def.action.clone()).collect();

        InputMap {
            actions,
            keys,
            events: VecDeque::new(),
            state: Vec::new(),
        }
    }

    /// Build a mapping of [`VirtualKeyCode`]s to indices into the given action definition mapping.
    fn build_keys(defs: &[InputDef]) -> Box<[(VirtualKeyCode, usize)]> {
        defs.iter()
            // definitions will be mapped by their index
            .enumerate()
            // flatten borrowed keycodes into one iterator of copied keycodes
            .flat_map(|(index, def)| {
                def.keyboard_keys
                    .iter()
                    .copied()
                    .map(move |keycode| (keycode, index))
            })
            .collect::<Vec<(VirtualKeyCode, usize)>>()
            .into_boxed_slice()
    }

    /// Given a user input keycode, map it to a named action.
    pub fn map_key(&self, key: VirtualKeyCode) -> Option<SmolStr> {
        self.keys
            .iter()
            .find(|(keycode, _)| *keycode == key)
            .and_then(|(_, index)| self.actions.get(*index))
            .cloned()
    }

    /// Push key event into the input state.
    pub fn push_key(&mut self, keycode: VirtualKeyCode, state: ElementState) {
        // Convert `winit` key to our input framework
        match self.map_key(keycode) {
            Some(action) => {
                let pressed = state == ElementState::Pressed;
                if pressed {
                    // Stream of actions in order
                    self.events.push_back(action.clone());
                }

                // Map of state flags that can be checked by code
                match self.state.iter_mut().find(|el| el.action == action) {
                    Some(existing) => existing.pressed = pressed,
                    None => {
                        // Insert new state
                        self.state.push(InputState { action, pressed })
                    }
                }
            }
            None => {
                log::trace!("no input mapping for {keycode:?}");
            }
        }
    }

    pub fn is_action_pressed(&self, action: impl AsRef<str>) -> bool {
        let query = action.as_ref().trim();
        self.state
            .iter()
            .find(|state| state.action == query)
            .map(|state| state.pressed)
            .unwrap_or(false)
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = SmolStr> + '_ {
        self.events.drain(..)
    }

    /// Start a new frame. Presses are only reported for the frame
    /// they arrived in.
    pub fn clear_state(&mut self) {
        // All keys that were release last frame must be removed
        self.state.retain(|state| state.pressed);

        for state in &mut self.state {
            state.pressed = false;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let input = InputMap::new(&InputDef::defaults());

        assert_eq!(input.map_key(VirtualKeyCode::Escape).as_deref(), Some("exit"));
        assert_eq!(input.map_key(VirtualKeyCode::Q).as_deref(), Some("exit"));
        assert_eq!(input.map_key(VirtualKeyCode::S).as_deref(), Some("export"));
        assert_eq!(input.map_key(VirtualKeyCode::A), None);
    }

    #[test]
    fn test_actions() {
        let mut input = InputMap::new(&InputDef::defaults());

        input.push_key(VirtualKeyCode::A, ElementState::Pressed);
        assert!(!input.is_action_pressed("exit"));

        input.push_key(VirtualKeyCode::Escape, ElementState::Pressed);
        assert!(input.is_action_pressed("exit"));
        assert!(input.is_action_pressed(" exit "));
        assert!(!input.is_action_pressed("export"));

        // Presses only last for one frame.
        input.clear_state();
        assert!(!input.is_action_pressed("exit"));

        input.push_key(VirtualKeyCode::S, ElementState::Pressed);
        input.push_key(VirtualKeyCode::S, ElementState::Released);
        assert!(!input.is_action_pressed("export"));

        let events: Vec<SmolStr> = input.drain_events().collect();
        assert_eq!(events, ["exit", "export"]);
        assert_eq!(input.drain_events().count(), 0);
    }

    #[test]
    fn test_from_yaml() {
        let defs: Vec<InputDef> = serde_yaml::from_str(
            "
- action: export
  keyboard_keys: [E, F12]
- action: unbound
",
        )
        .unwrap();
        assert!(defs[1].keyboard_keys.is_empty());

        let input = InputMap::new(&defs);
        assert_eq!(input.map_key(VirtualKeyCode::F12).as_deref(), Some("export"));
        assert_eq!(input.map_key(VirtualKeyCode::Escape), None);
    }
}
