// Remapd Layer Model
// A named 256-slot keymap with an optional modifier composition

use crate::config::MAX_LAYER_NAME_LEN;
use crate::descriptor::Descriptor;
use crate::error::Error;
use crate::key::Key;
use crate::modifier;

/// Number of keymap slots, one per possible keycode.
pub const KEYMAP_SLOTS: usize = 256;

/// One descriptor per possible keycode. Slots default to `Noop`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    slots: Vec<Descriptor>,
}

impl Keymap {
    pub fn new() -> Self {
        Self {
            slots: vec![Descriptor::Noop; KEYMAP_SLOTS],
        }
    }

    pub fn get(&self, key: Key) -> &Descriptor {
        &self.slots[key.index()]
    }

    /// Install a descriptor, overwriting whatever the slot held before.
    pub fn set(&mut self, key: Key, descriptor: Descriptor) {
        self.slots[key.index()] = descriptor;
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new()
    }
}

/// A layer: a keymap that can be made active to override default key
/// behavior. Layers are referenced by index into the config's layer table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    name: String,
    mods: u8,
    keymap: Keymap,
}

impl Layer {
    /// Build a layer from a section header declaration `name[:<letters>]`.
    /// The suffix letters are modifier codes describing the layer's modifier
    /// composition; it is only meaningful for the built-in layers but is
    /// accepted anywhere.
    pub fn from_decl(decl: &str) -> Result<Self, Error> {
        let (name, suffix) = match decl.split_once(':') {
            Some((name, suffix)) => (name, Some(suffix)),
            None => (decl, None),
        };

        if name.len() > MAX_LAYER_NAME_LEN {
            return Err(Error::LayerNameTooLong(name.to_string()));
        }

        let mut mods = 0u8;
        if let Some(suffix) = suffix {
            for letter in suffix.chars() {
                match modifier::mask_for_letter(letter) {
                    Some(mask) => mods |= mask,
                    None => return Err(Error::InvalidLayerModifier(letter)),
                }
            }
        }

        Ok(Self {
            name: name.to_string(),
            mods,
            keymap: Keymap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mods(&self) -> u8 {
        self.mods
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub(crate) fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{MOD_CTRL, MOD_SHIFT};

    #[test]
    fn test_plain_decl() {
        let layer = Layer::from_decl("nav").unwrap();
        assert_eq!(layer.name(), "nav");
        assert_eq!(layer.mods(), 0);
        assert_eq!(*layer.keymap().get(Key::from(30)), Descriptor::Noop);
    }

    #[test]
    fn test_decl_with_modifier_suffix() {
        let layer = Layer::from_decl("custom:CS").unwrap();
        assert_eq!(layer.name(), "custom");
        assert_eq!(layer.mods(), MOD_CTRL | MOD_SHIFT);
    }

    #[test]
    fn test_decl_with_invalid_suffix() {
        assert!(matches!(
            Layer::from_decl("custom:Cx"),
            Err(Error::InvalidLayerModifier('x'))
        ));
    }

    #[test]
    fn test_decl_name_too_long() {
        let long = "x".repeat(MAX_LAYER_NAME_LEN + 1);
        assert!(matches!(
            Layer::from_decl(&long),
            Err(Error::LayerNameTooLong(_))
        ));
    }

    #[test]
    fn test_keymap_last_write_wins() {
        let mut keymap = Keymap::new();
        keymap.set(Key::from(30), Descriptor::Layer(1));
        keymap.set(Key::from(30), Descriptor::Toggle(2));
        assert_eq!(*keymap.get(Key::from(30)), Descriptor::Toggle(2));
    }
}
