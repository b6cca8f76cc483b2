// Remapd Descriptor Grammar
// Parses action expressions into the compiled values stored in keymap slots

use crate::config::Config;
use crate::key::{self, Key};
use crate::modifier;

/// A compiled action bound to a keycode within a layer.
///
/// `Layer`, `Oneshot` and `Toggle` reference their target layer by index into
/// the config's layer table, never by address, so they stay valid as the
/// table grows. `Macro` payloads are opaque to this subsystem and handed to
/// the runtime engine verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Descriptor {
    #[default]
    Noop,
    Layer(usize),
    Oneshot(usize),
    Toggle(usize),
    KeySequence {
        key: Key,
        mods: u8,
    },
    Macro(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("empty descriptor")]
    Empty,

    #[error("'{0}' is missing a closing parenthesis")]
    Unterminated(String),

    #[error("'{0}' is not a valid action")]
    UnknownAction(String),

    #[error("'{0}' is not a valid layer")]
    UnknownLayer(String),

    #[error("'{0}' is not a valid modifier")]
    UnknownModifier(String),

    #[error("'{0}' is not a valid key")]
    UnknownKey(String),
}

/// Parse a descriptor expression.
///
/// Supported forms: `layer(<name>)`, `oneshot(<name>)`, `toggle(<name>)`,
/// `macro(<payload>)`, and key sequences like `C-S-a` built from the
/// single-letter modifier codes. Layer-name arguments resolve against the
/// config being compiled, which is what lets a two-pass compile reference
/// layers declared later in the same file.
pub fn parse(text: &str, config: &Config) -> Result<Descriptor, DescriptorError> {
    let text = text.trim();

    if text.is_empty() {
        return Err(DescriptorError::Empty);
    }

    if let Some((op, rest)) = text.split_once('(') {
        let arg = rest
            .strip_suffix(')')
            .ok_or_else(|| DescriptorError::Unterminated(text.to_string()))?;

        return match op {
            "layer" => Ok(Descriptor::Layer(resolve_layer(arg, config)?)),
            "oneshot" => Ok(Descriptor::Oneshot(resolve_layer(arg, config)?)),
            "toggle" => Ok(Descriptor::Toggle(resolve_layer(arg, config)?)),
            "macro" => Ok(Descriptor::Macro(arg.to_string())),
            _ => Err(DescriptorError::UnknownAction(op.to_string())),
        };
    }

    parse_key_sequence(text)
}

fn resolve_layer(name: &str, config: &Config) -> Result<usize, DescriptorError> {
    config
        .layer_index(name)
        .ok_or_else(|| DescriptorError::UnknownLayer(name.to_string()))
}

/// Parse `[<mod>-...]<key>` into a keycode plus modifier mask. The final
/// token is the key; every preceding `-`-separated token must be a
/// single-letter modifier code.
fn parse_key_sequence(text: &str) -> Result<Descriptor, DescriptorError> {
    let mut mods = 0u8;
    let mut rest = text;

    while let Some((tok, tail)) = rest.split_once('-') {
        // A trailing empty tail means the key itself is '-', e.g. "C--".
        if tail.is_empty() {
            break;
        }

        let mut letters = tok.chars();
        let mask = match (letters.next(), letters.next()) {
            (Some(letter), None) => modifier::mask_for_letter(letter),
            _ => None,
        };

        match mask {
            Some(mask) => mods |= mask,
            None => return Err(DescriptorError::UnknownModifier(tok.to_string())),
        }

        rest = tail;
    }

    let key = key::lookup_keycode(rest).ok_or_else(|| DescriptorError::UnknownKey(rest.to_string()))?;

    Ok(Descriptor::KeySequence { key, mods })
}
