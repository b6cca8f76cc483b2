// Remapd Config Compiler
// Two-pass compilation of the layer/keymap model from config text

pub mod loader;

use std::path::Path;

use indexmap::IndexMap;
use log::error;
use smallvec::SmallVec;

use crate::descriptor::{self, Descriptor};
use crate::error::Error;
use crate::ini::{self, Section};
use crate::key::{self, Key};
use crate::layer::Layer;
use crate::modifier::MODIFIER_TABLE;

pub use loader::{INCLUDE_DIR, MAX_FILE_SZ, MAX_LINE_LEN};

/// Capacity of the layer table.
pub const MAX_LAYERS: usize = 64;

/// Upper bound on a single `layer.key = descriptor` expression, in bytes.
pub const MAX_EXP_LEN: usize = 256;

/// Upper bound on an alias name, in bytes.
pub const MAX_ALIAS_LEN: usize = 32;

/// Upper bound on a layer name, in bytes.
pub const MAX_LAYER_NAME_LEN: usize = 64;

/// Upper bound on the `default_layout` global, in characters.
pub const MAX_LAYOUT_NAME_LEN: usize = 32;

/// Number of alias slots, one per possible keycode.
pub const ALIAS_SLOTS: usize = 256;

/// Section headers that create the built-in layers, in initialization order.
const BUILTIN_LAYERS: [&str; 6] = ["main", "control:C", "meta:M", "shift:S", "altgr:G", "alt:A"];

/// Scalar daemon settings from the `[global]` section. The timeout values
/// are data only; this subsystem never starts a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Globals {
    pub macro_timeout: u64,
    pub macro_sequence_timeout: u64,
    pub macro_repeat_timeout: u64,
    pub default_layout: String,
    pub layer_indicator: u8,
}

impl Default for Globals {
    fn default() -> Self {
        Self {
            macro_timeout: 600,
            macro_sequence_timeout: 0,
            macro_repeat_timeout: 50,
            default_layout: String::new(),
            layer_indicator: 0,
        }
    }
}

/// Outcome of a successful `add_layer` call. Re-declaring an existing layer
/// is not an error; it reports the existing slot and leaves it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddLayer {
    Created(usize),
    Exists(usize),
}

/// The compiled configuration handed to the runtime engine.
///
/// Built once per compile: zero state, built-in layers and modifier bindings,
/// then two passes over the user config (declare layers, populate entries).
/// Read-only afterwards; reconfiguration builds a fresh `Config` and swaps it
/// rather than mutating the live one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    layers: IndexMap<String, Layer>,
    aliases: Vec<String>,
    globals: Globals,
}

impl Config {
    /// A config holding only the built-in layers and default modifier
    /// bindings, with `main` at index 0.
    pub fn new() -> Self {
        let mut config = Self {
            layers: IndexMap::new(),
            aliases: vec![String::new(); ALIAS_SLOTS],
            globals: Globals::default(),
        };

        // The built-in declarations are valid and the table is empty, so
        // none of these can fail.
        for decl in BUILTIN_LAYERS {
            let _ = config.add_layer(decl);
        }

        // Default modifier bindings: both physical keycodes of each modifier
        // activate its layer from main, and carry its name as an alias.
        for ent in &MODIFIER_TABLE {
            let Some(idx) = config.layer_index(ent.name) else {
                continue;
            };

            for mod_key in ent.keys() {
                if let Some((_, main)) = config.layers.get_index_mut(0) {
                    main.keymap_mut().set(mod_key, Descriptor::Layer(idx));
                }
                config.aliases[mod_key.index()] = ent.name.to_string();
            }
        }

        config
    }

    /// Load and compile the config at `path`. Loader-level errors are fatal;
    /// everything else is reported and skipped, so a partially invalid file
    /// still yields a usable config.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let content = loader::load(path)?;
        Ok(Self::compile(&content, &path.display().to_string()))
    }

    /// Compile flattened config text. `origin` labels diagnostics.
    pub fn compile(content: &str, origin: &str) -> Self {
        let mut config = Config::new();
        let ini = ini::parse(content);

        // First pass: create all layers from section headers. Aliases and
        // globals also compile here so entry resolution can rely on them.
        for section in &ini.sections {
            match section.name.as_str() {
                "ids" => {}
                "aliases" => config.parse_aliases(origin, section),
                "global" => config.parse_globals(origin, section),
                _ => {
                    if let Err(err) = config.add_layer(&section.name) {
                        error!("{}:{}: {}", origin, section.lnum, err);
                    }
                }
            }
        }

        // Second pass: populate the layer keymaps. An entry may reference a
        // layer declared later in the file, hence the split.
        for section in &ini.sections {
            if matches!(section.name.as_str(), "ids" | "aliases" | "global") {
                continue;
            }

            let layername = match section.name.split_once(':') {
                Some((name, _)) => name,
                None => section.name.as_str(),
            };

            for ent in &section.entries {
                let Some(val) = ent.val.as_deref() else {
                    error!("{}:{}: {}", origin, ent.lnum, Error::InvalidKvp);
                    continue;
                };

                let exp = format!("{}.{} = {}", layername, ent.key, val);
                if let Err(err) = config.add_entry(&exp) {
                    error!("{}:{}: {}", origin, ent.lnum, err);
                }
            }
        }

        config
    }

    /// Declare a layer from a section header `name[:<letters>]`. Keyed on
    /// the name before any suffix: re-declaring reports `Exists` and leaves
    /// the layer's bindings alone.
    pub fn add_layer(&mut self, decl: &str) -> Result<AddLayer, Error> {
        let name = match decl.split_once(':') {
            Some((name, _)) => name,
            None => decl,
        };

        if let Some(idx) = self.layers.get_index_of(name) {
            return Ok(AddLayer::Exists(idx));
        }

        if self.layers.len() >= MAX_LAYERS {
            return Err(Error::TooManyLayers { limit: MAX_LAYERS });
        }

        let layer = Layer::from_decl(decl)?;
        let (idx, _) = self.layers.insert_full(layer.name().to_string(), layer);
        Ok(AddLayer::Created(idx))
    }

    /// Compile a `[<layer>.]<key> = <descriptor>` expression into a keymap
    /// slot. Failure is local to the expression.
    pub fn add_entry(&mut self, exp: &str) -> Result<(), Error> {
        let exp = exp.trim();

        if exp.len() >= MAX_EXP_LEN {
            return Err(Error::ExpressionTooLong(exp.to_string()));
        }

        // A '.' qualifies a layer only if it precedes any '(' , so that
        // descriptor arguments like macro(a.b) are never split.
        let dot = exp.find('.');
        let paren = exp.find('(');
        let (layername, rest) = match dot {
            Some(d) if paren.map_or(true, |p| d < p) => (&exp[..d], &exp[d + 1..]),
            _ => ("main", exp),
        };

        let (keyname, descstr) = rest.split_once('=').ok_or(Error::InvalidKvp)?;
        let keyname = keyname.trim();

        let idx = self
            .layer_index(layername)
            .ok_or_else(|| Error::UnknownLayer(layername.to_string()))?;

        let d = descriptor::parse(descstr, self)?;
        self.set_layer_entry(idx, keyname, d)
    }

    /// Install a descriptor for `keyname` in the layer at `idx`. An alias
    /// may label several keycodes; the descriptor lands on every one of
    /// them. Otherwise the name resolves through the static keycode table.
    fn set_layer_entry(&mut self, idx: usize, keyname: &str, d: Descriptor) -> Result<(), Error> {
        let codes: SmallVec<[Key; 4]> = self
            .aliases
            .iter()
            .enumerate()
            .filter(|(_, alias)| alias.as_str() == keyname)
            .map(|(code, _)| Key::from(code as u8))
            .collect();

        let Some((_, layer)) = self.layers.get_index_mut(idx) else {
            return Err(Error::UnknownLayer(format!("#{idx}")));
        };

        if codes.is_empty() {
            let code =
                key::lookup_keycode(keyname).ok_or_else(|| Error::UnknownKey(keyname.to_string()))?;
            layer.keymap_mut().set(code, d);
        } else {
            for code in codes {
                layer.keymap_mut().set(code, d.clone());
            }
        }

        Ok(())
    }

    /// Compile an `[aliases]` section. An alias that itself names a real key
    /// additionally becomes a live remap on main, not just a label.
    fn parse_aliases(&mut self, origin: &str, section: &Section) {
        for ent in &section.entries {
            let Some(name) = ent.val.as_deref() else {
                error!("{}:{}: {}", origin, ent.lnum, Error::InvalidKvp);
                continue;
            };

            let Some(code) = key::lookup_keycode(&ent.key) else {
                error!(
                    "{}:{}: failed to define alias {}, {} is not a valid keycode",
                    origin, ent.lnum, name, ent.key
                );
                continue;
            };

            if name.len() > MAX_ALIAS_LEN {
                error!("{}:{}: {}", origin, ent.lnum, Error::AliasTooLong(name.to_string()));
                continue;
            }

            if let Some(alias_code) = key::lookup_keycode(name) {
                if let Some((_, main)) = self.layers.get_index_mut(0) {
                    main.keymap_mut().set(
                        code,
                        Descriptor::KeySequence {
                            key: alias_code,
                            mods: 0,
                        },
                    );
                }
            }

            // Last write wins; re-registering under a new name overwrites.
            self.aliases[code.index()] = name.to_string();
        }
    }

    /// Compile a `[global]` section. Unrecognized keys and unparsable values
    /// are reported and leave the option at its prior value.
    fn parse_globals(&mut self, origin: &str, section: &Section) {
        for ent in &section.entries {
            let Some(val) = ent.val.as_deref() else {
                error!("{}:{}: {}", origin, ent.lnum, Error::InvalidKvp);
                continue;
            };

            let result = match ent.key.as_str() {
                "macro_timeout" => {
                    parse_int(&ent.key, val).map(|v| self.globals.macro_timeout = v)
                }
                "macro_sequence_timeout" => {
                    parse_int(&ent.key, val).map(|v| self.globals.macro_sequence_timeout = v)
                }
                "macro_repeat_timeout" => {
                    parse_int(&ent.key, val).map(|v| self.globals.macro_repeat_timeout = v)
                }
                "layer_indicator" => {
                    parse_int(&ent.key, val).map(|v| self.globals.layer_indicator = v)
                }
                "default_layout" => {
                    self.globals.default_layout = val.chars().take(MAX_LAYOUT_NAME_LEN).collect();
                    Ok(())
                }
                _ => Err(Error::UnknownGlobal(ent.key.clone())),
            };

            if let Err(err) = result {
                error!("{}:{}: {}", origin, ent.lnum, err);
            }
        }
    }

    /// Index of the layer with this exact, case-sensitive name.
    pub fn layer_index(&self, name: &str) -> Option<usize> {
        self.layers.get_index_of(name)
    }

    pub fn layer(&self, idx: usize) -> Option<&Layer> {
        self.layers.get_index(idx).map(|(_, layer)| layer)
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    /// The alias registered for a keycode, if any.
    pub fn alias(&self, key: Key) -> Option<&str> {
        let name = self.aliases[key.index()].as_str();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_int<T: std::str::FromStr>(key: &str, val: &str) -> Result<T, Error> {
    val.parse().map_err(|_| Error::InvalidGlobalValue {
        key: key.to_string(),
        val: val.to_string(),
    })
}
