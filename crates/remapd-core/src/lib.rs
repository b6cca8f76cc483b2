// Remapd Core Library
// Config compilation and device profile resolution for the remapd daemon

pub mod config;
pub mod descriptor;
pub mod error;
pub mod ini;
pub mod key;
pub mod layer;
pub mod modifier;
pub mod profile;

pub use config::{AddLayer, Config, Globals};
pub use descriptor::{Descriptor, DescriptorError};
pub use error::Error;
pub use key::Key;
pub use layer::{Keymap, Layer};
pub use modifier::ModifierEntry;
