// Remapd Error Types
// Errors produced while loading and compiling a configuration

use std::io;
use std::path::PathBuf;

use crate::descriptor::DescriptorError;

/// Errors produced by the config loader and compiler.
///
/// Loader-level errors (`File` on the root file, `FileTooLarge`,
/// `LineTooLong`) abort the whole compile. Every other variant is local to a
/// single section entry: the caller reports it with the source path and line
/// number and moves on to the next entry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("maximum file size ({limit}) exceeded")]
    FileTooLarge { limit: usize },

    #[error("maximum line length ({limit}) exceeded")]
    LineTooLong { limit: usize },

    #[error("include path '{0}' is not allowed")]
    UnsafeIncludePath(String),

    #[error("failed to resolve include path: {0}")]
    IncludeNotFound(String),

    #[error("'{0}' is not a valid layer")]
    UnknownLayer(String),

    #[error("max layers ({limit}) exceeded")]
    TooManyLayers { limit: usize },

    #[error("'{0}' exceeds the maximum layer name length")]
    LayerNameTooLong(String),

    #[error("'{0}' is not a valid layer modifier")]
    InvalidLayerModifier(char),

    #[error("'{0}' is not a valid keycode or alias")]
    UnknownKey(String),

    #[error("'{0}' exceeds the maximum expression length")]
    ExpressionTooLong(String),

    #[error("'{0}' exceeds the maximum alias length")]
    AliasTooLong(String),

    #[error("'{0}' is not a valid global option")]
    UnknownGlobal(String),

    #[error("invalid value '{val}' for global option {key}")]
    InvalidGlobalValue { key: String, val: String },

    #[error("invalid key value pair")]
    InvalidKvp,

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}
