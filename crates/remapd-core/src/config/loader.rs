// Remapd Config Loader
// Reads a root config file and expands include directives under hard limits

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};

use crate::error::Error;

/// Upper bound on the fully expanded config text, in bytes.
pub const MAX_FILE_SZ: usize = 65536;

/// Upper bound on a single source line, in bytes, terminator included.
pub const MAX_LINE_LEN: usize = 256;

/// Shared system directory searched after the including file's own directory.
pub const INCLUDE_DIR: &str = "/usr/share/remapd";

const INCLUDE_PREFIX: &str = "include ";

/// Read `path` and return its contents with every `include` line replaced by
/// the verbatim contents of the resolved target file.
///
/// Expansion is single-level: include directives inside an included file are
/// not expanded further. A missing or unreadable include is reported and
/// skipped; a missing root file, an oversized line, or exceeding the total
/// size bound aborts the load.
pub fn load(path: &Path) -> Result<String, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::File {
        path: path.to_path_buf(),
        source,
    })?;

    let mut out = String::new();

    for (n, line) in content.split_inclusive('\n').enumerate() {
        let lnum = n + 1;

        if line.len() > MAX_LINE_LEN {
            error!("{}:{}: maximum line length exceeded", path.display(), lnum);
            return Err(Error::LineTooLong { limit: MAX_LINE_LEN });
        }

        if let Some(target) = line.strip_prefix(INCLUDE_PREFIX) {
            let target = target.trim();

            if target.contains('.') {
                error!(
                    "{}:{}: {}",
                    path.display(),
                    lnum,
                    Error::UnsafeIncludePath(target.to_string())
                );
                continue;
            }

            let Some(resolved) = resolve_include_path(path, target) else {
                error!(
                    "{}:{}: {}",
                    path.display(),
                    lnum,
                    Error::IncludeNotFound(target.to_string())
                );
                continue;
            };

            debug!("including {} from {}", resolved.display(), path.display());

            match fs::read_to_string(&resolved) {
                Ok(included) => {
                    if out.len() + included.len() > MAX_FILE_SZ {
                        return Err(Error::FileTooLarge { limit: MAX_FILE_SZ });
                    }
                    out.push_str(&included);
                }
                Err(err) => {
                    error!("{}:{}: failed to include {}: {}", path.display(), lnum, target, err);
                }
            }
        } else {
            if out.len() + line.len() > MAX_FILE_SZ {
                return Err(Error::FileTooLarge { limit: MAX_FILE_SZ });
            }
            out.push_str(line);
        }
    }

    Ok(out)
}

/// Resolve an include target: first next to the including file, then in the
/// shared system directory. The target has already been screened for `.`,
/// which blocks both path traversal and explicit extensions.
fn resolve_include_path(including: &Path, target: &str) -> Option<PathBuf> {
    let dir = including.parent().unwrap_or_else(|| Path::new("."));

    let sibling = dir.join(target);
    if sibling.exists() {
        return Some(sibling);
    }

    let shared = Path::new(INCLUDE_DIR).join(target);
    if shared.exists() {
        return Some(shared);
    }

    None
}
