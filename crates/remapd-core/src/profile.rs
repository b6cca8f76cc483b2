// Remapd Device Profiles
// Scores candidate config files against a device vendor/product id

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

/// Only regular files with this suffix are considered during a scan.
pub const PROFILE_SUFFIX: &str = ".conf";

const MAX_ID_LINE: usize = 32;

/// How one candidate file relates to a vendor/product pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Match {
    None,
    Wildcard,
    Exact,
    /// The file lists the id with a `-` prefix. Hard exclusions also
    /// suppress wildcard matches from other candidates in the same scan.
    Excluded,
}

/// Pick the best-matching profile in `dir` for a vendor/product pair.
/// Returns the path and whether the winning match was exact. Candidates are
/// scanned in sorted name order and ties keep the earlier file; an exact
/// match beats a wildcard, and a hard exclusion anywhere in the directory
/// voids wildcard-level winners.
pub fn resolve(dir: &Path, vendor: u16, product: u16) -> Option<(PathBuf, bool)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("failed to scan {}: {}", dir.display(), err);
            return None;
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|ent| ent.ok())
        .map(|ent| ent.path())
        .collect();
    paths.sort();

    let mut best: Option<PathBuf> = None;
    let mut priority = Match::None;
    let mut excluded = false;

    for path in paths {
        if !path.is_file() {
            continue;
        }
        let is_profile = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(PROFILE_SUFFIX));
        if !is_profile {
            continue;
        }

        match check_match(&path, vendor, product) {
            Match::Excluded => excluded = true,
            m if m > priority => {
                priority = m;
                best = Some(path);
            }
            _ => {}
        }
    }

    if excluded && priority < Match::Exact {
        return None;
    }

    match priority {
        Match::None => None,
        _ => best.map(|path| (path, priority == Match::Exact)),
    }
}

/// Scan a single candidate byte by byte. Spaces are skipped, `#` comments
/// run to end of line, and only the `[ids]` block is inspected: any other
/// section header after it ends the scan. An exact id or an exclusion
/// short-circuits; otherwise a lone `*` line makes the file a wildcard
/// match. Unreadable files simply don't match.
fn check_match(path: &Path, vendor: u16, product: u16) -> Match {
    let buf = match fs::read(path) {
        Ok(buf) => buf,
        Err(err) => {
            debug!("failed to read {}: {}", path.display(), err);
            return Match::None;
        }
    };

    let mut line: Vec<u8> = Vec::with_capacity(MAX_ID_LINE);
    let mut seen_ids = false;
    let mut wildcard = false;

    let mut i = 0;
    while i < buf.len() {
        match buf[i] {
            b' ' => {}
            b'#' => {
                // comment runs to end of line; leave the newline in place
                while i + 1 < buf.len() && buf[i + 1] != b'\n' {
                    i += 1;
                }
            }
            b'[' if seen_ids => break,
            b'\n' => {
                match scan_line(&line, seen_ids, vendor, product) {
                    LineResult::IdsHeader => seen_ids = true,
                    LineResult::Wildcard => wildcard = true,
                    LineResult::Matched { omit: true } => return Match::Excluded,
                    LineResult::Matched { omit: false } => return Match::Exact,
                    LineResult::Nothing => {}
                }
                line.clear();
            }
            byte => {
                if line.len() < MAX_ID_LINE - 1 {
                    line.push(byte);
                }
            }
        }
        i += 1;
    }

    // a final line without a terminating newline still counts
    match scan_line(&line, seen_ids, vendor, product) {
        LineResult::Wildcard => wildcard = true,
        LineResult::Matched { omit: true } => return Match::Excluded,
        LineResult::Matched { omit: false } => return Match::Exact,
        LineResult::IdsHeader | LineResult::Nothing => {}
    }

    if wildcard {
        Match::Wildcard
    } else {
        Match::None
    }
}

enum LineResult {
    Nothing,
    IdsHeader,
    Wildcard,
    Matched { omit: bool },
}

fn scan_line(line: &[u8], seen_ids: bool, vendor: u16, product: u16) -> LineResult {
    if !seen_ids {
        if line.starts_with(b"[ids]") {
            return LineResult::IdsHeader;
        }
        return LineResult::Nothing;
    }

    if line.is_empty() {
        return LineResult::Nothing;
    }

    if line == b"*" {
        return LineResult::Wildcard;
    }

    let omit = line[0] == b'-';
    let id = if omit { &line[1..] } else { line };

    if let Some((v, p)) = parse_id(id) {
        if v == vendor && p == product {
            return LineResult::Matched { omit };
        }
    }

    LineResult::Nothing
}

/// Parse a `vendor:product` pair of hex ids.
fn parse_id(line: &[u8]) -> Option<(u16, u16)> {
    static ID_RE: OnceLock<Regex> = OnceLock::new();
    let re = ID_RE.get_or_init(|| {
        Regex::new(r"^([0-9a-fA-F]{1,4}):([0-9a-fA-F]{1,4})$").expect("static regex")
    });

    let line = std::str::from_utf8(line).ok()?;
    let caps = re.captures(line)?;
    let vendor = u16::from_str_radix(&caps[1], 16).ok()?;
    let product = u16::from_str_radix(&caps[2], 16).ok()?;
    Some((vendor, product))
}
