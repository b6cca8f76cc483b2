// Remapd Ini Tokenizer
// Splits raw config text into ordered sections of key/value entries

use log::debug;

/// A single `key = value` line. Lines without an `=` keep the whole text in
/// `key` and have no value; the compiler decides whether that is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub val: Option<String>,
    pub lnum: usize,
}

/// A `[name]` section and the entries that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub lnum: usize,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ini {
    pub sections: Vec<Section>,
}

/// Tokenize config text. Blank lines and `#` comment lines are skipped.
/// Entries that appear before the first section header are dropped with a
/// debug diagnostic; order of sections and entries is preserved.
pub fn parse(content: &str) -> Ini {
    let mut ini = Ini::default();

    for (n, raw) in content.lines().enumerate() {
        let lnum = n + 1;
        let line = raw.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            ini.sections.push(Section {
                name: name.to_string(),
                lnum,
                entries: Vec::new(),
            });
            continue;
        }

        let entry = match line.split_once('=') {
            Some((key, val)) => Entry {
                key: key.trim().to_string(),
                val: Some(val.trim().to_string()),
                lnum,
            },
            None => Entry {
                key: line.to_string(),
                val: None,
                lnum,
            },
        };

        match ini.sections.last_mut() {
            Some(section) => section.entries.push(entry),
            None => debug!("line {}: entry outside of any section ignored", lnum),
        }
    }

    ini
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_and_entries() {
        let ini = parse("[main]\na = b\n\n[shift]\nx = y\n");
        assert_eq!(ini.sections.len(), 2);
        assert_eq!(ini.sections[0].name, "main");
        assert_eq!(ini.sections[0].lnum, 1);
        assert_eq!(ini.sections[0].entries.len(), 1);
        assert_eq!(ini.sections[0].entries[0].key, "a");
        assert_eq!(ini.sections[0].entries[0].val.as_deref(), Some("b"));
        assert_eq!(ini.sections[1].name, "shift");
        assert_eq!(ini.sections[1].entries[0].lnum, 5);
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let ini = parse("# header comment\n\n[main]\n# another\na = b\n");
        assert_eq!(ini.sections.len(), 1);
        assert_eq!(ini.sections[0].entries.len(), 1);
    }

    #[test]
    fn test_entry_without_value() {
        let ini = parse("[main]\nnot a pair\n");
        let ent = &ini.sections[0].entries[0];
        assert_eq!(ent.key, "not a pair");
        assert_eq!(ent.val, None);
    }

    #[test]
    fn test_value_keeps_later_equals() {
        let ini = parse("[main]\nequal = =\n");
        let ent = &ini.sections[0].entries[0];
        assert_eq!(ent.key, "equal");
        assert_eq!(ent.val.as_deref(), Some("="));
    }

    #[test]
    fn test_entry_before_section_dropped() {
        let ini = parse("a = b\n[main]\n");
        assert_eq!(ini.sections.len(), 1);
        assert!(ini.sections[0].entries.is_empty());
    }

    #[test]
    fn test_section_suffix_kept_verbatim() {
        let ini = parse("[nav:C]\n");
        assert_eq!(ini.sections[0].name, "nav:C");
    }
}
