// Remapd Key Type
// Keycodes from linux/input-event-codes.h with their config spellings

use std::fmt;

/// A single keycode. Codes are always within the 256-slot keymap range, so
/// keys can index a keymap directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Key(u8);

impl Key {
    /// The raw keycode.
    pub fn code(self) -> u8 {
        self.0
    }

    /// The keycode as a keymap slot index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u8> for Key {
    fn from(code: u8) -> Self {
        Key(code)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", keycode_name(*self))
    }
}

/// Keycode table entries: (code, primary spelling, alternate spelling).
///
/// Spellings follow the config file conventions: lowercase, matched exactly
/// and case-sensitively. Keycodes without a spelling cannot be named in a
/// config and are absent from the table.
const KEYCODE_TABLE: &[(u8, &str, Option<&str>)] = &[
    (1, "esc", Some("escape")),
    (2, "1", None),
    (3, "2", None),
    (4, "3", None),
    (5, "4", None),
    (6, "5", None),
    (7, "6", None),
    (8, "7", None),
    (9, "8", None),
    (10, "9", None),
    (11, "0", None),
    (12, "minus", Some("-")),
    (13, "equal", Some("=")),
    (14, "backspace", None),
    (15, "tab", None),
    (16, "q", None),
    (17, "w", None),
    (18, "e", None),
    (19, "r", None),
    (20, "t", None),
    (21, "y", None),
    (22, "u", None),
    (23, "i", None),
    (24, "o", None),
    (25, "p", None),
    (26, "leftbrace", Some("[")),
    (27, "rightbrace", Some("]")),
    (28, "enter", Some("return")),
    (29, "leftcontrol", Some("leftctrl")),
    (30, "a", None),
    (31, "s", None),
    (32, "d", None),
    (33, "f", None),
    (34, "g", None),
    (35, "h", None),
    (36, "j", None),
    (37, "k", None),
    (38, "l", None),
    (39, "semicolon", Some(";")),
    (40, "apostrophe", Some("'")),
    (41, "grave", Some("`")),
    (42, "leftshift", None),
    (43, "backslash", Some("\\")),
    (44, "z", None),
    (45, "x", None),
    (46, "c", None),
    (47, "v", None),
    (48, "b", None),
    (49, "n", None),
    (50, "m", None),
    (51, "comma", Some(",")),
    (52, "dot", None),
    (53, "slash", Some("/")),
    (54, "rightshift", None),
    (55, "kpasterisk", None),
    (56, "leftalt", None),
    (57, "space", None),
    (58, "capslock", None),
    (59, "f1", None),
    (60, "f2", None),
    (61, "f3", None),
    (62, "f4", None),
    (63, "f5", None),
    (64, "f6", None),
    (65, "f7", None),
    (66, "f8", None),
    (67, "f9", None),
    (68, "f10", None),
    (69, "numlock", None),
    (70, "scrolllock", None),
    (71, "kp7", None),
    (72, "kp8", None),
    (73, "kp9", None),
    (74, "kpminus", None),
    (75, "kp4", None),
    (76, "kp5", None),
    (77, "kp6", None),
    (78, "kpplus", None),
    (79, "kp1", None),
    (80, "kp2", None),
    (81, "kp3", None),
    (82, "kp0", None),
    (83, "kpdot", None),
    (86, "102nd", None),
    (87, "f11", None),
    (88, "f12", None),
    (96, "kpenter", None),
    (97, "rightcontrol", Some("rightctrl")),
    (98, "kpslash", None),
    (99, "sysrq", Some("printscreen")),
    (100, "rightalt", None),
    (102, "home", None),
    (103, "up", None),
    (104, "pageup", None),
    (105, "left", None),
    (106, "right", None),
    (107, "end", None),
    (108, "down", None),
    (109, "pagedown", None),
    (110, "insert", None),
    (111, "delete", None),
    (113, "mute", None),
    (114, "volumedown", None),
    (115, "volumeup", None),
    (116, "power", None),
    (119, "pause", None),
    (125, "leftmeta", Some("leftsuper")),
    (126, "rightmeta", Some("rightsuper")),
    (127, "compose", None),
    (139, "menu", None),
    (142, "sleep", None),
    (163, "nextsong", Some("next")),
    (164, "playpause", None),
    (165, "previoussong", Some("previous")),
    (166, "stopcd", None),
    (183, "f13", None),
    (184, "f14", None),
    (185, "f15", None),
    (186, "f16", None),
    (187, "f17", None),
    (188, "f18", None),
    (189, "f19", None),
    (190, "f20", None),
    (191, "f21", None),
    (192, "f22", None),
    (193, "f23", None),
    (194, "f24", None),
    (224, "brightnessdown", None),
    (225, "brightnessup", None),
];

/// Resolve a config spelling (primary or alternate) to a keycode.
pub fn lookup_keycode(name: &str) -> Option<Key> {
    KEYCODE_TABLE
        .iter()
        .find(|(_, primary, alt)| *primary == name || *alt == Some(name))
        .map(|(code, _, _)| Key(*code))
}

/// Primary spelling for a keycode, used in diagnostics.
pub fn keycode_name(key: Key) -> &'static str {
    KEYCODE_TABLE
        .iter()
        .find(|(code, _, _)| *code == key.code())
        .map(|(_, primary, _)| *primary)
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_primary_name() {
        assert_eq!(lookup_keycode("a"), Some(Key::from(30)));
        assert_eq!(lookup_keycode("enter"), Some(Key::from(28)));
        assert_eq!(lookup_keycode("kpenter"), Some(Key::from(96)));
    }

    #[test]
    fn test_lookup_alternate_name() {
        assert_eq!(lookup_keycode("escape"), Some(Key::from(1)));
        assert_eq!(lookup_keycode("return"), Some(Key::from(28)));
        assert_eq!(lookup_keycode("leftctrl"), Some(Key::from(29)));
        assert_eq!(lookup_keycode("["), Some(Key::from(26)));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup_keycode("A"), None);
        assert_eq!(lookup_keycode("Enter"), None);
    }

    #[test]
    fn test_lookup_unknown() {
        assert_eq!(lookup_keycode("notakey"), None);
        assert_eq!(lookup_keycode(""), None);
    }

    #[test]
    fn test_keycode_name() {
        assert_eq!(keycode_name(Key::from(30)), "a");
        assert_eq!(keycode_name(Key::from(1)), "esc");
        assert_eq!(keycode_name(Key::from(255)), "unknown");
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::from(30).to_string(), "a");
    }
}
