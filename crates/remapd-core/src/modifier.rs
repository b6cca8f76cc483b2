// Remapd Modifier Table
// The five built-in modifier layers and the descriptor modifier bits

use crate::key::Key;

pub const MOD_ALT: u8 = 0x01;
pub const MOD_ALTGR: u8 = 0x02;
pub const MOD_SHIFT: u8 = 0x04;
pub const MOD_META: u8 = 0x08;
pub const MOD_CTRL: u8 = 0x10;

/// Number of built-in modifiers.
pub const MAX_MOD: usize = 5;

/// A built-in modifier: the layer it activates by default and the two
/// physical keycodes bound to it. Single-key modifiers carry the same code
/// twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierEntry {
    pub name: &'static str,
    pub code1: u8,
    pub code2: u8,
    pub mask: u8,
}

/// The static modifier table. Each entry corresponds to one of the built-in
/// layers installed at config init.
pub const MODIFIER_TABLE: [ModifierEntry; MAX_MOD] = [
    ModifierEntry {
        name: "control",
        code1: 29,
        code2: 97,
        mask: MOD_CTRL,
    },
    ModifierEntry {
        name: "meta",
        code1: 125,
        code2: 126,
        mask: MOD_META,
    },
    ModifierEntry {
        name: "shift",
        code1: 42,
        code2: 54,
        mask: MOD_SHIFT,
    },
    ModifierEntry {
        name: "altgr",
        code1: 100,
        code2: 100,
        mask: MOD_ALTGR,
    },
    ModifierEntry {
        name: "alt",
        code1: 56,
        code2: 56,
        mask: MOD_ALT,
    },
];

impl ModifierEntry {
    pub fn keys(&self) -> [Key; 2] {
        [Key::from(self.code1), Key::from(self.code2)]
    }
}

/// Map a single-letter modifier code, as used in key sequences ("C-a") and
/// layer section suffixes ("[mylayer:CS]"), to its modifier bit.
pub fn mask_for_letter(letter: char) -> Option<u8> {
    match letter {
        'C' => Some(MOD_CTRL),
        'M' => Some(MOD_META),
        'S' => Some(MOD_SHIFT),
        'G' => Some(MOD_ALTGR),
        'A' => Some(MOD_ALT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        assert_eq!(MODIFIER_TABLE.len(), MAX_MOD);
        let names: Vec<&str> = MODIFIER_TABLE.iter().map(|m| m.name).collect();
        assert_eq!(names, ["control", "meta", "shift", "altgr", "alt"]);
    }

    #[test]
    fn test_mask_letters() {
        assert_eq!(mask_for_letter('C'), Some(MOD_CTRL));
        assert_eq!(mask_for_letter('M'), Some(MOD_META));
        assert_eq!(mask_for_letter('S'), Some(MOD_SHIFT));
        assert_eq!(mask_for_letter('G'), Some(MOD_ALTGR));
        assert_eq!(mask_for_letter('A'), Some(MOD_ALT));
        assert_eq!(mask_for_letter('X'), None);
        assert_eq!(mask_for_letter('c'), None);
    }

    #[test]
    fn test_masks_are_distinct() {
        let mut seen = 0u8;
        for ent in &MODIFIER_TABLE {
            assert_eq!(seen & ent.mask, 0);
            seen |= ent.mask;
        }
    }
}
