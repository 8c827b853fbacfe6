//! Built-in theme palettes.
//!
//! Every theme maps to one fixed three-bucket palette. Lookups by tag never
//! fail: an unknown tag resolves to the warrior palette.

use image::Rgb;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error raised when a palette would be constructed with an empty bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette bucket '{0}' has no colors")]
    EmptyBucket(Bucket),
}

/// One of the three color groups in a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Primary,
    Secondary,
    Accent,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Bucket::Primary => "primary",
            Bucket::Secondary => "secondary",
            Bucket::Accent => "accent",
        };
        f.write_str(name)
    }
}

/// A themed set of colors split into primary, secondary and accent buckets.
///
/// Buckets are guaranteed non-empty, so a random draw from any of them is
/// always defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    primary: Vec<Rgb<u8>>,
    secondary: Vec<Rgb<u8>>,
    accent: Vec<Rgb<u8>>,
}

impl Palette {
    /// Build a palette, rejecting empty buckets.
    pub fn new(
        primary: Vec<Rgb<u8>>,
        secondary: Vec<Rgb<u8>>,
        accent: Vec<Rgb<u8>>,
    ) -> Result<Self, PaletteError> {
        if primary.is_empty() {
            return Err(PaletteError::EmptyBucket(Bucket::Primary));
        }
        if secondary.is_empty() {
            return Err(PaletteError::EmptyBucket(Bucket::Secondary));
        }
        if accent.is_empty() {
            return Err(PaletteError::EmptyBucket(Bucket::Accent));
        }
        Ok(Self { primary, secondary, accent })
    }

    /// All colors in a bucket, in table order.
    pub fn bucket(&self, bucket: Bucket) -> &[Rgb<u8>] {
        match bucket {
            Bucket::Primary => &self.primary,
            Bucket::Secondary => &self.secondary,
            Bucket::Accent => &self.accent,
        }
    }

    pub fn primary(&self) -> &[Rgb<u8>] {
        &self.primary
    }

    pub fn secondary(&self) -> &[Rgb<u8>] {
        &self.secondary
    }

    pub fn accent(&self) -> &[Rgb<u8>] {
        &self.accent
    }

    /// Darker primary tones used for handles and shafts (entries from index 2 on).
    ///
    /// Falls back to the whole bucket when it has two or fewer entries.
    pub fn primary_tail(&self) -> &[Rgb<u8>] {
        if self.primary.len() > 2 {
            &self.primary[2..]
        } else {
            &self.primary
        }
    }

    /// The first two primary tones, used for foliage.
    pub fn primary_head(&self) -> &[Rgb<u8>] {
        &self.primary[..self.primary.len().min(2)]
    }
}

/// Character class bound to one palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Warrior,
    Wizard,
    Elf,
    Dwarf,
    Rogue,
}

/// All themes in table order.
pub const THEMES: [Theme; 5] = [Theme::Warrior, Theme::Wizard, Theme::Elf, Theme::Dwarf, Theme::Rogue];

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Warrior => "warrior",
            Theme::Wizard => "wizard",
            Theme::Elf => "elf",
            Theme::Dwarf => "dwarf",
            Theme::Rogue => "rogue",
        }
    }

    /// Exact (case-insensitive) theme name lookup.
    pub fn from_name(name: &str) -> Option<Theme> {
        match name.to_lowercase().as_str() {
            "warrior" => Some(Theme::Warrior),
            "wizard" => Some(Theme::Wizard),
            "elf" => Some(Theme::Elf),
            "dwarf" => Some(Theme::Dwarf),
            "rogue" => Some(Theme::Rogue),
            _ => None,
        }
    }

    /// Classify a free-text character description.
    ///
    /// Checks are case-insensitive substring tests, applied in order:
    /// wizard/mage, elf, dwarf, rogue/thief, otherwise warrior.
    pub fn for_character(style: &str) -> Theme {
        let style = style.to_lowercase();
        if style.contains("wizard") || style.contains("mage") {
            Theme::Wizard
        } else if style.contains("elf") {
            Theme::Elf
        } else if style.contains("dwarf") {
            Theme::Dwarf
        } else if style.contains("rogue") || style.contains("thief") {
            Theme::Rogue
        } else {
            Theme::Warrior
        }
    }

    /// The immutable palette bound to this theme.
    pub fn palette(&self) -> Palette {
        let table = match self {
            Theme::Warrior => &WARRIOR,
            Theme::Wizard => &WIZARD,
            Theme::Elf => &ELF,
            Theme::Dwarf => &DWARF,
            Theme::Rogue => &ROGUE,
        };
        table.to_palette()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up a palette by theme tag. Unknown tags get the warrior palette.
pub fn get_palette(theme_tag: &str) -> Palette {
    Theme::from_name(theme_tag).unwrap_or(Theme::Warrior).palette()
}

/// Returns a list of all theme names.
pub fn list_themes() -> Vec<&'static str> {
    THEMES.iter().map(Theme::name).collect()
}

struct PaletteTable {
    primary: [Rgb<u8>; 4],
    secondary: [Rgb<u8>; 3],
    accent: [Rgb<u8>; 3],
}

impl PaletteTable {
    fn to_palette(&self) -> Palette {
        // Fixed-size arrays make every bucket non-empty.
        Palette {
            primary: self.primary.to_vec(),
            secondary: self.secondary.to_vec(),
            accent: self.accent.to_vec(),
        }
    }
}

const WARRIOR: PaletteTable = PaletteTable {
    primary: [Rgb([139, 69, 19]), Rgb([255, 215, 0]), Rgb([128, 128, 128]), Rgb([0, 0, 0])],
    secondary: [Rgb([178, 34, 34]), Rgb([184, 134, 11]), Rgb([105, 105, 105])],
    accent: [Rgb([255, 0, 0]), Rgb([0, 100, 0]), Rgb([0, 0, 139])],
};

const WIZARD: PaletteTable = PaletteTable {
    primary: [Rgb([75, 0, 130]), Rgb([255, 255, 255]), Rgb([138, 43, 226]), Rgb([25, 25, 112])],
    secondary: [Rgb([148, 0, 211]), Rgb([255, 20, 147]), Rgb([0, 191, 255])],
    accent: [Rgb([255, 215, 0]), Rgb([50, 205, 50]), Rgb([220, 20, 60])],
};

const ELF: PaletteTable = PaletteTable {
    primary: [Rgb([34, 139, 34]), Rgb([255, 255, 255]), Rgb([139, 69, 19]), Rgb([0, 100, 0])],
    secondary: [Rgb([50, 205, 50]), Rgb([107, 142, 35]), Rgb([184, 134, 11])],
    accent: [Rgb([255, 215, 0]), Rgb([0, 191, 255]), Rgb([255, 20, 147])],
};

const DWARF: PaletteTable = PaletteTable {
    primary: [Rgb([139, 69, 19]), Rgb([255, 215, 0]), Rgb([105, 105, 105]), Rgb([47, 79, 79])],
    secondary: [Rgb([160, 82, 45]), Rgb([184, 134, 11]), Rgb([112, 128, 144])],
    accent: [Rgb([255, 0, 0]), Rgb([0, 100, 0]), Rgb([70, 130, 180])],
};

const ROGUE: PaletteTable = PaletteTable {
    primary: [Rgb([0, 0, 0]), Rgb([128, 128, 128]), Rgb([169, 169, 169]), Rgb([105, 105, 105])],
    secondary: [Rgb([47, 79, 79]), Rgb([112, 128, 144]), Rgb([119, 136, 153])],
    accent: [Rgb([255, 215, 0]), Rgb([255, 0, 0]), Rgb([0, 191, 255])],
};

/// Format a color as `#RRGGBB`.
pub fn to_hex(color: Rgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", color[0], color[1], color[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_themes() {
        let names = list_themes();
        assert_eq!(names, vec!["warrior", "wizard", "elf", "dwarf", "rogue"]);
    }

    #[test]
    fn test_every_palette_has_nonempty_buckets() {
        for theme in THEMES {
            let palette = theme.palette();
            assert!(!palette.primary().is_empty(), "{} primary empty", theme);
            assert!(!palette.secondary().is_empty(), "{} secondary empty", theme);
            assert!(!palette.accent().is_empty(), "{} accent empty", theme);
            assert!(!palette.primary_tail().is_empty());
            assert!(!palette.primary_head().is_empty());
        }
    }

    #[test]
    fn test_get_palette_exact_match() {
        assert_eq!(get_palette("wizard"), Theme::Wizard.palette());
        assert_eq!(get_palette("DWARF"), Theme::Dwarf.palette());
    }

    #[test]
    fn test_get_palette_unknown_falls_back_to_warrior() {
        assert_eq!(get_palette("paladin"), Theme::Warrior.palette());
        assert_eq!(get_palette(""), Theme::Warrior.palette());
    }

    #[test]
    fn test_character_theme_routing() {
        assert_eq!(Theme::for_character("Ancient Wizard"), Theme::Wizard);
        assert_eq!(Theme::for_character("battle MAGE"), Theme::Wizard);
        assert_eq!(Theme::for_character("wood elf archer"), Theme::Elf);
        assert_eq!(Theme::for_character("Dwarf smith"), Theme::Dwarf);
        assert_eq!(Theme::for_character("rogue"), Theme::Rogue);
        assert_eq!(Theme::for_character("master thief"), Theme::Rogue);
        assert_eq!(Theme::for_character("fantasy warrior"), Theme::Warrior);
        assert_eq!(Theme::for_character("knight"), Theme::Warrior);
    }

    #[test]
    fn test_character_theme_precedence() {
        // wizard/mage is tested before elf
        assert_eq!(Theme::for_character("elf mage"), Theme::Wizard);
        assert_eq!(Theme::for_character("dwarf thief"), Theme::Dwarf);
    }

    #[test]
    fn test_palette_new_rejects_empty_bucket() {
        let c = vec![Rgb([1, 2, 3])];
        assert_eq!(
            Palette::new(vec![], c.clone(), c.clone()),
            Err(PaletteError::EmptyBucket(Bucket::Primary))
        );
        assert_eq!(
            Palette::new(c.clone(), vec![], c.clone()),
            Err(PaletteError::EmptyBucket(Bucket::Secondary))
        );
        assert_eq!(
            Palette::new(c.clone(), c.clone(), vec![]),
            Err(PaletteError::EmptyBucket(Bucket::Accent))
        );
    }

    #[test]
    fn test_primary_tail_short_bucket() {
        let c = vec![Rgb([9, 9, 9])];
        let palette = Palette::new(c.clone(), c.clone(), c).unwrap();
        assert_eq!(palette.primary_tail(), &[Rgb([9, 9, 9])]);
        assert_eq!(palette.primary_head(), &[Rgb([9, 9, 9])]);
    }

    #[test]
    fn test_primary_tail_skips_first_two() {
        let palette = Theme::Warrior.palette();
        assert_eq!(palette.primary_tail(), &[Rgb([128, 128, 128]), Rgb([0, 0, 0])]);
        assert_eq!(palette.primary_head(), &[Rgb([139, 69, 19]), Rgb([255, 215, 0])]);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(Rgb([255, 215, 0])), "#FFD700");
        assert_eq!(to_hex(Rgb([0, 0, 0])), "#000000");
    }
}
