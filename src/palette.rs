//! # Module: Category Palette
//!
//! ## Responsibility
//! Map category labels (elemental types) to display colours and derive the
//! per-cell style descriptor used by the styled table.
//!
//! ## Guarantees
//! - Lookup is total: every input, including `None`, resolves to a colour
//! - Unknown categories resolve to the fallback colour, never an error
//! - `cell_style` depends only on the cell value, not on its position
//!
//! ## NOT Responsible For
//! - Drawing (the dashboard widgets interpret [`CellStyle`])
//! - Loading palette overrides from disk (see: `config`)

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback colour for missing or unrecognised categories.
pub const FALLBACK_HEX: &str = "#68A090";

/// Foreground colour used by every styled cell.
pub const CELL_FOREGROUND: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

/// Nominal corner rounding of a styled cell, in pixels.
pub const CELL_CORNER_RADIUS_PX: u8 = 5;

/// Default elemental-type colours.
const DEFAULT_TYPE_COLORS: [(&str, &str); 18] = [
    ("Normal", "#A8A878"),
    ("Fire", "#F08030"),
    ("Water", "#6890F0"),
    ("Electric", "#F8D030"),
    ("Grass", "#78C850"),
    ("Ice", "#98D8D8"),
    ("Fighting", "#C03028"),
    ("Poison", "#A040A0"),
    ("Ground", "#E0C068"),
    ("Flying", "#A890F0"),
    ("Psychic", "#F85888"),
    ("Bug", "#A8B820"),
    ("Rock", "#B8A038"),
    ("Ghost", "#705898"),
    ("Dragon", "#7038F8"),
    ("Dark", "#705848"),
    ("Steel", "#B8B8D0"),
    ("Fairy", "#EE99AC"),
];

/// Error returned when a colour string is not `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour '{0}': expected #rrggbb")]
pub struct ParseRgbError(pub String);

/// A 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Formats the colour as `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseRgbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseRgbError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ParseRgbError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(feature = "tui")]
impl From<Rgb> for ratatui::style::Color {
    fn from(value: Rgb) -> Self {
        ratatui::style::Color::Rgb(value.r, value.g, value.b)
    }
}

/// Fixed mapping from category label to colour, with a fallback entry.
///
/// Immutable after construction.
///
/// # Example
///
/// ```rust
/// use dexstream::palette::CategoryColorTable;
///
/// let table = CategoryColorTable::default();
/// assert_eq!(table.color_of(Some("Fire")).to_hex(), "#F08030");
/// assert_eq!(table.color_of(Some("Cosmic")), table.fallback());
/// assert_eq!(table.color_of(None), table.fallback());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryColorTable {
    colors: HashMap<String, Rgb>,
    fallback: Rgb,
}

impl CategoryColorTable {
    /// Builds a table from explicit entries and a fallback colour.
    pub fn from_entries<I, K>(entries: I, fallback: Rgb) -> Self
    where
        I: IntoIterator<Item = (K, Rgb)>,
        K: Into<String>,
    {
        Self {
            colors: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            fallback,
        }
    }

    /// Returns the colour for `category`.
    ///
    /// Missing and unknown categories both yield the fallback colour.
    pub fn color_of(&self, category: Option<&str>) -> Rgb {
        category
            .and_then(|c| self.colors.get(c))
            .copied()
            .unwrap_or(self.fallback)
    }

    /// The designated fallback colour.
    pub fn fallback(&self) -> Rgb {
        self.fallback
    }

    /// Whether `category` has an explicit entry.
    pub fn contains(&self, category: &str) -> bool {
        self.colors.contains_key(category)
    }

    /// Number of explicit entries (the fallback is not counted).
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true when the table has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns a copy with `overrides` layered over the existing entries.
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Rgb)>,
    {
        for (name, color) in overrides {
            self.colors.insert(name.clone(), *color);
        }
        self
    }

    /// Returns a copy using `fallback` for unknown categories.
    pub fn with_fallback(mut self, fallback: Rgb) -> Self {
        self.fallback = fallback;
        self
    }
}

impl Default for CategoryColorTable {
    fn default() -> Self {
        // The constants are well-formed; a bad literal would fall back to grey.
        let parse = |hex: &str| hex.parse().unwrap_or(Rgb::new(0x80, 0x80, 0x80));
        Self::from_entries(
            DEFAULT_TYPE_COLORS.iter().map(|&(k, v)| (k, parse(v))),
            parse(FALLBACK_HEX),
        )
    }
}

/// Text weight of a styled cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    /// Regular weight.
    Normal,
    /// Bold weight.
    Bold,
}

/// Horizontal alignment of a styled cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAlign {
    /// Left-aligned.
    Left,
    /// Centred.
    Center,
    /// Right-aligned.
    Right,
}

/// Structured display style for one table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    /// Background colour, from the category table.
    pub background: Rgb,
    /// Foreground (text) colour.
    pub foreground: Rgb,
    /// Text weight.
    pub weight: FontWeight,
    /// Corner rounding in pixels; terminal surfaces ignore it.
    pub corner_radius_px: u8,
    /// Horizontal alignment.
    pub align: CellAlign,
}

/// Computes the style for a cell holding `value`.
///
/// Pure function of the value: the same value always gets the same style
/// regardless of where the cell sits in the table.
pub fn cell_style(table: &CategoryColorTable, value: Option<&str>) -> CellStyle {
    CellStyle {
        background: table.color_of(value),
        foreground: CELL_FOREGROUND,
        weight: FontWeight::Bold,
        corner_radius_px: CELL_CORNER_RADIUS_PX,
        align: CellAlign::Center,
    }
}

#[cfg(feature = "tui")]
impl CellStyle {
    /// Converts the descriptor into a terminal style.
    pub fn to_style(&self) -> ratatui::style::Style {
        use ratatui::style::{Modifier, Style};

        let style = Style::default()
            .bg(self.background.into())
            .fg(self.foreground.into());
        match self.weight {
            FontWeight::Bold => style.add_modifier(Modifier::BOLD),
            FontWeight::Normal => style,
        }
    }

    /// Converts the alignment into a terminal alignment.
    pub fn alignment(&self) -> ratatui::layout::Alignment {
        use ratatui::layout::Alignment;

        match self.align {
            CellAlign::Left => Alignment::Left,
            CellAlign::Center => Alignment::Center,
            CellAlign::Right => Alignment::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_category_returns_configured_color() {
        let table = CategoryColorTable::default();
        assert_eq!(table.color_of(Some("Water")), Rgb::new(0x68, 0x90, 0xF0));
        assert_eq!(table.color_of(Some("Grass")), Rgb::new(0x78, 0xC8, 0x50));
    }

    #[test]
    fn test_missing_category_returns_fallback() {
        let table = CategoryColorTable::default();
        assert_eq!(table.color_of(None), table.fallback());
    }

    #[test]
    fn test_unknown_categories_return_fallback() {
        let table = CategoryColorTable::default();
        for name in ["", "fire", "FIRE", "Cosmic", " Fire", "Fire ", "???"] {
            assert_eq!(table.color_of(Some(name)), table.fallback(), "{name:?}");
        }
    }

    #[test]
    fn test_lookup_independent_of_other_entries() {
        let fire = Rgb::new(1, 2, 3);
        let small = CategoryColorTable::from_entries([("Fire", fire)], Rgb::new(0, 0, 0));
        let large = CategoryColorTable::default().with_overrides(&HashMap::from([(
            "Fire".to_string(),
            fire,
        )]));
        assert_eq!(small.color_of(Some("Fire")), fire);
        assert_eq!(large.color_of(Some("Fire")), fire);
    }

    #[test]
    fn test_default_table_has_eighteen_types() {
        let table = CategoryColorTable::default();
        assert_eq!(table.len(), 18);
        assert!(table.contains("Fairy"));
        assert_eq!(table.fallback().to_hex(), FALLBACK_HEX);
    }

    #[test]
    fn test_with_fallback_replaces_fallback_only() {
        let grey = Rgb::new(10, 10, 10);
        let table = CategoryColorTable::default().with_fallback(grey);
        assert_eq!(table.color_of(Some("Unknown")), grey);
        assert_eq!(table.color_of(Some("Fire")).to_hex(), "#F08030");
    }

    #[test]
    fn test_rgb_parse_accepts_lowercase_and_uppercase() {
        assert_eq!("#f08030".parse::<Rgb>(), Ok(Rgb::new(0xF0, 0x80, 0x30)));
        assert_eq!("#F08030".parse::<Rgb>(), Ok(Rgb::new(0xF0, 0x80, 0x30)));
    }

    #[test]
    fn test_rgb_parse_rejects_malformed() {
        for bad in ["F08030", "#F0803", "#F080300", "#GG8030", "", "#", "#ééé"] {
            assert!(bad.parse::<Rgb>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_rgb_display_is_uppercase_hex() {
        assert_eq!(Rgb::new(0, 0xAB, 0xFF).to_string(), "#00ABFF");
    }

    #[test]
    fn test_cell_style_depends_only_on_value() {
        let table = CategoryColorTable::default();
        let a = cell_style(&table, Some("Fire"));
        let b = cell_style(&table, Some("Fire"));
        assert_eq!(a, b);
        assert_eq!(a.background, table.color_of(Some("Fire")));
        assert_eq!(a.foreground, CELL_FOREGROUND);
        assert_eq!(a.weight, FontWeight::Bold);
        assert_eq!(a.align, CellAlign::Center);
        assert_eq!(a.corner_radius_px, CELL_CORNER_RADIUS_PX);
    }

    #[test]
    fn test_cell_style_for_missing_value_uses_fallback_background() {
        let table = CategoryColorTable::default();
        assert_eq!(cell_style(&table, None).background, table.fallback());
    }

    #[cfg(feature = "tui")]
    #[test]
    fn test_cell_style_converts_to_bold_terminal_style() {
        use ratatui::style::{Color, Modifier};

        let table = CategoryColorTable::default();
        let style = cell_style(&table, Some("Fire")).to_style();
        assert_eq!(style.bg, Some(Color::Rgb(0xF0, 0x80, 0x30)));
        assert_eq!(style.fg, Some(Color::Rgb(0xFF, 0xFF, 0xFF)));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }
}
