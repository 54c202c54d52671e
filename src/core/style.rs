// LogHerald - core/style.rs
//
// Style directives: CSS-like `font-weight:bold;color:<name>` strings that a
// console substitutes at `%c` placeholders, plus their parsed form.
// Core layer: no I/O.

/// Expands to the `&'static str` directive `font-weight:bold;color:<name>`.
macro_rules! bold_color {
    ($color:literal) => {
        concat!("font-weight:bold;color:", $color)
    };
}
pub(crate) use bold_color;

/// Header and day separators.
pub const HEADER: &str = bold_color!("gold");
/// Record timestamps.
pub const TIMESTAMP: &str = bold_color!("teal");
/// `module:line` and panic locations.
pub const LOCATION: &str = bold_color!("seagreen");
/// Thread labels.
pub const THREAD: &str = bold_color!("palevioletred");
/// Panic banners.
pub const ERROR: &str = bold_color!("firebrick");
/// Clears any active style.
pub const RESET: &str = "";

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// CSS named colours used by the built-in directives.
static NAMED_COLORS: &[(&str, Rgb)] = &[
    ("gold", Rgb(255, 215, 0)),
    ("teal", Rgb(0, 128, 128)),
    ("seagreen", Rgb(46, 139, 87)),
    ("palevioletred", Rgb(219, 112, 147)),
    ("firebrick", Rgb(178, 34, 34)),
    ("red", Rgb(255, 0, 0)),
    ("darkorange", Rgb(255, 140, 0)),
    ("blue", Rgb(0, 0, 255)),
    ("green", Rgb(0, 128, 0)),
    ("deeppink", Rgb(255, 20, 147)),
    ("yellow", Rgb(255, 255, 0)),
    ("magenta", Rgb(255, 0, 255)),
    ("white", Rgb(255, 255, 255)),
    ("black", Rgb(0, 0, 0)),
];

/// Looks up a CSS colour name (case-insensitive) or a `#rrggbb` literal.
pub fn named_color(name: &str) -> Option<Rgb> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Rgb(channel(0)?, channel(2)?, channel(4)?));
    }
    NAMED_COLORS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, rgb)| rgb)
}

/// Parsed form of a directive. Unrecognised properties are ignored, the
/// same way a browser console ignores CSS it does not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub bold: bool,
    pub color: Option<Rgb>,
}

impl Style {
    pub fn parse(directive: &str) -> Self {
        let mut style = Style::default();
        for declaration in directive.split(';') {
            let Some((property, value)) = declaration.split_once(':') else {
                continue;
            };
            match property.trim() {
                "font-weight" => {
                    let value = value.trim();
                    style.bold = value == "bold"
                        || value.parse::<u16>().map(|w| w >= 600).unwrap_or(false);
                }
                "color" => style.color = named_color(value),
                _ => {}
            }
        }
        style
    }

    pub fn is_plain(&self) -> bool {
        !self.bold && self.color.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_directives() {
        assert_eq!(HEADER, "font-weight:bold;color:gold");
        assert_eq!(ERROR, "font-weight:bold;color:firebrick");
        for directive in [HEADER, TIMESTAMP, LOCATION, THREAD, ERROR] {
            let style = Style::parse(directive);
            assert!(style.bold, "{directive} should be bold");
            assert!(style.color.is_some(), "{directive} colour should resolve");
        }
    }

    #[test]
    fn test_reset_is_plain() {
        assert!(Style::parse(RESET).is_plain());
    }

    #[test]
    fn test_parse_tolerates_noise() {
        let style = Style::parse(" color: Teal ; background:red;nonsense");
        assert_eq!(style.color, Some(Rgb(0, 128, 128)));
        assert!(!style.bold);

        assert!(Style::parse("font-weight:700").bold);
        assert!(!Style::parse("font-weight:normal").bold);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(named_color("#1a2B3c"), Some(Rgb(0x1a, 0x2b, 0x3c)));
        assert_eq!(named_color("#123"), None);
        assert_eq!(named_color("chartreuse-ish"), None);
    }
}
