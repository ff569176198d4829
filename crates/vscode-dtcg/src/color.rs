//! Color value parsing for theme variables.
//!
//! VSCode themes expose their colors as loosely formatted CSS text. This
//! module recognizes the handful of forms those values actually take and
//! normalizes them into a single representation:
//!
//! - Hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (case-insensitive)
//! - Functional: `rgb(r, g, b)` and `rgba(r, g, b, a)` with plain numbers
//! - The `transparent` keyword, lowercase only
//!
//! Everything else (named colors, `var(...)`, `currentColor`, `calc()`,
//! percentages, malformed syntax) is [`ColorForm::Unrecognized`] and is
//! skipped by callers rather than reported as an error.
//!
//! # Example
//!
//! ```rust
//! use vscode_dtcg::color::parse_color;
//!
//! let color = parse_color("#1e1e1e").unwrap();
//! assert_eq!(color.hex(), "#1E1E1E");
//! assert_eq!(color.alpha(), 1.0);
//!
//! let faded = parse_color("rgba(255, 255, 255, 0.5)").unwrap();
//! assert_eq!(faded.hex(), "#FFFFFF");
//! assert_eq!(faded.alpha(), 0.5);
//!
//! assert!(parse_color("var(--vscode-foreground)").is_none());
//! ```

/// Classification of a raw color value, before normalization.
///
/// Checks run in a fixed order: `transparent`, hex, functional. The first
/// matching form wins; anything left over is `Unrecognized`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorForm<'a> {
    /// The `transparent` keyword.
    Transparent,
    /// Hex digits following `#`: 3, 4, 6 or 8 of them.
    Hex(&'a str),
    /// `rgb()` / `rgba()` channels in 0–255 units and an optional alpha.
    Functional { channels: [f64; 3], alpha: Option<f64> },
    /// Not a color this parser understands.
    Unrecognized,
}

impl<'a> ColorForm<'a> {
    /// Classifies a raw value. Surrounding whitespace is ignored.
    pub fn classify(text: &'a str) -> Self {
        let text = text.trim();

        if text == "transparent" {
            return ColorForm::Transparent;
        }

        if let Some(digits) = text.strip_prefix('#') {
            if matches!(digits.len(), 3 | 4 | 6 | 8)
                && digits.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return ColorForm::Hex(digits);
            }
            return ColorForm::Unrecognized;
        }

        Self::classify_functional(text).unwrap_or(ColorForm::Unrecognized)
    }

    fn classify_functional(text: &str) -> Option<Self> {
        let lower = text.to_ascii_lowercase();
        let open = if lower.starts_with("rgba(") {
            5
        } else if lower.starts_with("rgb(") {
            4
        } else {
            return None;
        };
        let inner = text.get(open..)?.strip_suffix(')')?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }

        let mut channels = [0.0f64; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = parse_number(part)?;
        }
        let alpha = match parts.get(3) {
            Some(part) => Some(parse_number(part)?),
            None => None,
        };

        Some(ColorForm::Functional { channels, alpha })
    }

    /// Converts the classified form into a [`NormalizedColor`].
    ///
    /// Returns `None` only for [`ColorForm::Unrecognized`].
    pub fn normalize(self) -> Option<NormalizedColor> {
        match self {
            ColorForm::Transparent => Some(NormalizedColor::TRANSPARENT),
            ColorForm::Hex(digits) => Some(decode_hex(digits)),
            ColorForm::Functional { channels, alpha } => {
                let [r, g, b] = channels.map(channel_byte);
                Some(NormalizedColor::new(r, g, b, alpha.unwrap_or(1.0)))
            }
            ColorForm::Unrecognized => None,
        }
    }
}

/// A color reduced to sRGB channels plus a separate alpha.
///
/// Channels are stored as 8-bit values so the float components and the hex
/// string can never disagree: both are derived from the same bytes. Alpha is
/// kept apart and never folded into the hex output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedColor {
    red: u8,
    green: u8,
    blue: u8,
    alpha: f64,
}

impl NormalizedColor {
    /// Fully transparent black, the value of `transparent`.
    pub const TRANSPARENT: NormalizedColor = NormalizedColor {
        red: 0,
        green: 0,
        blue: 0,
        alpha: 0.0,
    };

    /// Creates a color from 8-bit channels. Alpha is clamped to `[0, 1]`.
    pub fn new(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: clamp_unit(alpha),
        }
    }

    pub fn r(&self) -> f64 {
        f64::from(self.red) / 255.0
    }

    pub fn g(&self) -> f64 {
        f64::from(self.green) / 255.0
    }

    pub fn b(&self) -> f64 {
        f64::from(self.blue) / 255.0
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The `[r, g, b]` components, each in `[0, 1]`.
    pub fn components(&self) -> [f64; 3] {
        [self.r(), self.g(), self.b()]
    }

    /// The 8-bit `(r, g, b)` channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Uppercase `#RRGGBB`. Alpha is never encoded here.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Parses a raw color value.
///
/// Returns `None` for anything that is not a recognized color; callers are
/// expected to skip such values.
pub fn parse_color(text: &str) -> Option<NormalizedColor> {
    ColorForm::classify(text).normalize()
}

/// Decodes 3, 4, 6 or 8 hex digits. Short forms double each digit.
fn decode_hex(digits: &str) -> NormalizedColor {
    let expanded: String = if digits.len() <= 4 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };

    let byte = |i: usize| -> u8 {
        expanded
            .get(i * 2..i * 2 + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .unwrap_or(0)
    };

    let alpha = if expanded.len() == 8 {
        f64::from(byte(3)) / 255.0
    } else {
        1.0
    };

    NormalizedColor::new(byte(0), byte(1), byte(2), alpha)
}

/// Rounds a 0–255 channel and clamps it into a byte.
fn channel_byte(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Parses a plain decimal number: optional sign, digits, at most one point.
///
/// Units, percentages, exponents and keywords like `inf` are rejected.
fn parse_number(s: &str) -> Option<f64> {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let mut digits = 0;
    let mut points = 0;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return None,
        }
    }
    if digits == 0 || points > 1 {
        return None;
    }
    s.parse().ok()
}
