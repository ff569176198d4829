//! DTCG color tokens.
//!
//! A [`ColorToken`] serializes to exactly:
//!
//! ```json
//! {"$type":"color","$value":{"colorSpace":"srgb","components":[r,g,b],"alpha":a,"hex":"#RRGGBB"}}
//! ```
//!
//! Numbers with no fractional part are written as integers (`1`, not `1.0`).

use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};

use crate::color::NormalizedColor;

/// The `$type` discriminator. Only colors are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Color,
}

/// Color space of a token's components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    Srgb,
}

/// The `$value` payload of a color token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorValue {
    pub color_space: ColorSpace,
    #[serde(serialize_with = "serialize_components")]
    pub components: [f64; 3],
    #[serde(serialize_with = "serialize_number")]
    pub alpha: f64,
    pub hex: String,
}

/// A leaf node of a token tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorToken {
    #[serde(rename = "$type")]
    pub kind: TokenType,
    #[serde(rename = "$value")]
    pub value: ColorValue,
}

impl ColorToken {
    /// Wraps a normalized color.
    pub fn from_color(color: &NormalizedColor) -> Self {
        Self {
            kind: TokenType::Color,
            value: ColorValue {
                color_space: ColorSpace::Srgb,
                components: color.components(),
                alpha: color.alpha(),
                hex: color.hex(),
            },
        }
    }

    /// Transparent black, used to fill keys a source does not define.
    pub fn placeholder() -> Self {
        Self::from_color(&NormalizedColor::TRANSPARENT)
    }

    pub fn hex(&self) -> &str {
        &self.value.hex
    }

    pub fn alpha(&self) -> f64 {
        self.value.alpha
    }

    pub fn components(&self) -> [f64; 3] {
        self.value.components
    }
}

impl From<NormalizedColor> for ColorToken {
    fn from(color: NormalizedColor) -> Self {
        Self::from_color(&color)
    }
}

/// Builds the DTCG token for a parsed color.
pub fn build_token(color: &NormalizedColor) -> ColorToken {
    ColorToken::from_color(color)
}

// Integers below 2^53 are exactly representable, so the cast is lossless.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

fn serialize_components<S: Serializer>(
    components: &[f64; 3],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    struct Number(f64);

    impl Serialize for Number {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serialize_number(&self.0, serializer)
        }
    }

    let mut tuple = serializer.serialize_tuple(components.len())?;
    for component in components {
        tuple.serialize_element(&Number(*component))?;
    }
    tuple.end()
}
