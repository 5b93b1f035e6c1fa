//! # Scalar Types: The Raw Encoding Whitelist
//!
//! Defines the `ScalarType` enum with every type that may appear in a raw
//! encoded field. Only these types have a fixed, architecture-independent
//! binary width, so only these can be copied onto the wire byte for byte.
//! Every `match` on `ScalarType` is exhaustive; adding a type forces every
//! consumer to handle it.
//!
//! | Type | Wire size |
//! |------|-----------|
//! | `char` | 1 |
//! | `int8_t` / `uint8_t` | 1 |
//! | `int16_t` / `uint16_t` | 2 |
//! | `int32_t` / `uint32_t` | 4 |
//! | `float` | 4 |
//! | `double` | 8 |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TypeError;

/// A whitelisted scalar type usable for raw wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    /// `char`
    #[serde(rename = "char")]
    Char,
    /// `int8_t`
    #[serde(rename = "int8_t")]
    Int8,
    /// `uint8_t`
    #[serde(rename = "uint8_t")]
    UInt8,
    /// `int16_t`
    #[serde(rename = "int16_t")]
    Int16,
    /// `uint16_t`
    #[serde(rename = "uint16_t")]
    UInt16,
    /// `int32_t`
    #[serde(rename = "int32_t")]
    Int32,
    /// `uint32_t`
    #[serde(rename = "uint32_t")]
    UInt32,
    /// `float` (IEEE 754 single precision)
    #[serde(rename = "float")]
    Float,
    /// `double` (IEEE 754 double precision)
    #[serde(rename = "double")]
    Double,
}

/// Number of whitelisted scalar types.
pub const SCALAR_TYPE_COUNT: usize = 9;

impl ScalarType {
    /// Returns every whitelisted scalar type.
    pub fn all() -> &'static [ScalarType] {
        &[
            Self::Char,
            Self::Int8,
            Self::UInt8,
            Self::Int16,
            Self::UInt16,
            Self::Int32,
            Self::UInt32,
            Self::Float,
            Self::Double,
        ]
    }

    /// The C spelling of the type, as written in schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Char => "char",
            Self::Int8 => "int8_t",
            Self::UInt8 => "uint8_t",
            Self::Int16 => "int16_t",
            Self::UInt16 => "uint16_t",
            Self::Int32 => "int32_t",
            Self::UInt32 => "uint32_t",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// Size of one value on the wire, in bytes.
    pub fn wire_size(&self) -> usize {
        match self {
            Self::Char | Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float => 4,
            Self::Double => 8,
        }
    }
}

impl std::fmt::Display for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScalarType {
    type Err = TypeError;

    /// Parse the exact C spelling. No whitespace trimming, no aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "char" => Ok(Self::Char),
            "int8_t" => Ok(Self::Int8),
            "uint8_t" => Ok(Self::UInt8),
            "int16_t" => Ok(Self::Int16),
            "uint16_t" => Ok(Self::UInt16),
            "int32_t" => Ok(Self::Int32),
            "uint32_t" => Ok(Self::UInt32),
            "float" => Ok(Self::Float),
            "double" => Ok(Self::Double),
            other => Err(TypeError::UnknownScalar(other.to_string())),
        }
    }
}
