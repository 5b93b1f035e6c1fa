//! # Type Resolution
//!
//! Parses the declared type string of a field. A raw field is either a
//! single whitelisted scalar (`uint32_t`) or a fixed-length array of one
//! (`char[100]`). The length is the maximum number of elements; shorter
//! payloads are allowed on the wire.
//!
//! Fields that use a compiled codec declare the name of the codec-generated
//! type instead. Those names are only checked to be valid C identifiers,
//! see [`check_codec_type`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::scalar::ScalarType;

/// A resolved raw type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum DeclaredType {
    /// A single value.
    Scalar {
        /// The value type.
        ty: ScalarType,
    },
    /// Up to `max_length` values of `element`.
    Array {
        /// The element type.
        element: ScalarType,
        /// Maximum number of elements. Always positive.
        max_length: u32,
    },
}

impl DeclaredType {
    /// The scalar type of the value or of each element.
    pub fn base(&self) -> ScalarType {
        match self {
            Self::Scalar { ty } => *ty,
            Self::Array { element, .. } => *element,
        }
    }

    /// Returns true for the array form.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array { .. })
    }

    /// Maximum element count for arrays, `None` for scalars.
    pub fn max_length(&self) -> Option<u32> {
        match self {
            Self::Scalar { .. } => None,
            Self::Array { max_length, .. } => Some(*max_length),
        }
    }

    /// Maximum payload size in bytes.
    pub fn wire_size(&self) -> usize {
        match self {
            Self::Scalar { ty } => ty.wire_size(),
            Self::Array {
                element,
                max_length,
            } => element.wire_size() * (*max_length as usize),
        }
    }
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar { ty } => write!(f, "{ty}"),
            Self::Array {
                element,
                max_length,
            } => write!(f, "{element}[{max_length}]"),
        }
    }
}

impl FromStr for DeclaredType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_type(s)
    }
}

/// Resolve a declared type string.
///
/// Any string containing `[` is treated as an array declaration. The element
/// type is everything before the last `[`; the remainder must be a decimal
/// length followed by `]`.
///
/// # Errors
///
/// - [`TypeError::MissingClosingBracket`] if the length clause does not end
///   with `]`.
/// - [`TypeError::InvalidLength`] if the length is empty, not all ASCII
///   digits, zero, or does not fit in `u32`.
/// - [`TypeError::UnknownScalar`] if the scalar or element type is not
///   whitelisted.
pub fn resolve_type(declared: &str) -> Result<DeclaredType, TypeError> {
    let Some((element, clause)) = declared.rsplit_once('[') else {
        let ty = declared.parse::<ScalarType>()?;
        return Ok(DeclaredType::Scalar { ty });
    };

    let Some(digits) = clause.strip_suffix(']') else {
        return Err(TypeError::MissingClosingBracket);
    };
    let max_length = parse_length(digits)?;
    let element = element.parse::<ScalarType>()?;

    Ok(DeclaredType::Array {
        element,
        max_length,
    })
}

fn parse_length(digits: &str) -> Result<u32, TypeError> {
    let invalid = || TypeError::InvalidLength(digits.to_string());
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(n) => Ok(n),
    }
}

/// Check that a compiled codec type name is a C identifier.
///
/// The codec compiler generates `cbor_decode_<name>` and `cbor_encode_<name>`
/// from it, so it must be usable as a function name fragment.
pub fn check_codec_type(name: &str) -> Result<&str, TypeError> {
    let mut bytes = name.bytes();
    let valid = match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        }
        _ => false,
    };
    if valid {
        Ok(name)
    } else {
        Err(TypeError::InvalidCodecType(name.to_string()))
    }
}
