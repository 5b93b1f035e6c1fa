//! # Encoding Selection
//!
//! Decides how each field travels on the wire.
//!
//! - **Raw** (no `encoding`, or the raw directive): the value is copied as
//!   fixed-width bytes. The declared type must resolve against the scalar
//!   whitelist; no code is synthesized here because the generated class
//!   handles raw values generically.
//! - **Compiled** (the compiled directive, `zcbor` by default): the value is
//!   a struct produced by an external codec compiler. The declared type is
//!   the name of that struct. Inputs get a decode call into the field's
//!   callback, outputs get an encode call that feeds the generic send.
//!
//! Each compiled field adds its codec header to the service's [`Includes`].
//! Decoders and encoders have separate headers (`Pet_decode.h`,
//! `Pet_encode.h`), so an input and an output of the same type add two.
//!
//! Compiled codecs are rejected on array types and on registers. Neither
//! has a generated code path, and accepting them would produce a field
//! that silently falls back to raw handling.

use std::collections::BTreeSet;

use serde::Serialize;
use xbot_codegen_core::{check_codec_type, resolve_type, Category, CodegenError, DeclaredType};

use crate::config::CodegenConfig;
use crate::document::FieldDocument;
use crate::ir::FieldKind;

/// Wire encoding of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// Fixed-width binary copy of a whitelisted scalar or array.
    Raw,
    /// Externally generated codec.
    Compiled,
}

impl Encoding {
    /// Interpret an optional `encoding` directive under `config`.
    ///
    /// Returns `Err(reason)` for directives that name neither encoding.
    pub fn from_directive(directive: Option<&str>, config: &CodegenConfig) -> Result<Self, String> {
        match directive {
            None => Ok(Self::Raw),
            Some(d) if d == config.raw_encoding => Ok(Self::Raw),
            Some(d) if d == config.compiled_encoding => Ok(Self::Compiled),
            Some(_) => Err(format!(
                "expected '{}' or '{}'",
                config.raw_encoding, config.compiled_encoding
            )),
        }
    }

    /// Lower-case name of the encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Compiled => "compiled",
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Additional `#include` operands required by compiled codecs.
///
/// Operands are stored ready to paste after `#include`, quotes included
/// (`"Pet_decode.h"`). Each operand appears once; iteration is sorted so
/// generated headers are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Includes(BTreeSet<String>);

impl Includes {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operand. Returns false if it was already present.
    pub fn insert(&mut self, operand: impl Into<String>) -> bool {
        self.0.insert(operand.into())
    }

    /// Move every operand of `other` into this set.
    pub fn merge(&mut self, other: Includes) {
        self.0.extend(other.0);
    }

    /// Returns true if `operand` is present.
    pub fn contains(&self, operand: &str) -> bool {
        self.0.contains(operand)
    }

    /// Number of operands.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no codec header is needed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Operands in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Device-side decode of an input through a compiled codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeContract {
    /// Codec-generated struct type.
    pub codec_type: String,
    /// Generated decode function, e.g. `cbor_decode_Pet`.
    pub entry_point: String,
    /// Include operand of the decoder header.
    pub include: String,
    /// Callback receiving the decoded value.
    pub callback_name: String,
}

impl DecodeContract {
    /// Render the body of the input's `case` in the generated data handler.
    ///
    /// Expects `payload` and `length` in scope. Returns `false` from the
    /// handler when the codec reports an error.
    pub fn render(&self) -> String {
        format!(
            "{ty} decoded{{}};\n\
             if ({entry}(static_cast<const uint8_t *>(payload), length, &decoded, nullptr) != ZCBOR_SUCCESS) {{\n\
             \x20   return false;\n\
             }}\n\
             return {callback}(decoded);\n",
            ty = self.codec_type,
            entry = self.entry_point,
            callback = self.callback_name,
        )
    }
}

/// Device-side encode of an output through a compiled codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeContract {
    /// Codec-generated struct type.
    pub codec_type: String,
    /// Generated encode function, e.g. `cbor_encode_Pet`.
    pub entry_point: String,
    /// Include operand of the encoder header.
    pub include: String,
    /// Wire id passed to the generic send.
    pub id: u16,
}

impl EncodeContract {
    /// Render the body of the output's send method.
    ///
    /// Expects `data` in scope and encodes into the service's
    /// `scratch_buffer` before handing the byte count to `SendData`.
    pub fn render(&self) -> String {
        format!(
            "size_t encoded_length = 0;\n\
             if ({entry}(scratch_buffer, sizeof(scratch_buffer), &data, &encoded_length) != ZCBOR_SUCCESS) {{\n\
             \x20   return false;\n\
             }}\n\
             return SendData({id}, scratch_buffer, encoded_length);\n",
            entry = self.entry_point,
            id = self.id,
        )
    }
}

/// The codec call synthesized for a compiled field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecCall {
    /// Input fields are decoded on the device.
    Decode(DecodeContract),
    /// Output fields are encoded on the device.
    Encode(EncodeContract),
}

impl CodecCall {
    /// Include operand of the codec header.
    pub fn include(&self) -> &str {
        match self {
            Self::Decode(c) => &c.include,
            Self::Encode(c) => &c.include,
        }
    }

    /// Name of the generated codec function.
    pub fn entry_point(&self) -> &str {
        match self {
            Self::Decode(c) => &c.entry_point,
            Self::Encode(c) => &c.entry_point,
        }
    }

    /// Rendered C++ snippet.
    pub fn render(&self) -> String {
        match self {
            Self::Decode(c) => c.render(),
            Self::Encode(c) => c.render(),
        }
    }
}

/// Select the wire representation of one field.
///
/// `callback_name` is the field's already derived callback; decode contracts
/// dispatch to it. Compiled fields add their header to `includes`.
///
/// # Errors
///
/// - `CodegenError::IllegalEncoding` for an unknown directive, or a compiled
///   codec requested on an array type or a register.
/// - `CodegenError::IllegalType` if a raw type does not resolve, or a codec
///   type is not a C identifier.
pub fn select_kind(
    category: Category,
    index: usize,
    field: &FieldDocument,
    callback_name: &str,
    config: &CodegenConfig,
    includes: &mut Includes,
) -> Result<FieldKind, CodegenError> {
    let path = || field.path(category, index);
    let illegal_encoding = |reason: String| CodegenError::IllegalEncoding {
        path: path(),
        encoding: field.encoding.clone().unwrap_or_default(),
        reason,
    };
    let illegal_type = |reason| CodegenError::IllegalType {
        path: path(),
        declared: field.declared_type.clone(),
        reason,
    };

    let encoding =
        Encoding::from_directive(field.encoding.as_deref(), config).map_err(illegal_encoding)?;

    match encoding {
        Encoding::Raw => {
            let kind = match resolve_type(&field.declared_type).map_err(illegal_type)? {
                DeclaredType::Scalar { ty } => FieldKind::ScalarRaw { ty },
                DeclaredType::Array {
                    element,
                    max_length,
                } => FieldKind::ArrayRaw {
                    element,
                    max_length,
                },
            };
            Ok(kind)
        }
        Encoding::Compiled => {
            if field.declared_type.contains('[') {
                return Err(illegal_encoding(
                    "compiled codecs are only supported on non-array fields".to_string(),
                ));
            }
            let codec_type = check_codec_type(&field.declared_type)
                .map_err(illegal_type)?
                .to_string();

            let codec = match category {
                Category::Input => CodecCall::Decode(DecodeContract {
                    entry_point: format!("{}{codec_type}", config.decode_entry_prefix),
                    include: format!("\"{codec_type}{}\"", config.decode_include_suffix),
                    callback_name: callback_name.to_string(),
                    codec_type: codec_type.clone(),
                }),
                Category::Output => CodecCall::Encode(EncodeContract {
                    entry_point: format!("{}{codec_type}", config.encode_entry_prefix),
                    include: format!("\"{codec_type}{}\"", config.encode_include_suffix),
                    id: field.id,
                    codec_type: codec_type.clone(),
                }),
                Category::Register => {
                    return Err(illegal_encoding(
                        "compiled codecs are not supported on registers".to_string(),
                    ));
                }
            };

            includes.insert(codec.include());
            Ok(FieldKind::ScalarCompiled { codec_type, codec })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xbot_codegen_core::{ScalarType, TypeError};

    fn field(id: u16, ty: &str, encoding: Option<&str>) -> FieldDocument {
        FieldDocument {
            id,
            name: "Pet Info".to_string(),
            declared_type: ty.to_string(),
            encoding: encoding.map(str::to_string),
            default: None,
        }
    }

    fn select(
        category: Category,
        f: &FieldDocument,
        includes: &mut Includes,
    ) -> Result<FieldKind, CodegenError> {
        select_kind(category, 0, f, "OnPetInfoChanged", &CodegenConfig::default(), includes)
    }

    #[test]
    fn test_absent_directive_is_raw() {
        let mut includes = Includes::new();
        let kind = select(Category::Input, &field(0, "float", None), &mut includes).unwrap();
        assert_eq!(kind, FieldKind::ScalarRaw { ty: ScalarType::Float });
        assert!(includes.is_empty());
    }

    #[test]
    fn test_explicit_raw_array() {
        let mut includes = Includes::new();
        let kind =
            select(Category::Output, &field(0, "char[42]", Some("raw")), &mut includes).unwrap();
        assert_eq!(
            kind,
            FieldKind::ArrayRaw {
                element: ScalarType::Char,
                max_length: 42
            }
        );
    }

    #[test]
    fn test_raw_type_error_carries_path() {
        let mut includes = Includes::new();
        let err = select(Category::Input, &field(0, "uint8_t[abc]", None), &mut includes)
            .unwrap_err();
        match err {
            CodegenError::IllegalType {
                path,
                declared,
                reason,
            } => {
                assert_eq!(path, r#"inputs[0] ("Pet Info")"#);
                assert_eq!(declared, "uint8_t[abc]");
                assert_eq!(reason, TypeError::InvalidLength("abc".to_string()));
            }
            other => panic!("expected IllegalType, got {other}"),
        }
    }

    #[test]
    fn test_compiled_input_decodes_into_callback() {
        let mut includes = Includes::new();
        let kind = select(Category::Input, &field(2, "Pet", Some("zcbor")), &mut includes).unwrap();
        let FieldKind::ScalarCompiled { codec_type, codec } = kind else {
            panic!("expected compiled kind");
        };
        assert_eq!(codec_type, "Pet");
        assert_eq!(codec.entry_point(), "cbor_decode_Pet");
        assert!(includes.contains("\"Pet_decode.h\""));

        let code = codec.render();
        assert!(code.contains("Pet decoded{};"), "{code}");
        assert!(code.contains(
            "cbor_decode_Pet(static_cast<const uint8_t *>(payload), length, &decoded, nullptr)"
        ));
        assert!(code.contains("return OnPetInfoChanged(decoded);"));
        assert!(code.contains("return false;"));
    }

    #[test]
    fn test_compiled_output_encodes_into_send() {
        let mut includes = Includes::new();
        let kind = select(Category::Output, &field(7, "Pet", Some("zcbor")), &mut includes).unwrap();
        let FieldKind::ScalarCompiled { codec, .. } = kind else {
            panic!("expected compiled kind");
        };
        assert!(matches!(codec, CodecCall::Encode(ref c) if c.id == 7));
        assert!(includes.contains("\"Pet_encode.h\""));

        let code = codec.render();
        assert!(code.contains(
            "cbor_encode_Pet(scratch_buffer, sizeof(scratch_buffer), &data, &encoded_length)"
        ));
        assert!(code.contains("return SendData(7, scratch_buffer, encoded_length);"));
    }

    #[test]
    fn test_includes_deduplicated_but_distinct_per_direction() {
        let mut includes = Includes::new();
        select(Category::Input, &field(0, "Pet", Some("zcbor")), &mut includes).unwrap();
        select(Category::Input, &field(1, "Pet", Some("zcbor")), &mut includes).unwrap();
        select(Category::Output, &field(0, "Pet", Some("zcbor")), &mut includes).unwrap();
        assert_eq!(
            includes.iter().collect::<Vec<_>>(),
            vec!["\"Pet_decode.h\"", "\"Pet_encode.h\""]
        );
    }

    #[test]
    fn test_compiled_array_rejected() {
        let mut includes = Includes::new();
        let err = select(Category::Input, &field(0, "Pet[4]", Some("zcbor")), &mut includes)
            .unwrap_err();
        assert_eq!(err.kind(), "IllegalEncodingError");
        assert!(includes.is_empty());
    }

    #[test]
    fn test_compiled_register_rejected() {
        let mut includes = Includes::new();
        let err = select(Category::Register, &field(0, "Pet", Some("zcbor")), &mut includes)
            .unwrap_err();
        assert!(err.to_string().contains("registers"), "{err}");
    }

    #[test]
    fn test_compiled_type_must_be_identifier() {
        let mut includes = Includes::new();
        let err = select(Category::Output, &field(0, "my pet", Some("zcbor")), &mut includes)
            .unwrap_err();
        assert!(matches!(
            err,
            CodegenError::IllegalType { reason: TypeError::InvalidCodecType(_), .. }
        ));
    }

    #[test]
    fn test_compiled_type_skips_whitelist() {
        // Codec types are struct names, not raw scalars.
        let mut includes = Includes::new();
        assert!(select(Category::Input, &field(0, "MotorState", Some("zcbor")), &mut includes).is_ok());
    }

    #[test]
    fn test_unknown_directive_rejected() {
        let mut includes = Includes::new();
        let err = select(Category::Input, &field(0, "float", Some("protobuf")), &mut includes)
            .unwrap_err();
        match err {
            CodegenError::IllegalEncoding { encoding, reason, .. } => {
                assert_eq!(encoding, "protobuf");
                assert!(reason.contains("zcbor"));
            }
            other => panic!("expected IllegalEncoding, got {other}"),
        }
    }

    #[test]
    fn test_custom_profile() {
        let config = CodegenConfig {
            compiled_encoding: "cbor".to_string(),
            decode_entry_prefix: "decode_".to_string(),
            decode_include_suffix: ".dec.h".to_string(),
            ..CodegenConfig::default()
        };
        let mut includes = Includes::new();
        let kind = select_kind(
            Category::Input,
            0,
            &field(0, "Pose", Some("cbor")),
            "OnPoseChanged",
            &config,
            &mut includes,
        )
        .unwrap();
        let FieldKind::ScalarCompiled { codec, .. } = kind else {
            panic!("expected compiled kind");
        };
        assert_eq!(codec.entry_point(), "decode_Pose");
        assert!(includes.contains("\"Pose.dec.h\""));
    }
}
