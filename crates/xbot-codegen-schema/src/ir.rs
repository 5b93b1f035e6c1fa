//! # Service IR
//!
//! The validated record handed to the template renderer. A [`Service`] is
//! built once by the assembler and never modified afterwards.
//!
//! ## Field variants
//!
//! [`FieldKind`] has one variant per valid combination of shape and
//! encoding. Attributes that only make sense for one variant (array length,
//! codec call) live only in that variant.
//!
//! ## Renderer view
//!
//! `Serialize` produces the flat mapping the templates index into. Keys are
//! fixed per category; the only conditional keys are `max_length` (arrays),
//! `custom_decoder_code` / `custom_encoder_code` (compiled fields) and
//! `default` (registers that declare one).

use serde::ser::{Serialize, Serializer};
use xbot_codegen_core::{binary2c_array, Category, ScalarType};

use crate::encoding::{CodecCall, Encoding, Includes};

/// Wire representation of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// One whitelisted scalar, copied raw.
    ScalarRaw {
        /// Value type.
        ty: ScalarType,
    },
    /// Up to `max_length` whitelisted scalars, copied raw.
    ArrayRaw {
        /// Element type.
        element: ScalarType,
        /// Maximum element count. Always positive.
        max_length: u32,
    },
    /// A codec-generated struct.
    ScalarCompiled {
        /// Name of the generated struct type.
        codec_type: String,
        /// The synthesized codec invocation.
        codec: CodecCall,
    },
}

impl FieldKind {
    /// Type name as used in generated code (the element type for arrays).
    pub fn type_name(&self) -> &str {
        match self {
            Self::ScalarRaw { ty } => ty.as_str(),
            Self::ArrayRaw { element, .. } => element.as_str(),
            Self::ScalarCompiled { codec_type, .. } => codec_type,
        }
    }

    /// Returns true for raw arrays.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::ArrayRaw { .. })
    }

    /// Maximum element count of raw arrays.
    pub fn max_length(&self) -> Option<u32> {
        match self {
            Self::ArrayRaw { max_length, .. } => Some(*max_length),
            _ => None,
        }
    }

    /// Wire encoding of this kind.
    pub fn encoding(&self) -> Encoding {
        match self {
            Self::ScalarRaw { .. } | Self::ArrayRaw { .. } => Encoding::Raw,
            Self::ScalarCompiled { .. } => Encoding::Compiled,
        }
    }

    /// The codec call of compiled fields.
    pub fn codec(&self) -> Option<&CodecCall> {
        match self {
            Self::ScalarCompiled { codec, .. } => Some(codec),
            _ => None,
        }
    }
}

/// One validated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub(crate) category: Category,
    pub(crate) id: u16,
    pub(crate) raw_name: String,
    pub(crate) name: String,
    pub(crate) kind: FieldKind,
    pub(crate) callback_name: String,
    pub(crate) method_name: String,
    pub(crate) default: Option<String>,
}

impl Field {
    /// Category the field belongs to.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Wire id, unique within the category.
    pub fn id(&self) -> u16 {
        self.id
    }

    /// Name as written in the schema.
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// Identifier fragment derived from the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wire representation.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Value-changed callback name.
    pub fn callback_name(&self) -> &str {
        &self.callback_name
    }

    /// Send/set method name.
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Register default as a compact JSON literal.
    pub fn default_literal(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Rendered decode snippet of compiled inputs.
    pub fn custom_decoder_code(&self) -> Option<String> {
        match self.kind.codec() {
            Some(call @ CodecCall::Decode(_)) => Some(call.render()),
            _ => None,
        }
    }

    /// Rendered encode snippet of compiled outputs.
    pub fn custom_encoder_code(&self) -> Option<String> {
        match self.kind.codec() {
            Some(call @ CodecCall::Encode(_)) => Some(call.render()),
            _ => None,
        }
    }
}

#[derive(serde::Serialize)]
struct FieldRecord<'a> {
    id: u16,
    name: &'a str,
    raw_name: &'a str,
    #[serde(rename = "type")]
    type_name: &'a str,
    is_array: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<u32>,
    encoding: Encoding,
    callback_name: &'a str,
    method_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_decoder_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_encoder_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<&'a str>,
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FieldRecord {
            id: self.id,
            name: &self.name,
            raw_name: &self.raw_name,
            type_name: self.kind.type_name(),
            is_array: self.kind.is_array(),
            max_length: self.kind.max_length(),
            encoding: self.kind.encoding(),
            callback_name: &self.callback_name,
            method_name: &self.method_name,
            custom_decoder_code: self.custom_decoder_code(),
            custom_encoder_code: self.custom_encoder_code(),
            default: self.default.as_deref(),
        }
        .serialize(serializer)
    }
}

/// The complete, validated IR of one service schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub(crate) service_type: String,
    pub(crate) version: u32,
    pub(crate) class_name: String,
    pub(crate) interface_class_name: String,
    pub(crate) inputs: Vec<Field>,
    pub(crate) outputs: Vec<Field>,
    pub(crate) registers: Vec<Field>,
    pub(crate) additional_includes: Includes,
    pub(crate) service_json: String,
    pub(crate) service_cbor: Vec<u8>,
}

impl Service {
    /// Service type tag as written in the schema.
    pub fn service_type(&self) -> &str {
        &self.service_type
    }

    /// Interface version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Device-side base class, `<Type>Base`.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Host-side interface base class, `<Type>InterfaceBase`.
    pub fn interface_class_name(&self) -> &str {
        &self.interface_class_name
    }

    /// Input fields in schema order.
    pub fn inputs(&self) -> &[Field] {
        &self.inputs
    }

    /// Output fields in schema order.
    pub fn outputs(&self) -> &[Field] {
        &self.outputs
    }

    /// Register fields in schema order.
    pub fn registers(&self) -> &[Field] {
        &self.registers
    }

    /// Fields of one category.
    pub fn fields(&self, category: Category) -> &[Field] {
        match category {
            Category::Input => &self.inputs,
            Category::Output => &self.outputs,
            Category::Register => &self.registers,
        }
    }

    /// Codec headers needed by compiled fields.
    pub fn additional_includes(&self) -> &Includes {
        &self.additional_includes
    }

    /// Canonical pretty JSON of the source schema.
    pub fn service_json(&self) -> &str {
        &self.service_json
    }

    /// Canonical CBOR of the source schema.
    pub fn service_cbor(&self) -> &[u8] {
        &self.service_cbor
    }

    /// The CBOR rendered as a C array initializer.
    pub fn service_cbor_c_array(&self) -> String {
        binary2c_array(&self.service_cbor)
    }
}

#[derive(serde::Serialize)]
struct ServiceRecord<'a> {
    #[serde(rename = "type")]
    service_type: &'a str,
    version: u32,
    class_name: &'a str,
    interface_class_name: &'a str,
    inputs: &'a [Field],
    outputs: &'a [Field],
    registers: &'a [Field],
    additional_includes: &'a Includes,
    service_json: &'a str,
    service_cbor: &'a [u8],
    service_cbor_c_array: String,
}

impl Serialize for Service {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ServiceRecord {
            service_type: &self.service_type,
            version: self.version,
            class_name: &self.class_name,
            interface_class_name: &self.interface_class_name,
            inputs: &self.inputs,
            outputs: &self.outputs,
            registers: &self.registers,
            additional_includes: &self.additional_includes,
            service_json: &self.service_json,
            service_cbor: &self.service_cbor,
            service_cbor_c_array: self.service_cbor_c_array(),
        }
        .serialize(serializer)
    }
}
