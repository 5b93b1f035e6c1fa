//! # Typed Service Documents
//!
//! Typed view of a shape-checked schema document. Entries are deserialized
//! one at a time so an error names the exact entry (`registers[3]`) rather
//! than the whole array.
//!
//! Numbers with a zero fractional part (`3.0`) count as integers, matching
//! JSON Schema's `integer`. `"encoding": null` is the same as omitting it.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use xbot_codegen_core::{Category, CodegenError};

/// The top level of a service schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDocument {
    /// Service type tag, e.g. `"EchoService"`.
    pub service_type: String,
    /// Interface version, carried through unchanged.
    pub version: u32,
    /// Host-to-device fields.
    pub inputs: Vec<FieldDocument>,
    /// Device-to-host fields.
    pub outputs: Vec<FieldDocument>,
    /// Persistent registers. Empty when the schema omits them.
    pub registers: Vec<FieldDocument>,
}

/// One entry of `inputs`, `outputs` or `registers`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldDocument {
    /// Wire id, unique within the category.
    #[serde(deserialize_with = "wire_id")]
    pub id: u16,
    /// Human-readable name.
    pub name: String,
    /// Declared type string, e.g. `uint8_t[16]` or a codec type name.
    #[serde(rename = "type")]
    pub declared_type: String,
    /// Optional encoding directive.
    #[serde(default)]
    pub encoding: Option<String>,
    /// Default value. Only meaningful on registers; `Some(Value::Null)` when
    /// the schema explicitly sets `null`.
    #[serde(default, deserialize_with = "present")]
    pub default: Option<Value>,
}

fn wire_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    let number = Number::deserialize(deserializer)?;
    integral(&number)
        .and_then(|v| u16::try_from(v).ok())
        .ok_or_else(|| D::Error::custom(format!("id {number} is not an integer in 0..=65535")))
}

fn integral(number: &Number) -> Option<u64> {
    number.as_u64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u64::MAX as f64)
            .map(|f| f as u64)
    })
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl ServiceDocument {
    /// Build the typed view of `document`.
    ///
    /// # Errors
    ///
    /// Returns `CodegenError::MalformedSchema` naming the first value that
    /// does not have the expected type.
    pub fn from_value(document: &Value) -> Result<Self, CodegenError> {
        let root = document
            .as_object()
            .ok_or_else(|| malformed("(root)", "expected a JSON object"))?;

        let service_type = root
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("type", "expected a string"))?
            .to_string();

        let version = root
            .get("version")
            .and_then(|v| match v {
                Value::Number(n) => integral(n),
                _ => None,
            })
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| malformed("version", "expected an integer in 0..=4294967295"))?;

        Ok(Self {
            service_type,
            version,
            inputs: fields(root.get("inputs"), Category::Input, true)?,
            outputs: fields(root.get("outputs"), Category::Output, true)?,
            registers: fields(root.get("registers"), Category::Register, false)?,
        })
    }

    /// The entries of one category.
    pub fn fields(&self, category: Category) -> &[FieldDocument] {
        match category {
            Category::Input => &self.inputs,
            Category::Output => &self.outputs,
            Category::Register => &self.registers,
        }
    }
}

impl FieldDocument {
    /// Diagnostic path of this entry, e.g. `inputs[2] ("Target Speed")`.
    pub fn path(&self, category: Category, index: usize) -> String {
        format!("{}[{index}] ({:?})", category.schema_key(), self.name)
    }
}

fn fields(
    value: Option<&Value>,
    category: Category,
    required: bool,
) -> Result<Vec<FieldDocument>, CodegenError> {
    let key = category.schema_key();
    let entries = match value {
        Some(Value::Array(entries)) => entries,
        None | Some(Value::Null) if !required => return Ok(Vec::new()),
        _ => return Err(malformed(key, "expected an array")),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            FieldDocument::deserialize(entry)
                .map_err(|e| malformed(&format!("{key}[{index}]"), &e.to_string()))
        })
        .collect()
}

fn malformed(path: &str, reason: &str) -> CodegenError {
    CodegenError::MalformedSchema {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
