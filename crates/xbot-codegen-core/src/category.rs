//! # Field Categories
//!
//! Every field of a service belongs to exactly one of three categories.
//! Ids are scoped per category, and the category decides which callback and
//! method names are generated for a field.

use serde::{Deserialize, Serialize};

/// The three field categories of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Host-to-device messages, decoded on the device.
    Input,
    /// Device-to-host messages, encoded on the device.
    Output,
    /// Persistent device values, settable and observable.
    Register,
}

impl Category {
    /// All categories in assembly order.
    pub fn all() -> &'static [Category] {
        &[Self::Input, Self::Output, Self::Register]
    }

    /// Singular name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Register => "register",
        }
    }

    /// Key of the category's array in the schema document.
    pub fn schema_key(&self) -> &'static str {
        match self {
            Self::Input => "inputs",
            Self::Output => "outputs",
            Self::Register => "registers",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.schema_key())
    }
}
