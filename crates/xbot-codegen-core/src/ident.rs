//! # Identifier Derivation
//!
//! Schema names are human readable ("Target Speed", "Motor Ctl"). Generated
//! code needs them as function and class name fragments, so all whitespace
//! is removed. Nothing else changes: case and punctuation are preserved
//! exactly, so `"target speed"` becomes `targetspeed`, not `TargetSpeed`.

use crate::category::Category;

/// Strip every whitespace character from `name`.
///
/// Whitespace is Unicode `White_Space` plus the ASCII information separators
/// U+001C..=U+001F, which schema tooling has always treated as blanks.
///
/// Idempotent: deriving from an already derived name returns it unchanged.
pub fn derive_identifier(name: &str) -> String {
    name.chars().filter(|&c| !is_name_blank(c)).collect()
}

fn is_name_blank(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}

/// Name of the value-changed callback for a field.
///
/// | Category | Callback |
/// |----------|----------|
/// | input    | `On<name>Changed` |
/// | output   | `On<name>Changed` |
/// | register | `OnRegister<name>Changed` |
pub fn callback_name(category: Category, derived: &str) -> String {
    match category {
        Category::Input | Category::Output => format!("On{derived}Changed"),
        Category::Register => format!("OnRegister{derived}Changed"),
    }
}

/// Name of the send/set method for a field.
///
/// Inputs and outputs get `Send<name>`, registers `SetRegister<name>`.
pub fn method_name(category: Category, derived: &str) -> String {
    match category {
        Category::Input | Category::Output => format!("Send{derived}"),
        Category::Register => format!("SetRegister{derived}"),
    }
}

/// Class name of the generated device-side service base class.
pub fn class_name(service_type: &str) -> String {
    format!("{}Base", derive_identifier(service_type))
}

/// Class name of the generated host-side interface base class.
pub fn interface_class_name(service_type: &str) -> String {
    format!("{}InterfaceBase", derive_identifier(service_type))
}
