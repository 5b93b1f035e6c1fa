//! # Id Uniqueness
//!
//! Ids address fields on the wire, and the wire message carries the category
//! implicitly (data vs. register messages, direction). Ids therefore only
//! need to be unique within one category: input 3 and output 3 coexist.

use std::collections::HashSet;

use xbot_codegen_core::{Category, CodegenError};

use crate::document::FieldDocument;

/// Check that no id repeats within `fields`.
///
/// # Errors
///
/// Returns `CodegenError::DuplicateId` for the first id seen twice, in
/// document order.
pub fn check_unique_ids(category: Category, fields: &[FieldDocument]) -> Result<(), CodegenError> {
    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        if !seen.insert(field.id) {
            return Err(CodegenError::DuplicateId {
                category,
                id: field.id,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: u16) -> FieldDocument {
        FieldDocument {
            id,
            name: format!("f{id}"),
            declared_type: "uint8_t".to_string(),
            encoding: None,
            default: None,
        }
    }

    #[test]
    fn test_empty_passes() {
        assert!(check_unique_ids(Category::Input, &[]).is_ok());
    }

    #[test]
    fn test_distinct_pass() {
        let fields = [field(0), field(3), field(1)];
        assert!(check_unique_ids(Category::Output, &fields).is_ok());
    }

    #[test]
    fn test_duplicate_reported() {
        let fields = [field(3), field(1), field(3)];
        match check_unique_ids(Category::Input, &fields).unwrap_err() {
            CodegenError::DuplicateId { category, id } => {
                assert_eq!(category, Category::Input);
                assert_eq!(id, 3);
            }
            other => panic!("expected DuplicateId, got {other}"),
        }
    }

    #[test]
    fn test_first_repeat_wins() {
        let fields = [field(1), field(2), field(2), field(1)];
        let err = check_unique_ids(Category::Register, &fields).unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateId { id: 2, .. }));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn distinct_ids_pass(ids in prop::collection::hash_set(any::<u16>(), 0..64)) {
            let fields: Vec<_> = ids.into_iter().map(bare_field).collect();
            prop_assert!(check_unique_ids(Category::Input, &fields).is_ok());
        }

        #[test]
        fn repeated_id_reported(
            ids in prop::collection::vec(any::<u16>(), 1..32),
            pick in any::<prop::sample::Index>(),
            at in any::<prop::sample::Index>(),
        ) {
            let repeated = ids[pick.index(ids.len())];
            let mut with_dup = ids.clone();
            with_dup.insert(at.index(ids.len() + 1), repeated);
            let fields: Vec<_> = with_dup.iter().copied().map(bare_field).collect();

            // The reported id is the first one that repeats in document order.
            let mut seen = HashSet::new();
            let expected = with_dup.iter().copied().find(|id| !seen.insert(*id)).unwrap();
            match check_unique_ids(Category::Output, &fields) {
                Err(CodegenError::DuplicateId { id, .. }) => prop_assert_eq!(id, expected),
                other => prop_assert!(false, "expected DuplicateId, got {:?}", other),
            }
        }
    }

    fn bare_field(id: u16) -> FieldDocument {
        FieldDocument {
            id,
            name: String::new(),
            declared_type: "char".to_string(),
            encoding: None,
            default: None,
        }
    }
}
