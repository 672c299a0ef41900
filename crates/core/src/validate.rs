//! Shared range-checking helpers for stock item attributes.

use crate::error::CoreError;

/// Lowest admissible material percentage.
pub const MIN_MATERIAL_PCT: i32 = 0;

/// Highest admissible material percentage.
pub const MAX_MATERIAL_PCT: i32 = 100;

/// Whether a material percentage falls within `[0, 100]`.
pub fn material_pct_in_bounds(value: i32) -> bool {
    (MIN_MATERIAL_PCT..=MAX_MATERIAL_PCT).contains(&value)
}

/// Validate a `[min_pct, max_pct]` filter window.
///
/// Both bounds must lie in `[0, 100]` and the window must not be inverted.
pub fn validate_pct_range(min_pct: i32, max_pct: i32) -> Result<(), CoreError> {
    if !material_pct_in_bounds(min_pct) || !material_pct_in_bounds(max_pct) {
        return Err(CoreError::Validation(format!(
            "material percentage bounds must be between {MIN_MATERIAL_PCT} and {MAX_MATERIAL_PCT}, \
             got [{min_pct}, {max_pct}]"
        )));
    }
    if min_pct > max_pct {
        return Err(CoreError::Validation(format!(
            "min_pct must not exceed max_pct, got [{min_pct}, {max_pct}]"
        )));
    }
    Ok(())
}

/// Collect constraint violations for one stock movement's fields.
///
/// Returns one message per violated constraint; empty means the fields are
/// admissible. The same constraints apply to movement request bodies and to
/// bulk-import rows.
pub fn movement_violations(color: &str, material_pct: i32, quantity: i32) -> Vec<String> {
    let mut problems = Vec::new();
    if color.trim().is_empty() {
        problems.push("color must not be blank".to_string());
    }
    if !material_pct_in_bounds(material_pct) {
        problems.push(format!(
            "material percentage must be between {MIN_MATERIAL_PCT} and {MAX_MATERIAL_PCT}"
        ));
    }
    if quantity < 1 {
        problems.push("quantity must be at least 1".to_string());
    }
    problems
}

/// Collect constraint violations for a partial update.
///
/// Absent fields are not checked (they leave the stored value unchanged).
/// Unlike movements, an update may set the quantity to zero.
pub fn update_violations(
    color: Option<&str>,
    material_pct: Option<i32>,
    quantity: Option<i32>,
) -> Vec<String> {
    let mut problems = Vec::new();
    if let Some(color) = color {
        if color.trim().is_empty() {
            problems.push("color must not be blank".to_string());
        }
    }
    if let Some(pct) = material_pct {
        if !material_pct_in_bounds(pct) {
            problems.push(format!(
                "material percentage must be between {MIN_MATERIAL_PCT} and {MAX_MATERIAL_PCT}"
            ));
        }
    }
    if let Some(quantity) = quantity {
        if quantity < 0 {
            problems.push("quantity must not be negative".to_string());
        }
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundary_windows() {
        assert!(validate_pct_range(0, 100).is_ok());
        assert!(validate_pct_range(0, 0).is_ok());
        assert!(validate_pct_range(100, 100).is_ok());
        assert!(validate_pct_range(30, 70).is_ok());
    }

    #[test]
    fn rejects_out_of_bounds() {
        assert!(validate_pct_range(-1, 50).is_err());
        assert!(validate_pct_range(0, 101).is_err());
    }

    #[test]
    fn rejects_inverted_window() {
        assert!(validate_pct_range(60, 40).is_err());
    }

    #[test]
    fn movement_with_valid_fields_has_no_violations() {
        assert!(movement_violations("red", 40, 1).is_empty());
    }

    #[test]
    fn movement_collects_one_message_per_violation() {
        let problems = movement_violations("  ", 101, 0);
        assert_eq!(problems.len(), 3);
        assert!(problems[0].contains("color"));
        assert!(problems[1].contains("material percentage"));
        assert!(problems[2].contains("quantity"));
    }

    #[test]
    fn update_skips_absent_fields() {
        assert!(update_violations(None, None, None).is_empty());
        assert!(update_violations(Some("blue"), None, Some(0)).is_empty());
    }

    #[test]
    fn update_rejects_provided_bad_fields() {
        assert_eq!(update_violations(Some(""), Some(-5), Some(-1)).len(), 3);
    }
}
