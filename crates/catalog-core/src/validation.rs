//! # Validation Module
//!
//! Pure field checks used by the rule engines.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Request decoding (serde)                                     │
//! │  └── Types and shapes (unknown JSON → BAD_REQUEST)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - pure field checks                              │
//! │  ├── name format, price > 0, stock >= 0, description length           │
//! │  └── no store access                                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Rule engines (crate::rules)                                  │
//! │  └── checks that need the store: uniqueness, existence, dependents     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Database                                                     │
//! │  ├── UNIQUE (name_key)                                                 │
//! │  └── CHECK / FOREIGN KEY constraints                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Names are never trimmed or normalised here: the checks look at the
//! trimmed string only to detect blank input, and the raw value is what
//! gets stored.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::EntityKind;
use crate::{MAX_DESCRIPTION_LEN, MIN_CATEGORY_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an entity name.
///
/// ## Rules
/// - Must be present
/// - Must not be empty or whitespace-only
/// - Must be at least `min` UTF-16 code units long, counted on the raw string
///   (so a single emoji such as "📦" is two units and passes a minimum of two)
///
/// ## Returns
/// The name, untouched.
///
/// ## Example
/// ```rust
/// use catalog_core::types::EntityKind;
/// use catalog_core::validation::validate_name;
///
/// assert!(validate_name(EntityKind::Category, Some("TV"), 2).is_ok());
/// assert!(validate_name(EntityKind::Category, Some("A"), 2).is_err());
/// assert!(validate_name(EntityKind::Category, Some("   "), 2).is_err());
/// assert!(validate_name(EntityKind::Category, None, 2).is_err());
/// ```
pub fn validate_name(
    entity: EntityKind,
    name: Option<&str>,
    min: usize,
) -> ValidationResult<&str> {
    let name = match name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(ValidationError::EmptyName { entity }),
    };

    if name.encode_utf16().count() < min {
        return Err(ValidationError::NameTooShort { entity, min });
    }

    Ok(name)
}

/// Validates a category name with the category minimum length.
pub fn validate_category_name(name: Option<&str>) -> ValidationResult<&str> {
    validate_name(EntityKind::Category, name, MIN_CATEGORY_NAME_LEN)
}

/// Validates a product description.
///
/// ## Rules
/// - May be absent
/// - At most [`MAX_DESCRIPTION_LEN`] characters
pub fn validate_description(description: Option<&str>) -> ValidationResult<()> {
    match description {
        Some(text) if text.chars().count() > MAX_DESCRIPTION_LEN => {
            Err(ValidationError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LEN,
            })
        }
        _ => Ok(()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be present
/// - Must be strictly greater than zero (exact decimal comparison)
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_unit_price;
/// use rust_decimal::Decimal;
///
/// assert!(validate_unit_price(Some(Decimal::new(1, 2))).is_ok());   // 0.01
/// assert!(validate_unit_price(Some(Decimal::ZERO)).is_err());
/// assert!(validate_unit_price(Some(Decimal::new(-500, 2))).is_err()); // -5.00
/// assert!(validate_unit_price(None).is_err());
/// ```
pub fn validate_unit_price(price: Option<Decimal>) -> ValidationResult<Decimal> {
    let price = price.ok_or(ValidationError::PriceRequired)?;

    if price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice);
    }

    Ok(price)
}

/// Validates a stock level.
///
/// ## Rules
/// - Must be present
/// - Must be zero or positive
pub fn validate_units_in_stock(stock: Option<i32>) -> ValidationResult<i32> {
    let stock = stock.ok_or(ValidationError::StockRequired)?;

    if stock < 0 {
        return Err(ValidationError::NegativeStock);
    }

    Ok(stock)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_category_name() {
        assert_eq!(validate_category_name(Some("TV")), Ok("TV"));
        assert_eq!(validate_category_name(Some("Electronics")), Ok("Electronics"));

        assert_eq!(
            validate_category_name(Some("A")),
            Err(ValidationError::NameTooShort {
                entity: EntityKind::Category,
                min: 2
            })
        );
        assert!(matches!(
            validate_category_name(Some("")),
            Err(ValidationError::EmptyName { .. })
        ));
        assert!(matches!(
            validate_category_name(Some(" \t ")),
            Err(ValidationError::EmptyName { .. })
        ));
        assert!(matches!(
            validate_category_name(None),
            Err(ValidationError::EmptyName { .. })
        ));
    }

    #[test]
    fn test_name_is_not_trimmed() {
        // Leading whitespace counts towards the length and is kept.
        assert_eq!(validate_category_name(Some(" A")), Ok(" A"));
        assert_eq!(validate_category_name(Some("  Books  ")), Ok("  Books  "));
    }

    #[test]
    fn test_name_length_counts_utf16_units() {
        assert_eq!(validate_category_name(Some("çö")), Ok("çö"));
        assert!(validate_category_name(Some("ç")).is_err());

        // Outside the BMP one character is a surrogate pair.
        assert_eq!(validate_category_name(Some("📦")), Ok("📦"));
    }

    #[test]
    fn test_validate_unit_price() {
        assert_eq!(
            validate_unit_price(Some(Decimal::new(1, 2))),
            Ok(Decimal::new(1, 2))
        );
        assert_eq!(
            validate_unit_price(Some(Decimal::new(99999, 2))),
            Ok(Decimal::new(99999, 2))
        );

        assert_eq!(
            validate_unit_price(Some(Decimal::ZERO)),
            Err(ValidationError::NonPositivePrice)
        );
        // 0.000 is still zero
        assert_eq!(
            validate_unit_price(Some(Decimal::new(0, 3))),
            Err(ValidationError::NonPositivePrice)
        );
        assert_eq!(
            validate_unit_price(Some(Decimal::new(-1, 2))),
            Err(ValidationError::NonPositivePrice)
        );
        assert_eq!(validate_unit_price(None), Err(ValidationError::PriceRequired));
    }

    #[test]
    fn test_validate_units_in_stock() {
        assert_eq!(validate_units_in_stock(Some(0)), Ok(0));
        assert_eq!(validate_units_in_stock(Some(50)), Ok(50));

        assert_eq!(
            validate_units_in_stock(Some(-1)),
            Err(ValidationError::NegativeStock)
        );
        assert_eq!(
            validate_units_in_stock(None),
            Err(ValidationError::StockRequired)
        );
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some("")).is_ok());
        assert!(validate_description(Some(&"x".repeat(MAX_DESCRIPTION_LEN))).is_ok());
        assert_eq!(
            validate_description(Some(&"x".repeat(MAX_DESCRIPTION_LEN + 1))),
            Err(ValidationError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LEN
            })
        );
    }
}
