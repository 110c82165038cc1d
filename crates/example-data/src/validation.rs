//! Product name validation mirroring storefront expectations.
//!
//! Generated catalogues are consumed by the storefront's free-text search and
//! name sorting, so product names are kept to a predictable character set.
//!
//! # Validation Rules
//!
//! - Minimum length: 3 characters
//! - Maximum length: 48 characters
//! - Allowed characters: letters, digits, spaces, and hyphens
//! - Must not be whitespace-only

/// Minimum allowed length for a product name.
pub const PRODUCT_NAME_MIN: usize = 3;

/// Maximum allowed length for a product name.
pub const PRODUCT_NAME_MAX: usize = 48;

/// Validates a product name against catalogue constraints.
///
/// Returns `true` if the name satisfies all validation rules:
/// - Length between [`PRODUCT_NAME_MIN`] and [`PRODUCT_NAME_MAX`] characters
/// - Contains only alphanumeric characters, spaces, and hyphens
/// - Is not whitespace-only
///
/// # Examples
///
/// ```
/// use example_data::is_valid_product_name;
///
/// assert!(is_valid_product_name("Wireless Headphones"));
/// assert!(is_valid_product_name("USB-C Hub"));
/// assert!(!is_valid_product_name("ab"));          // Too short
/// assert!(!is_valid_product_name("Mug (large)")); // Invalid character
/// assert!(!is_valid_product_name("   "));         // Whitespace-only
/// ```
#[must_use]
pub fn is_valid_product_name(name: &str) -> bool {
    let length = name.chars().count();
    if !(PRODUCT_NAME_MIN..=PRODUCT_NAME_MAX).contains(&length) {
        return false;
    }
    if name.trim().is_empty() {
        return false;
    }
    name.chars().all(is_valid_product_name_char)
}

/// Returns `true` if the character is allowed in a product name.
#[must_use]
const fn is_valid_product_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || c == '-'
}

/// Sanitizes a raw name by replacing invalid characters with spaces.
///
/// This function transforms a name that may contain invalid characters into
/// one that matches the product name pattern. It does not enforce length
/// constraints.
#[must_use]
pub(crate) fn sanitize_product_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if is_valid_product_name_char(c) {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .trim()
        .to_owned()
}
