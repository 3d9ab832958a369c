//! Number and text formatting utilities.
//!
//! Shared by the scan summary and the key tables so that counts and
//! missing values look the same everywhere.

/// Formats a number with comma separators for thousands.
///
/// # Examples
///
/// ```
/// use cleanup_aws_access_keys::utils::format::format_number;
///
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Display value for optional IAM fields, "N/A" when absent.
///
/// ```
/// use cleanup_aws_access_keys::utils::format::or_na;
///
/// assert_eq!(or_na(Some("s3")), "s3");
/// assert_eq!(or_na(None), "N/A");
/// ```
pub fn or_na(value: Option<&str>) -> String {
    value.unwrap_or("N/A").to_string()
}
