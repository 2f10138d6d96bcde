// Validation utilities
// Author: Gabriel Demetrios Lafis

/// Validate that a count is positive
pub fn validate_positive(value: usize, name: &str) -> Result<(), String> {
    if value == 0 {
        Err(format!("'{}' must be positive", name))
    } else {
        Ok(())
    }
}

/// Validate that a string value is not empty or whitespace
pub fn validate_not_blank(value: &str, name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("'{}' cannot be empty", name))
    } else {
        Ok(())
    }
}

/// Validate that a numeric value is in range
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    value: T,
    min: T,
    max: T,
    name: &str,
) -> Result<(), String> {
    if value < min || value > max {
        Err(format!(
            "'{}' must be between {} and {}",
            name, min, max
        ))
    } else {
        Ok(())
    }
}
