//! Field-level validation shared by the entity models.

use crate::error::{EditoraError, Result};

pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EditoraError::ValidationFailed(format!("{field} is required")));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> Result<()> {
    let trimmed = value.trim();
    let valid = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(EditoraError::ValidationFailed(format!(
            "invalid email address '{value}'"
        )));
    }
    Ok(())
}

/// Rates and budgets are USD amounts: finite and non-negative.
pub fn validate_amount(field: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(amount) if !amount.is_finite() || amount < 0.0 => Err(
            EditoraError::ValidationFailed(format!("{field} must be a non-negative amount")),
        ),
        _ => Ok(()),
    }
}

pub fn validate_url(field: &str, value: &str) -> Result<()> {
    require_non_empty(field, value)?;
    let lower = value.trim().to_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(EditoraError::ValidationFailed(format!(
            "{field} must be an http(s) URL"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails() {
        assert!(validate_email("ana@estudio.mx").is_ok());
        assert!(validate_email("ana@localhost").is_err());
        assert!(validate_email("@estudio.mx").is_err());
        assert!(validate_email("ana").is_err());
    }

    #[test]
    fn amounts() {
        assert!(validate_amount("basicRate", None).is_ok());
        assert!(validate_amount("basicRate", Some(0.0)).is_ok());
        assert!(validate_amount("basicRate", Some(-1.0)).is_err());
        assert!(validate_amount("basicRate", Some(f64::NAN)).is_err());
    }

    #[test]
    fn urls() {
        assert!(validate_url("videoUrl", "https://vimeo.com/1").is_ok());
        assert!(validate_url("videoUrl", "ftp://x").is_err());
        assert!(validate_url("videoUrl", "  ").is_err());
    }
}
