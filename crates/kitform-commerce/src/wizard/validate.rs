//! Field validators for the build wizard.
//!
//! Each validator returns a user-renderable message on failure; messages
//! surface inline next to the field and never block unrelated steps.

/// A required free-text field must be non-blank.
pub fn require_filled(label: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("Please enter your {}", label))
    } else {
        Ok(())
    }
}

/// A required choice field must have a selection.
pub fn require_selected<T>(label: &str, value: &Option<T>) -> Result<(), String> {
    if value.is_none() {
        Err(format!("Please select a {}", label))
    } else {
        Ok(())
    }
}

/// Minimal email shape check: something@something.something.
pub fn require_email(value: &str) -> Result<(), String> {
    let value = value.trim();
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });
    if valid {
        Ok(())
    } else {
        Err("Please enter a valid email address".to_string())
    }
}

/// Phone numbers need at least 8 digits; punctuation and spaces are fine.
pub fn require_phone(value: &str) -> Result<(), String> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if digits >= 8 {
        Ok(())
    } else {
        Err("Please enter a valid phone number".to_string())
    }
}
