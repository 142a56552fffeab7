use crate::common::ValidationError;

/// Trims `value` and rejects it when nothing is left.
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(value.to_string())
}

/// Trims `value`, mapping a blank string to `None`.
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn email(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    if !validate_email(&value) {
        return Err(ValidationError::InvalidEmail(value));
    }
    Ok(value)
}

pub fn validate_email(email: &str) -> bool {
    let email = email.trim();

    if email.is_empty() || email.len() > 254 {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 || domain.is_empty() {
        return false;
    }

    // Domain must have at least one dot
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    !email.chars().any(char::is_whitespace)
}

/// Lower-case ASCII alphanumerics separated by single hyphens.
pub fn validate_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > 255 {
        return false;
    }

    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return false;
    }

    slug.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("title", "  Launch  "), Ok("Launch".to_string()));
        assert_eq!(
            required("title", " \t "),
            Err(ValidationError::Required("title"))
        );
    }

    #[test]
    fn optional_drops_blank() {
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(None), None);
        assert_eq!(optional(Some(" x ")), Some("x".to_string()));
    }

    #[test]
    fn emails() {
        assert!(validate_email("press@acme.com"));
        assert!(validate_email("  first.last@news.example.org "));
        assert!(!validate_email("acme.com"));
        assert!(!validate_email("a@b@c.com"));
        assert!(!validate_email("a@localhost"));
        assert!(!validate_email("a b@acme.com"));
        assert!(!validate_email("@acme.com"));
        assert_eq!(
            email("contact email", "nope"),
            Err(ValidationError::InvalidEmail("nope".to_string()))
        );
    }

    #[test]
    fn slugs() {
        assert!(validate_slug("acme-corp-launches-2"));
        assert!(!validate_slug("Acme"));
        assert!(!validate_slug("-acme"));
        assert!(!validate_slug("acme--corp"));
        assert!(!validate_slug(""));
    }
}
