use super::ApiError;

const MAX_USER_NAME_LEN: usize = 50;
const MAX_EMAIL_LEN: usize = 100;

/// Rejects blank strings. The value itself is returned untouched.
pub fn validate_required<'a>(field: &str, value: &'a str) -> Result<&'a str, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{} cannot be empty", field)));
    }
    Ok(value)
}

pub fn validate_reference_id(field: &str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid {}: {}. ID must be a positive integer",
            field, id
        )));
    }
    Ok(id)
}

pub fn validate_user_name(name: &str) -> Result<&str, ApiError> {
    validate_required("name", name)?;

    if name.chars().count() > MAX_USER_NAME_LEN {
        return Err(ApiError::validation(format!(
            "name must be {} characters or less",
            MAX_USER_NAME_LEN
        )));
    }

    Ok(name)
}

/// Structural check only: one `@`, a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let invalid = || ApiError::validation(format!("Invalid email address: {}", email));

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(ApiError::validation(format!(
            "email must be {} characters or less",
            MAX_EMAIL_LEN
        )));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid());
    };

    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(email)
}

pub fn validate_password(password: &str) -> Result<&str, ApiError> {
    if password.is_empty() {
        return Err(ApiError::validation("password cannot be empty"));
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("nombre", " Suelo ").unwrap(), " Suelo ");
        assert!(validate_required("nombre", "").is_err());
        assert!(validate_required("nombre", "   ").is_err());
    }

    #[test]
    fn test_validate_reference_id() {
        assert!(validate_reference_id("factor_id", 1).is_ok());
        assert!(validate_reference_id("factor_id", 0).is_err());
        assert!(validate_reference_id("hecho_id", -4).is_err());
    }

    #[test]
    fn test_validate_user_name() {
        assert!(validate_user_name("ana").is_ok());
        assert!(validate_user_name("a".repeat(50).as_str()).is_ok());
        assert!(validate_user_name("a".repeat(51).as_str()).is_err());
        assert!(validate_user_name("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@localhost").is_err());
        assert!(validate_email("ana@example..com").is_err());
        assert!(validate_email("ana@@example.com").is_err());
        assert!(validate_email("ana @example.com").is_err());
        let long = format!("{}@example.com", "a".repeat(100));
        assert!(validate_email(&long).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("s3cret").is_ok());
        assert!(validate_password("").is_err());
    }
}
