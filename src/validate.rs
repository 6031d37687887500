use crate::models::RegistrationInput;

fn blank(field: &Option<String>) -> bool {
    match field {
        Some(value) => value.trim().is_empty(),
        None => true,
    }
}

fn required(name: &str) -> String {
    format!("The {} field is required and cannot be blank", name)
}

/// Checks every required registration field and accumulates one message per
/// missing or blank field, so the caller can report all problems at once.
pub fn validate_registration(input: &RegistrationInput) -> Vec<String> {
    let mut errors = Vec::new();

    if blank(&input.full_name) {
        errors.push(required("full_name"));
    }
    if blank(&input.access_username) {
        errors.push(required("access_username"));
    }
    if blank(&input.credential_plaintext) {
        errors.push(required("credential_plaintext"));
    }
    if blank(&input.email) {
        errors.push(required("email"));
    }

    errors
}

/// Shape check equivalent to `^[^\s@]+@[^\s@]+\.[^\s@]+$`: no whitespace,
/// exactly one `@` with a non-empty local part, and a domain containing an
/// interior dot. Not a deliverability check.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let (local, domain) = match email.split_once('@') {
        Some(parts) => parts,
        None => return false,
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let domain: Vec<char> = domain.chars().collect();
    domain.len() >= 3 && domain[1..domain.len() - 1].contains(&'.')
}

/// Accepts only base-10 integers: empty, non-numeric and fractional input all
/// come back as `None`.
pub fn validate_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Rejects empty or all-whitespace usernames and returns the trimmed value.
pub fn validate_username(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> RegistrationInput {
        RegistrationInput {
            full_name: Some("Ana Silva".to_string()),
            access_username: Some("ana.silva".to_string()),
            credential_plaintext: Some("secret123".to_string()),
            email: Some("ana@example.com".to_string()),
            note: None,
        }
    }

    #[test]
    fn complete_input_passes() {
        assert!(validate_registration(&full_input()).is_empty());
    }

    #[test]
    fn every_missing_field_is_reported() {
        let errors = validate_registration(&RegistrationInput::default());
        assert_eq!(errors.len(), 4);
        for field in [
            "full_name",
            "access_username",
            "credential_plaintext",
            "email",
        ] {
            assert!(
                errors.iter().any(|msg| msg.contains(field)),
                "no error mentions {}",
                field
            );
        }
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let mut input = full_input();
        input.full_name = Some("   ".to_string());
        input.email = Some(String::new());
        let errors = validate_registration(&input);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("full_name"));
        assert!(errors[1].contains("email"));
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));

        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(" a@b.com"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn id_must_be_a_whole_number() {
        assert_eq!(validate_id("42"), Some(42));
        assert_eq!(validate_id(" 7 "), Some(7));
        assert_eq!(validate_id("abc"), None);
        assert_eq!(validate_id("12.5"), None);
        assert_eq!(validate_id(""), None);
    }

    #[test]
    fn username_is_trimmed_and_non_blank() {
        assert_eq!(
            validate_username("  ana.silva "),
            Some("ana.silva".to_string())
        );
        assert_eq!(validate_username("   "), None);
        assert_eq!(validate_username(""), None);
    }
}
