use crate::credentials::{Credentials, Field};
use regex::Regex;
use std::collections::BTreeMap;

/// Shown when the email field is blank.
pub const EMAIL_REQUIRED: &str = "Email is required";

/// Shown when the email field doesn't look like an email address.
pub const EMAIL_INVALID: &str = "Invalid email address";

/// Shown when the password field is blank.
pub const PASSWORD_REQUIRED: &str = "Password is required";

/// The HTML "valid email address" grammar: a local part of letters, digits
/// and a handful of punctuation, then dot-separated domain labels that are at
/// most 63 characters and don't start or end with a hyphen.
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

/// Check whether a string looks like an email address.
pub fn is_valid_email(email: &str) -> bool {
    Regex::new(EMAIL_PATTERN).is_ok_and(|pattern| pattern.is_match(email))
}

/// Per-field problems with a set of credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    /// No problems yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem. The first message recorded for a field wins, so
    /// callers should check the most basic rule first.
    pub fn add(&mut self, field: Field, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    /// The message for a field, if it has one.
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Are there no problems at all?
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// How many fields have problems?
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok` if there are no problems, otherwise `Err(self)`.
    ///
    /// ## Errors
    ///
    /// Returns `self` if any field has a problem.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Decides whether credentials are good enough to send to the server.
pub trait Validator {
    /// Check the credentials.
    ///
    /// ## Errors
    ///
    /// Returns a message for every field with a problem.
    fn validate(&self, credentials: &Credentials) -> Result<(), ValidationErrors>;
}

/// The login form's rules: email is required and must look like an email
/// address, password is required. No length or complexity rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl Validator for SchemaValidator {
    fn validate(&self, credentials: &Credentials) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if credentials.email.is_empty() {
            errors.add(Field::Email, EMAIL_REQUIRED);
        } else if !is_valid_email(&credentials.email) {
            errors.add(Field::Email, EMAIL_INVALID);
        }

        if credentials.password.is_empty() {
            errors.add(Field::Password, PASSWORD_REQUIRED);
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
            remember_me: false,
        }
    }

    mod schema {
        use super::*;
        use proptest::{prop_assert, prop_assert_eq, proptest};

        #[test]
        fn both_fields_required() {
            let errors = SchemaValidator.validate(&creds("", "")).unwrap_err();

            assert_eq!(errors.len(), 2);
            assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));
            assert_eq!(errors.get(Field::Password), Some(PASSWORD_REQUIRED));
        }

        #[test]
        fn rejects_malformed_email() {
            let errors = SchemaValidator
                .validate(&creds("not-an-email", "letmein"))
                .unwrap_err();

            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get(Field::Email), Some(EMAIL_INVALID));
        }

        #[test]
        fn accepts_good_credentials() {
            assert_eq!(
                SchemaValidator.validate(&creds("user@example.com", "letmein")),
                Ok(())
            );
        }

        #[test]
        fn email_pattern_compiles() {
            assert!(Regex::new(EMAIL_PATTERN).is_ok());
        }

        #[test]
        fn rejects_empty_domain_labels() {
            assert!(!is_valid_email("a@b..c"));
            assert!(!is_valid_email("a@.b.c"));
        }

        #[test]
        fn rejects_trailing_dot() {
            assert!(!is_valid_email("a@b.c."));
        }

        #[test]
        fn rejects_hyphen_at_label_edges() {
            assert!(!is_valid_email("a@-b.c"));
            assert!(!is_valid_email("a@b-.c"));
            assert!(is_valid_email("a@b-c.d"));
        }

        #[test]
        fn rejects_illegal_local_characters() {
            assert!(!is_valid_email("<x>@y.z"));
            assert!(!is_valid_email("a b@c.d"));
            assert!(!is_valid_email("a@b@c.d"));
            assert!(is_valid_email("first.last+tag@example.com"));
        }

        #[test]
        fn any_password_will_do() {
            assert_eq!(
                SchemaValidator.validate(&creds("user@example.com", "x")),
                Ok(())
            );
        }

        proptest! {
            #[test]
            fn well_formed_emails_pass(
                local in "[a-z0-9._%+-]{1,16}",
                domain in "[a-z0-9]([a-z0-9-]{0,14}[a-z0-9])?",
                tld in "[a-z]{2,6}",
            ) {
                let email = format!("{local}@{domain}.{tld}");
                prop_assert_eq!(SchemaValidator.validate(&creds(&email, "pw")), Ok(()));
            }

            #[test]
            fn emails_without_at_fail(email in "[a-z0-9.]{1,32}") {
                let errors = SchemaValidator.validate(&creds(&email, "pw")).unwrap_err();
                prop_assert_eq!(errors.get(Field::Email), Some(EMAIL_INVALID));
            }

            #[test]
            fn any_nonempty_password_passes(email in ".*", password in ".+") {
                let result = SchemaValidator.validate(&creds(&email, &password));
                prop_assert!(result
                    .err()
                    .map_or(true, |errors| errors.get(Field::Password).is_none()));
            }
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn first_message_wins() {
            let mut errors = ValidationErrors::new();
            errors.add(Field::Email, EMAIL_REQUIRED);
            errors.add(Field::Email, EMAIL_INVALID);

            assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));
        }
    }
}
