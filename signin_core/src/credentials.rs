use std::fmt;

/// What the user typed into the login form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Email to log in with.
    pub email: String,

    /// Plaintext password. Never logged.
    pub password: String,

    /// Whether the user asked to be remembered. We send this along to the
    /// server but don't do anything else with it.
    pub remember_me: bool,
}

impl Credentials {
    /// Empty credentials, as the form starts out.
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("remember_me", &self.remember_me)
            .finish()
    }
}

/// The fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// The email input
    Email,

    /// The password input
    Password,
}

impl Field {
    /// Every field we validate, in display order.
    pub const ALL: [Field; 2] = [Field::Email, Field::Password];

    /// The label shown next to the field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Email => "Email address",
            Self::Password => "Password",
        }
    }
}
