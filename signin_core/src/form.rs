use crate::auth::login;
use crate::credentials::{Credentials, Field};
use crate::route::Route;
use crate::token::SessionToken;
use crate::validation::{SchemaValidator, Validator};
use std::collections::BTreeSet;
use std::time::Duration;

/// How long we wait after a successful login before moving to the profile.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(500);

/// Character used to hide the password.
const MASK: char = '•';

/// Where the form is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The user is filling things in
    Editing,

    /// We've sent a login request and are waiting to hear back
    Submitting,

    /// The server gave us a token. We leave once it's stored and the
    /// redirect delay is up, whichever comes last.
    SignedIn {
        /// The token is in storage
        saved: bool,

        /// The delay is up and this is where we're headed
        due: Option<Route>,
    },

    /// We've left the form for another route
    Navigated(Route),
}

/// Things that can happen to the form
#[derive(Debug)]
pub enum Action {
    /// The user edited the email field
    EmailChanged(String),

    /// The user edited the password field
    PasswordChanged(String),

    /// The user ticked or unticked "remember me"
    RememberMeChanged(bool),

    /// Focus left a field
    Blurred(Field),

    /// The user pressed the show/hide password control
    TogglePasswordVisibility,

    /// The user asked to sign in
    Submit,

    /// The server accepted the credentials
    LoggedIn(SessionToken),

    /// Logging in didn't work; this is the message to show
    LoginFailed(String),

    /// We stored the token
    TokenSaved,

    /// We couldn't store the token; this is the message to show
    TokenSaveFailed(String),

    /// The post-login delay is up
    RedirectDue(Route),

    /// The user followed a link (e.g. "Sign up")
    FollowLink(Route),
}

/// Side effects the form asks for. The form never performs these itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one login request
    LogIn(login::Req),

    /// Put the token in persistent storage
    PersistToken(SessionToken),

    /// Wait, then tell the form to move to a route
    RedirectAfter(Duration, Route),
}

/// The state of a login form, and the rules for how it changes.
#[derive(Debug)]
pub struct LoginForm<V = SchemaValidator> {
    /// Checks credentials before we send them
    validator: V,

    /// Current field values
    credentials: Credentials,

    /// Fields the user has visited. We only show field errors for these.
    touched: BTreeSet<Field>,

    /// Form-level message from the last failed attempt
    error: Option<String>,

    /// Whether the password is shown in the clear
    show_password: bool,

    /// Where we are in the lifecycle
    phase: Phase,
}

impl LoginForm {
    /// A blank form with the standard rules
    pub fn new() -> Self {
        Self::with_validator(SchemaValidator)
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Validator> LoginForm<V> {
    /// A blank form with custom validation rules
    pub fn with_validator(validator: V) -> Self {
        Self {
            validator,
            credentials: Credentials::new(),
            touched: BTreeSet::new(),
            error: None,
            show_password: false,
            phase: Phase::Editing,
        }
    }

    /// Current field values
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Where we are in the lifecycle
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Is a login request in flight? The submit control should be disabled
    /// while this is true.
    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Is the password shown in the clear?
    pub fn show_password(&self) -> bool {
        self.show_password
    }

    /// The form-level error banner, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Where we navigated to, once we have
    pub fn navigated_to(&self) -> Option<Route> {
        match self.phase {
            Phase::Navigated(route) => Some(route),
            _ => None,
        }
    }

    /// The error to show next to a field. Only fields the user has visited
    /// (or that were part of a submit attempt) get one.
    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        if !self.touched.contains(&field) {
            return None;
        }

        self.validator
            .validate(&self.credentials)
            .err()
            .and_then(|errors| errors.get(field))
    }

    /// The password as it should be drawn: in the clear, or masked one
    /// character per character.
    pub fn password_display(&self) -> String {
        if self.show_password {
            self.credentials.password.clone()
        } else {
            self.credentials.password.chars().map(|_| MASK).collect()
        }
    }

    /// Handle an `Action`, updating the form and producing side effects
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        if let Phase::Navigated(route) = self.phase {
            tracing::debug!(?route, "ignoring action after navigation");
            return vec![];
        }

        match action {
            Action::EmailChanged(email) => {
                self.credentials.email = email;

                vec![]
            }
            Action::PasswordChanged(password) => {
                self.credentials.password = password;

                vec![]
            }
            Action::RememberMeChanged(remember_me) => {
                self.credentials.remember_me = remember_me;

                vec![]
            }
            Action::Blurred(field) => {
                self.touched.insert(field);

                vec![]
            }
            Action::TogglePasswordVisibility => {
                self.show_password = !self.show_password;

                vec![]
            }
            Action::Submit => self.submit(),
            Action::LoggedIn(token) => {
                if self.phase != Phase::Submitting {
                    tracing::warn!(phase = ?self.phase, "got a token we didn't ask for");
                    return vec![];
                }

                self.phase = Phase::SignedIn {
                    saved: false,
                    due: None,
                };
                self.error = None;

                vec![
                    Effect::RedirectAfter(REDIRECT_DELAY, Route::Profile),
                    Effect::PersistToken(token),
                ]
            }
            Action::LoginFailed(message) => {
                if self.phase == Phase::Submitting {
                    self.phase = Phase::Editing;
                }
                self.error = Some(message);

                vec![]
            }
            Action::TokenSaved => {
                if let Phase::SignedIn { due, .. } = self.phase {
                    self.phase = match due {
                        Some(route) => Phase::Navigated(route),
                        None => Phase::SignedIn {
                            saved: true,
                            due: None,
                        },
                    };
                }

                vec![]
            }
            Action::TokenSaveFailed(message) => {
                // Going back to editing means the pending redirect won't
                // land.
                if matches!(self.phase, Phase::SignedIn { .. }) {
                    self.phase = Phase::Editing;
                }
                self.error = Some(message);

                vec![]
            }
            Action::RedirectDue(route) => {
                if let Phase::SignedIn { saved, .. } = self.phase {
                    self.phase = if saved {
                        Phase::Navigated(route)
                    } else {
                        tracing::debug!(path = route.path(), "redirect waiting on token save");
                        Phase::SignedIn {
                            saved,
                            due: Some(route),
                        }
                    };
                }

                vec![]
            }
            Action::FollowLink(route) => {
                self.phase = Phase::Navigated(route);

                vec![]
            }
        }
    }

    /// Validate, and if everything checks out, send one login request.
    fn submit(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Editing {
            tracing::debug!(phase = ?self.phase, "ignoring submit");
            return vec![];
        }

        self.touched.extend(Field::ALL);

        match self.validator.validate(&self.credentials) {
            Ok(()) => {
                self.phase = Phase::Submitting;

                vec![Effect::LogIn(login::Req::from(&self.credentials))]
            }
            Err(errors) => {
                tracing::debug!(problems = errors.len(), "not submitting invalid form");

                vec![]
            }
        }
    }
}
