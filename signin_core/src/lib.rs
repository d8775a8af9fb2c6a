//! The "functional core" of signin: credentials, validation, the login API,
//! token storage, and the login form's state machine.

/// What the user types in
pub mod credentials;
pub use credentials::{Credentials, Field};

/// Rules for what can be sent to the server
pub mod validation;
pub use validation::{SchemaValidator, ValidationErrors, Validator};

/// Talking to the login endpoint
pub mod auth;

/// The session token and where it's kept
pub mod token;
pub use token::{FileTokenStore, SessionToken, TokenStore};

/// Where the form can send you
pub mod route;
pub use route::Route;

/// The login form's state and transitions
pub mod form;
pub use form::{Action, Effect, LoginForm, Phase};

/// Running the side effects the form asks for
pub mod effect;
pub use effect::EffectContext;
