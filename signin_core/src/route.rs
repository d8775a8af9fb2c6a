/// Places the login form can send you.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The login form itself
    Login,

    /// Where you land after signing in
    Profile,

    /// The sign-up page, for people without an account
    Register,
}

impl Route {
    /// The path this route lives at
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Profile => "/profile",
            Self::Register => "/register",
        }
    }
}
