//! Authentication guard run before every navigation.

use crate::routing::route::{HOME_PATH, LOGIN_PATH, is_login};

/// What the guard wants the router to do with a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(&'static str),
}

/// Applies the authentication policy to a navigation target.
///
/// | Target         | Authenticated | Decision          |
/// |----------------|---------------|-------------------|
/// | login page     | yes           | redirect to home  |
/// | non-login page | no            | redirect to login |
/// | otherwise      |               | proceed           |
pub fn evaluate(target: &str, authenticated: bool) -> GuardDecision {
    let login_page = is_login(target);

    if login_page && authenticated {
        return GuardDecision::Redirect(HOME_PATH);
    }

    if !login_page && !authenticated {
        return GuardDecision::Redirect(LOGIN_PATH);
    }

    GuardDecision::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_table() {
        assert_eq!(evaluate("/login", true), GuardDecision::Redirect("/"));
        assert_eq!(evaluate("/", false), GuardDecision::Redirect("/login"));
        assert_eq!(evaluate("/anything", false), GuardDecision::Redirect("/login"));
        assert_eq!(evaluate("/login", false), GuardDecision::Proceed);
        assert_eq!(evaluate("/", true), GuardDecision::Proceed);
    }
}
