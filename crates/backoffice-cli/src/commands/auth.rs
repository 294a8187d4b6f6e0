use anyhow::Result;
use backoffice_application::AppContext;
use backoffice_core::session::LoginOutcome;

use crate::output;

pub async fn login(ctx: &AppContext, username: &str, password: &str) -> Result<()> {
    match ctx.auth_flow.login(username, password).await? {
        LoginOutcome::Success { message } => {
            ctx.messages.show_success("login.success");
            if let Some(message) = message.filter(|m| !m.is_empty()) {
                output::print_field("Server", message);
            }
            if let Some(path) = ctx.router.current_path() {
                output::print_field("Route", path);
            }
        }
        LoginOutcome::Failure { error } => {
            ctx.messages.show_error(&error);
        }
    }
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    let navigation = ctx.auth_flow.logout()?;
    ctx.messages.show_info("logout.success");
    output::print_navigation(&navigation);
    Ok(())
}

pub async fn whoami(ctx: &AppContext, refresh: bool) -> Result<()> {
    if !ctx.auth.check_auth() {
        output::print_empty("Not signed in.");
        return Ok(());
    }

    let user = if refresh {
        Some(ctx.auth.get_user_info().await?)
    } else {
        ctx.session.user()
    };

    match user {
        Some(user) => output::print_user(&user),
        None => output::print_empty("Signed in, no profile stored."),
    }
    output::print_field("Token", ctx.session.snapshot().token_preview());
    Ok(())
}
