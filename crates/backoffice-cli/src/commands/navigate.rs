use anyhow::Result;
use backoffice_application::AppContext;

use crate::output;

pub fn run(ctx: &AppContext, path: &str) -> Result<()> {
    let navigation = ctx.router.push(path)?;
    output::print_navigation(&navigation);
    Ok(())
}
