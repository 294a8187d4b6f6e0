use anyhow::Result;
use backoffice_application::AppContext;

use crate::output;

pub async fn run(ctx: &AppContext, save: Option<&str>) -> Result<()> {
    ctx.app.initialize_app().await;

    if let Some(code) = save
        && ctx.app.save_language(code)
    {
        ctx.messages.show_success("settings.saved");
    }

    let state = ctx.app.state();
    output::print_field("Language", &state.language);
    println!();
    println!("Languages:");
    output::print_json(&state.languages);
    println!("Language mapping:");
    output::print_json(&state.lang_mapping_list);
    Ok(())
}
