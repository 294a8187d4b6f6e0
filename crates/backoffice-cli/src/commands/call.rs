use anyhow::{Context, Result};
use backoffice_application::AppContext;
use backoffice_core::BackofficeError;
use backoffice_core::gateway::ApiResponse;
use serde_json::Value;

use crate::output;

pub async fn run(ctx: &AppContext, proc_name: &str, params: &str) -> Result<()> {
    let params: Value =
        serde_json::from_str(params).with_context(|| format!("Invalid JSON params: {}", params))?;

    let on_success = |response: &ApiResponse| {
        tracing::debug!("[call] {} answered {}", proc_name, response.status);
    };
    let on_error = |e: &BackofficeError| {
        ctx.messages.show_error(&e.describe("Request failed"));
    };

    let response = ctx
        .dso
        .call_proc(proc_name, params, Some(&on_success), Some(&on_error))
        .await?;

    match response.payload() {
        Some(rows) => output::print_json(rows),
        None => output::print_json(&response.data),
    }
    Ok(())
}
