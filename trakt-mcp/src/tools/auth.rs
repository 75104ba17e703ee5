use super::no_args;
use crate::context::AppContext;
use crate::error::ToolError;
use crate::formatters::auth::*;
use crate::protocol::Tool;
use trakt_auth::{AuthError, FlowOutcome, FlowState, FlowStatus};

pub(super) fn definitions() -> Vec<Tool> {
    vec![
        no_args(
            "start_device_auth",
            "Start the device authentication flow with Trakt TV",
        ),
        no_args(
            "check_auth_status",
            "Check the status of an ongoing device authentication flow",
        ),
        no_args("clear_auth", "Clear the authentication token and log out of Trakt"),
    ]
}

pub(super) async fn start_device_auth(ctx: &AppContext) -> Result<String, ToolError> {
    if ctx.session().is_authenticated().await {
        return Ok("You are already authenticated with Trakt.".to_string());
    }

    match ctx.flow().start().await {
        Ok(ticket) => Ok(format_device_instructions(&ticket)),
        Err(AuthError::FlowAlreadyActive {
            user_code,
            verification_url,
        }) => Ok(format_flow_in_progress(&user_code, &verification_url)),
        Err(e) => Err(e.into()),
    }
}

pub(super) async fn check_auth_status(ctx: &AppContext) -> Result<String, ToolError> {
    if ctx.session().is_authenticated().await {
        return Ok(format_auth_success());
    }

    let status = match ctx.flow().poll_once().await {
        Ok(status) => status,
        Err(AuthError::NoActiveFlow) => return Ok(describe_finished(ctx.flow().state())),
        Err(e) => return Err(e.into()),
    };

    Ok(match status {
        FlowStatus::TooEarly { retry_in } => format_wait(retry_in),
        FlowStatus::Pending { .. } => format_auth_pending(),
        FlowStatus::Finished(outcome) => match outcome {
            FlowOutcome::Granted(_) => format_auth_success(),
            FlowOutcome::Denied => format_auth_denied(),
            FlowOutcome::Expired => format_auth_expired(),
            FlowOutcome::Cancelled => format_no_active_flow(),
        },
    })
}

/// What to say when there is no flow left to poll.
fn describe_finished(state: FlowState) -> String {
    match state {
        FlowState::Expired => format_auth_expired(),
        FlowState::Denied => format_auth_denied(),
        _ => format_no_active_flow(),
    }
}

pub(super) async fn clear_auth(ctx: &AppContext) -> Result<String, ToolError> {
    ctx.flow().cancel();
    let had_token = ctx.session().logout().await?;
    Ok(format_logout(had_token))
}
