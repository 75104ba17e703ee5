use std::time::Duration;
use trakt_auth::{AuthStatus, FlowTicket};

pub fn format_auth_status(status: &AuthStatus) -> String {
    match (status.authenticated, status.expires_at) {
        (true, Some(expires_at)) => format!(
            "# Authentication Status\n\nYou are authenticated with Trakt.\nToken expires at: {} UTC",
            super::display_time(&expires_at)
        ),
        _ => "# Authentication Status\n\nYou are not authenticated with Trakt.\nUse the `start_device_auth` tool to authenticate.".to_string(),
    }
}

pub fn format_device_instructions(ticket: &FlowTicket) -> String {
    let minutes = ticket.expires_in.as_secs() / 60;
    format!(
        "# Trakt Authentication Required

To access your personal Trakt data, you need to authenticate with Trakt.

1. Visit: **{url}**
2. Enter code: **{code}**
3. Complete the authorization process on the Trakt website
4. **Important**: After authorizing on the Trakt website, please tell me \"I've completed the authorization\" so I can check your authentication status.

This code will expire in {minutes} minutes. I'll wait for your confirmation that you've completed the authorization step before checking.
",
        url = ticket.verification_url,
        code = ticket.user_code,
        minutes = minutes,
    )
}

pub fn format_flow_in_progress(user_code: &str, verification_url: &str) -> String {
    format!(
        "# Authentication Already In Progress

An authorization request is already waiting for you.

1. Visit: **{}**
2. Enter code: **{}**

Once you've approved it, ask me to check your authentication status.",
        verification_url, user_code
    )
}

pub fn format_auth_success() -> String {
    "# Authentication Successful!

You have successfully authorized the Trakt MCP application. You can now access your personal Trakt data using tools like `fetch_user_watched_shows` and `fetch_user_watched_movies`.

If you want to log out at any point, you can use the `clear_auth` tool."
        .to_string()
}

pub fn format_auth_pending() -> String {
    "# Authorization Pending

I don't see that you've completed the authorization yet. Please make sure to:

1. Visit the Trakt activation page
2. Enter your code
3. Approve the authorization request

If you've already done this and are still seeing this message, please wait a few seconds and try again by telling me \"Please check my authorization status\"."
        .to_string()
}

pub fn format_wait(retry_in: Duration) -> String {
    // Rounded up
    let seconds = retry_in.as_secs() + u64::from(retry_in.subsec_nanos() > 0);
    format!("Please wait {} seconds before checking again.", seconds)
}

pub fn format_auth_expired() -> String {
    "Authentication flow expired. Please start a new one with the `start_device_auth` tool.".to_string()
}

pub fn format_auth_denied() -> String {
    "Authorization was denied on Trakt. Use the `start_device_auth` tool if you want to try again."
        .to_string()
}

pub fn format_no_active_flow() -> String {
    "No active authentication flow. Use the `start_device_auth` tool to begin authentication."
        .to_string()
}

pub fn format_logout(had_token: bool) -> String {
    if had_token {
        "You have been successfully logged out of Trakt. Your authentication token has been cleared."
            .to_string()
    } else {
        "You were not authenticated with Trakt.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn status_shows_expiry_when_authenticated() {
        let status = AuthStatus {
            authenticated: true,
            expires_at: Some(Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap()),
            scope: Some("public".to_string()),
        };
        let out = format_auth_status(&status);
        assert!(out.contains("You are authenticated with Trakt."));
        assert!(out.contains("2030-01-02 03:04:05 UTC"));
    }

    #[test]
    fn status_points_to_device_auth_when_signed_out() {
        let status = AuthStatus {
            authenticated: false,
            expires_at: None,
            scope: None,
        };
        assert!(format_auth_status(&status).contains("`start_device_auth`"));
    }

    #[test]
    fn wait_rounds_up() {
        assert_eq!(
            format_wait(Duration::from_millis(4_200)),
            "Please wait 5 seconds before checking again."
        );
        assert_eq!(
            format_wait(Duration::from_secs(5)),
            "Please wait 5 seconds before checking again."
        );
    }
}
