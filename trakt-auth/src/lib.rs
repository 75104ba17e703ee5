mod client;
mod error;
pub mod flow;
pub mod models;
mod session;

pub use client::{OAuthApi, PollResult, Settings, TokenStore, TraktOAuthClient};
pub use error::AuthError;
pub use flow::{DeviceFlow, FlowConfig, FlowId, FlowOutcome, FlowState, FlowStatus, FlowTicket};
pub use models::{AuthToken, DeviceCode};
pub use session::{AuthSession, AuthStatus};
