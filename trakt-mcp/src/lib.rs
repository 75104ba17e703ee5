pub mod context;
pub mod error;
pub mod formatters;
mod logging;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;
pub mod transport;

pub use context::AppContext;
pub use error::ToolError;
pub use logging::{init_logging, LogGuard};
pub use server::McpServer;
