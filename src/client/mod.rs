pub mod api;
pub mod auth;
pub mod view;

pub use api::{ApiError, WorkflowsClient};
pub use auth::{AccessTokenProvider, StaticTokenProvider, TokenError};
pub use view::{ViewPhase, WorkflowsView};
