pub mod adapters;
pub mod config;
pub mod error;
pub mod guards;
pub mod menu;
pub mod store;
pub mod transport;
pub mod upload;

// Re-export the pieces a shell needs to wire the client together.
pub use config::Config;
pub use error::ClientError;
pub use guards::{AdminGuard, AuthGuard, PromptHistoryGuard, QueryGuard, UploadGuard};
pub use menu::MenuModel;
pub use store::SessionStore;
pub use transport::Transport;
pub use upload::UploadWorkflow;
