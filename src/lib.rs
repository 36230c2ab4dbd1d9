pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{http::ApiClient, storage::LocalStorage};
pub use config::ClientConfig;
pub use core::{admin::AdminConsole, directory::Directory, form::FacultyForm, session::Session};
pub use utils::error::{HubError, Result};
