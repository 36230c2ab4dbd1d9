pub mod admin;
pub mod csv_import;
pub mod directory;
pub mod form;
pub mod render;
pub mod session;

pub use crate::domain::model::{Faculty, FacultyPayload, ScrapedData};
pub use crate::domain::ports::{ConfigProvider, DirectoryApi, Storage};
pub use crate::utils::error::Result;
