pub mod browser;
pub mod launcher;
pub mod library;
pub mod report;

pub use crate::domain::model::{Alert, RiskLevel, ScanId};
pub use crate::domain::ports::ScannerApi;
pub use crate::utils::error::Result;
