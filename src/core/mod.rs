pub mod dispatcher;
pub mod engine;
pub mod scanner;

pub use crate::domain::model::{Candidate, UploadOutcome, UploadResult, UploadTarget};
pub use crate::domain::ports::{ConfigProvider, Transport};
pub use crate::utils::error::Result;
