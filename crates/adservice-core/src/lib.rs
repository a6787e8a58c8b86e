pub mod catalog;
pub mod config;
pub mod error;
pub mod failure;
pub mod flags;
pub mod metrics;
pub mod random;
pub mod selector;
pub mod service;
pub mod types;

pub use error::{AdServiceError, FlagError, Result};
pub use service::AdService;
pub use types::{Ad, AdRequest, AdResponse, RequestType, ResponseType};
