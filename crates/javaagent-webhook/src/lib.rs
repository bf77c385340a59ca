pub mod admission_request;
pub mod admission_response;
pub mod admission_review;
pub mod assembler;
pub mod cli;
pub mod config;
pub mod constants;
pub mod container;
pub mod errors;
pub mod patch;
pub mod planner;
pub mod tracing;
pub mod webhook;

pub use config::InjectionConfig;
pub use errors::{Result, WebhookError};
pub use webhook::Webhook;
