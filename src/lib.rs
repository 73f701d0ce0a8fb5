pub mod app;
pub mod args;
pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod naming;
pub mod resource;
pub mod signer;
pub mod urls;
pub mod utils;
pub mod walk_dirs;

pub use args::Args;
pub use client::CloudinaryService;
pub use config::ServiceConfig;
pub use errors::{CloudinaryError, Result};
pub use resource::{ResourceType, UploadedResource};
