pub mod errors;

pub mod config;
pub mod env;
pub mod equinox;
pub mod java;
pub mod launch;
pub mod lombok;
pub mod paths;
pub mod platform;

mod hashing;

pub use config::LaunchConfig;
pub use env::HostEnv;
pub use errors::ProvisionError;
pub use launch::{LaunchPlan, launch, prepare_launch};
