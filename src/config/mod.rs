//! Configuration: the optional `.passvault.toml` file and the explicit
//! `VaultConfig` handed to `VaultManager`.

pub mod settings;

pub use settings::{Settings, VaultConfig};
