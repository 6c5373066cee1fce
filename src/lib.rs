pub mod cesar;
pub mod config;
pub mod cpu;
pub mod error;
pub mod types;

pub use self::config::RunConfig;
pub use self::cpu::{Cpu, ExecutionResult};
pub use self::error::{CesarError, Result};
