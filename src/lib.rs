pub mod config;
pub mod domain;
pub mod env;
pub mod error;
pub mod runner;
pub mod settings;
pub mod tool;
pub mod ui;

pub use domain::{AutoIncrement, HostVerbosity, MinVerVersion, Verbosity};
pub use error::{MinVerError, Result};
pub use runner::{MinVerRun, MinVerRunner};
pub use settings::{EffectiveSettings, MinVerSettings};
