//! Domain types - parsed versions and MinVer options, independent of process execution

pub mod natural;
pub mod options;
pub mod version;

pub use natural::{natural_cmp, natural_cmp_opt};
pub use options::{AutoIncrement, HostVerbosity, Verbosity};
pub use version::MinVerVersion;
