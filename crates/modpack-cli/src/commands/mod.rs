//! Command implementations.
//!
//! Each command lives in its own module and exposes an `execute` function
//! taking the parsed arguments and the global `--config` path.

pub mod check;
pub mod files;
pub mod pack;
pub mod resolve;
pub mod schema;
pub mod snapshot;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use files::execute as files_execute;
pub use pack::execute as pack_execute;
pub use resolve::execute as resolve_execute;
pub use schema::execute as schema_execute;
pub use snapshot::execute as snapshot_execute;
