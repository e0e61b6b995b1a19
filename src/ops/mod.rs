//! Bulk stream operators.

pub use self::join::{join, left_join};
pub use self::map::map;
pub use self::run_pool::{Run, RunPool};
pub use self::sorter::ExternalSorter;

mod join;
mod map;
mod run_pool;
mod sorter;
