//! Common types used across the application.

pub mod money;
pub mod pagination;
pub mod time_range;

pub use money::{Cents, Rounding, format_currency};
pub use pagination::{PageMeta, PageRequest};
pub use time_range::{DateRange, TimeRange};
