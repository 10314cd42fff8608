//! Request extractors shared by the routes.

pub mod visitor;

pub use visitor::{VISITOR_HEADER, Visitor};
