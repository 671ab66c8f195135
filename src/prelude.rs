//! Convenience re-exports for callers embedding the dispatch engine.

pub use crate::cases;
pub use crate::cases::Cases;
pub use crate::engine::Runner;
pub use crate::errors::OrderError;
pub use crate::order::{RunOrder, RUN_ORDER_ENV};
pub use crate::testfn::{form, IntoTestFn, Shape, TestFn};
