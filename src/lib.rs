pub use crate::cases::Cases;
pub use crate::engine::Runner;
pub use crate::errors::OrderError;
pub use crate::order::{RunOrder, RUN_ORDER_ENV};
pub use crate::testfn::{IntoTestFn, Shape, TestFn};

pub mod cases;
pub mod engine;
pub mod errors;
pub mod order;
pub mod prelude;
pub mod testfn;
