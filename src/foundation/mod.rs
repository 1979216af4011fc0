pub mod error;
pub(crate) mod math;
