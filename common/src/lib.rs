//! This crate provides the shared filter contracts and error kinds

#![deny(unused_imports, unused_crate_dependencies)]
#![warn(missing_docs)]

mod centering;
mod errors;
mod filter;

pub use centering::MeanCenter;
pub use errors::FilterError;
pub use filter::{Filter, ResponseFilter, SupervisedFilter};
