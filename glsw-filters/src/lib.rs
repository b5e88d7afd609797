#[macro_use]
extern crate log;

mod epo;
mod glsw;
mod weighting;
mod y_gradient;

pub use epo::Epo;
pub use glsw::Glsw;
pub use y_gradient::YGradientGlsw;
