pub mod band;
pub mod debt_service;
pub mod factors;
pub mod formula;
pub mod ladder;
pub mod profile;

pub use band::*;
pub use debt_service::*;
pub use factors::*;
pub use formula::*;
pub use ladder::*;
pub use profile::*;
