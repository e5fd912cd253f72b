//! Pipeline module - the passenger cleaning stages in run order

pub mod encode;
pub mod error;
pub mod export;
pub mod impute;
pub mod loader;
pub mod merge;
pub mod prepare;
pub mod schema;
pub mod split;

pub use encode::*;
pub use error::PrepError;
pub use export::*;
pub use impute::*;
pub use loader::*;
pub use merge::*;
pub use prepare::*;
pub use split::*;
