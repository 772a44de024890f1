mod container;
mod convert;
mod core;
mod definition;
mod destination;
mod registrar;

pub use self::core::*;
pub use container::*;
pub use convert::*;
pub use definition::*;
pub use destination::*;
pub use registrar::*;
