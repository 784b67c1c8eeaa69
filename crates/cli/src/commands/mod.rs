pub mod stderr;
pub mod summary;
pub mod survival;

pub use stderr::*;
pub use summary::*;
pub use survival::*;
