pub mod compare;
pub mod result;
pub mod runner;

pub use compare::*;
pub use result::*;
pub use runner::*;
