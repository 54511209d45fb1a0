pub mod catalog;
pub mod generate;
pub mod task;

pub use catalog::*;
pub use generate::*;
pub use task::*;
