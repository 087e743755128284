//! process/mod.rs
//! External process plumbing: the generic invoker, the subject under test and
//! the external reference tools.

pub mod invoker;
pub mod subject;
pub mod tool;

pub use invoker::*;
pub use subject::*;
pub use tool::*;
