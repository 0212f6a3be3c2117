//! Shared plumbing for the product MVC workspace: logging setup,
//! startup environment checks and small wire types.

pub mod types;
pub mod utils;
pub mod env;
