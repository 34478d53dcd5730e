pub mod backend;
pub mod mock;
