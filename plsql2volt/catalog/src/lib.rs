pub mod ddl;
pub mod error;
pub mod memory;
pub mod provider;
mod resolver;

pub use ddl::load;
