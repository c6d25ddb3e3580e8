pub mod prelude;

pub mod file_types;
pub mod files;
pub mod origins;
