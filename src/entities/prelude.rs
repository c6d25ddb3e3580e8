pub use super::file_types::Entity as FileTypes;
pub use super::files::Entity as Files;
pub use super::origins::Entity as Origins;
