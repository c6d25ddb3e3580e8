pub mod download;
pub mod manage;
pub mod types;
pub mod upload;

// Re-export all types
pub use types::*;

// Re-export all handlers
pub use download::{__path_get_url, get_url};
pub use manage::{
    __path_delete_file, __path_get_file, __path_get_files, __path_new_file, __path_update_file,
    delete_file, get_file, get_files, new_file, update_file,
};
pub use upload::{__path_upload_file, upload_file};
