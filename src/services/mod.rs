pub mod file_service;
pub mod file_types;
pub mod files;
pub mod origins;
pub mod storage;
