use bytes::Bytes;

/// One file part of an upload form.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Everything the upload form carried; presence is checked by the workflow.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub file: Option<UploadedFile>,
    pub file_type: Option<String>,
    pub description: Option<String>,
}

/// Treats an empty string like an absent one.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
