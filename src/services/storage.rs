use crate::models::FileType;
use anyhow::Result;
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use std::fmt;
use std::time::Duration;

/// Bucket and key of one stored object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    /// `{type.bucket}` / `{type.path}/{file_name}`; the file name is used verbatim.
    pub fn derive(file_type: &FileType, file_name: &str) -> Self {
        Self {
            bucket: file_type.bucket.clone(),
            key: format!("{}/{}", file_type.path, file_name),
        }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// The only component that writes or deletes stored bytes.
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn object_exists(&self, location: &ObjectLocation) -> Result<bool>;
    async fn put_object(
        &self,
        location: &ObjectLocation,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;
    async fn delete_object(&self, location: &ObjectLocation) -> Result<()>;
    async fn presigned_get_url(&self, location: &ObjectLocation, expires_in: Duration)
    -> Result<String>;
}

pub struct S3StorageService {
    client: Client,
}

impl S3StorageService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn object_exists(&self, location: &ObjectLocation) -> Result<bool> {
        let res = self
            .client
            .head_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await;

        match res {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    Ok(false)
                } else {
                    Err(anyhow::anyhow!(service_error))
                }
            }
        }
    }

    async fn put_object(
        &self,
        location: &ObjectLocation,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        self.client
            .put_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await?;
        Ok(())
    }

    async fn delete_object(&self, location: &ObjectLocation) -> Result<()> {
        let res = self
            .client
            .delete_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await;

        if let Err(e) = res {
            tracing::error!("S3 delete_object failed: location={}, error={:?}", location, e);
            return Err(anyhow::anyhow!("S3 delete_object failed: {}", e));
        }
        Ok(())
    }

    async fn presigned_get_url(
        &self,
        location: &ObjectLocation,
        expires_in: Duration,
    ) -> Result<String> {
        let presigning_config = PresigningConfig::expires_in(expires_in)?;

        let presigned_request = self
            .client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .presigned(presigning_config)
            .await?;

        Ok(presigned_request.uri().to_string())
    }
}
