use std::env;
use std::time::Duration;

/// Runtime configuration for the file registry service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface to bind (default: "0.0.0.0")
    pub host: String,

    /// Listening port (default: 3000)
    pub port: u16,

    /// Metadata store connection string
    pub database_url: String,

    /// Maximum size of a single uploaded file in bytes (default: 1 MiB)
    pub max_file_size: usize,

    /// Lifetime of issued download links in seconds (default: 300)
    pub presigned_url_expiry_secs: u64,

    pub storage: StorageConfig,
}

/// Object store connection settings
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Custom S3 endpoint, e.g. a MinIO instance. `None` uses the AWS default.
    pub endpoint: Option<String>,
    pub region: String,
    /// Static credentials. When either is missing the default AWS chain is used.
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub force_path_style: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: "us-east-1".to_string(),
            access_key: None,
            secret_key: None,
            force_path_style: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: "sqlite://file-registry.db?mode=rwc".to_string(),
            max_file_size: 1024 * 1024, // 1 MiB
            presigned_url_expiry_secs: 5 * 60,
            storage: StorageConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        Self {
            host: var("HOST").unwrap_or(default.host),

            port: var("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            database_url: var("DATABASE_URL").unwrap_or(default.database_url),

            max_file_size: var("MAX_FILE_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_file_size),

            presigned_url_expiry_secs: var("PRESIGNED_URL_EXPIRY_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.presigned_url_expiry_secs),

            storage: StorageConfig {
                endpoint: var("S3_ENDPOINT").filter(|v| !v.is_empty()),
                region: var("S3_REGION").unwrap_or(default.storage.region),
                access_key: var("S3_ACCESS_KEY").filter(|v| !v.is_empty()),
                secret_key: var("S3_SECRET_KEY").filter(|v| !v.is_empty()),
                force_path_style: var("S3_FORCE_PATH_STYLE")
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(default.storage.force_path_style),
            },
        }
    }

    pub fn presigned_url_expiry(&self) -> Duration {
        Duration::from_secs(self.presigned_url_expiry_secs)
    }

    /// Body limit for the upload route: the file cap plus room for multipart framing.
    pub fn upload_body_limit(&self) -> usize {
        self.max_file_size + 64 * 1024
    }
}
