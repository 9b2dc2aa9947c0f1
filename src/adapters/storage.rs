use crate::core::Storage;
use crate::utils::error::{Result, StylistError};
use std::path::Path;

/// 本機檔案系統，路徑相對於 `base_path`
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        match tokio::fs::read(&full_path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StylistError::ObjectNotFound {
                path: full_path.display().to_string(),
            }),
            Err(e) => Err(StylistError::IoError(e)),
        }
    }
}

#[cfg(feature = "lambda")]
pub use s3::S3Storage;

#[cfg(feature = "lambda")]
mod s3 {
    use crate::core::Storage;
    use crate::utils::error::{Result, StylistError};
    use aws_sdk_s3::Client as S3Client;

    #[derive(Debug, Clone)]
    pub struct S3Storage {
        client: S3Client,
        bucket: String,
        prefix: String,
    }

    impl S3Storage {
        pub fn new(client: S3Client, bucket: String, prefix: String) -> Self {
            Self {
                client,
                bucket,
                prefix,
            }
        }

        fn key_for(&self, path: &str) -> String {
            let prefix = self.prefix.trim_end_matches('/');
            if prefix.is_empty() {
                path.to_string()
            } else {
                format!("{}/{}", prefix, path)
            }
        }
    }

    impl Storage for S3Storage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let key = self.key_for(path);
            let resp = self
                .client
                .get_object()
                .bucket(&self.bucket)
                .key(&key)
                .send()
                .await
                .map_err(|e| {
                    let not_found = e
                        .as_service_error()
                        .map(|se| se.is_no_such_key())
                        .unwrap_or(false);
                    if not_found {
                        StylistError::ObjectNotFound {
                            path: format!("s3://{}/{}", self.bucket, key),
                        }
                    } else {
                        StylistError::ConfigError {
                            message: format!("Failed to read from S3: {}", e),
                        }
                    }
                })?;

            let data = resp
                .body
                .collect()
                .await
                .map_err(|e| StylistError::ConfigError {
                    message: format!("Failed to collect S3 data: {}", e),
                })?;

            Ok(data.into_bytes().to_vec())
        }
    }
}
