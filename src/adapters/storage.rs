use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

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
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[cfg(feature = "lambda")]
pub use s3::S3Storage;

#[cfg(feature = "lambda")]
mod s3 {
    use crate::domain::ports::Storage;
    use crate::utils::error::{EtlError, Result};
    use aws_sdk_s3::Client as S3Client;

    #[derive(Debug, Clone)]
    pub struct S3Storage {
        client: S3Client,
        bucket: String,
    }

    impl S3Storage {
        pub fn new(client: S3Client, bucket: String) -> Self {
            Self { client, bucket }
        }
    }

    impl Storage for S3Storage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let resp = self
                .client
                .get_object()
                .bucket(&self.bucket)
                .key(path)
                .send()
                .await
                .map_err(|e| EtlError::StorageError {
                    message: format!("Failed to read s3://{}/{}: {}", self.bucket, path, e),
                })?;

            let data = resp.body.collect().await.map_err(|e| EtlError::StorageError {
                message: format!("Failed to collect S3 data: {}", e),
            })?;

            Ok(data.into_bytes().to_vec())
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.client
                .put_object()
                .bucket(&self.bucket)
                .key(path)
                .content_type("application/json")
                .body(data.to_vec().into())
                .send()
                .await
                .map_err(|e| EtlError::StorageError {
                    message: format!(
                        "Failed to write s3://{}/{}: {}",
                        self.bucket,
                        path,
                        e.into_service_error()
                    ),
                })?;

            tracing::debug!("Uploaded {} bytes to s3://{}/{}", data.len(), self.bucket, path);
            Ok(())
        }
    }
}
