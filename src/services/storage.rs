use crate::consts;
use async_trait::async_trait;

#[derive(Clone)]
pub struct StorageHandler {
    pub client: aws_sdk_s3::Client,
}

#[async_trait]
impl crate::services::StorageService for StorageHandler {
    async fn save_image(&self, key: &str, body: Vec<u8>) -> anyhow::Result<()> {
        let body = aws_sdk_s3::primitives::ByteStream::from(body);

        self.client
            .put_object()
            .bucket(consts::S3_MAIN_BUCKET_NAME)
            .key(key)
            .body(body)
            .send()
            .await?;

        Ok(())
    }

    async fn delete_image(&self, key: &str) -> anyhow::Result<()> {
        self.client
            .delete_object()
            .bucket(consts::S3_MAIN_BUCKET_NAME)
            .key(key)
            .send()
            .await?;

        Ok(())
    }
}
