use crate::proofs::{object_key, ProofStore};
use anyhow::Result;

/// Bucket-backed store speaking the hosted storage HTTP API: one
/// authenticated POST per object, public URLs derived from the key.
pub struct HttpProofStore {
    pub base_url: String,
    pub bucket: String,
    pub api_key: String,
    pub timeout_ms: u64,
    pub client: reqwest::Client,
}

#[async_trait::async_trait]
impl ProofStore for HttpProofStore {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn store(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let key = object_key(file_name);
        let upload_url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, key);

        let resp = self
            .client
            .post(upload_url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type_for(file_name))
            .body(bytes)
            .timeout(std::time::Duration::from_millis(self.timeout_ms))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "proof upload failed with HTTP {}: {}",
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            ));
        }

        Ok(format!("{}/storage/v1/object/public/{}/{}", self.base_url, self.bucket, key))
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
