use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;

use crate::proofs::{object_key, ProofStore};

/// In-memory stand-in for the bucket. Records what was uploaded and can be
/// told to fail every upload, which is how the abort-on-storage-failure
/// path gets exercised.
pub struct MemoryProofStore {
    pub behavior: String,
    uploads: Arc<Mutex<Vec<(String, usize)>>>,
}

impl MemoryProofStore {
    pub fn new() -> Self {
        Self { behavior: String::new(), uploads: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn failing() -> Self {
        Self { behavior: "ALWAYS_FAILURE".to_string(), uploads: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Keys and sizes of everything stored so far.
    pub async fn uploads(&self) -> Vec<(String, usize)> {
        self.uploads.lock().await.clone()
    }
}

impl Default for MemoryProofStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ProofStore for MemoryProofStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn store(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        if self.behavior == "ALWAYS_FAILURE" {
            return Err(anyhow::anyhow!("mock upload failure"));
        }
        let key = object_key(file_name);
        self.uploads.lock().await.push((key.clone(), bytes.len()));
        Ok(format!("memory://payment-proofs/{key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_reports_uploads() {
        let store = MemoryProofStore::new();
        let url = store.store("proof.png", vec![1, 2, 3]).await.unwrap();
        assert!(url.starts_with("memory://payment-proofs/public/"));

        let uploads = store.uploads().await;
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].1, 3);
    }

    #[tokio::test]
    async fn failing_store_rejects_every_upload() {
        let store = MemoryProofStore::failing();
        assert!(store.store("proof.png", vec![1]).await.is_err());
        assert!(store.uploads().await.is_empty());
    }
}
