use anyhow::Result;

pub mod http;
pub mod memory;

/// Where payment screenshots go. A paid submission uploads its proof first
/// and the booking record is only inserted once a public URL exists; any
/// failure here aborts the submission.
#[async_trait::async_trait]
pub trait ProofStore: Send + Sync {
    fn name(&self) -> &'static str;

    /// Persists the file and returns the public URL to store on the
    /// booking.
    async fn store(&self, file_name: &str, bytes: Vec<u8>) -> Result<String>;
}

/// Object key for an upload: timestamped, under a `public/` prefix, with
/// the client's file name reduced to URL-safe characters.
pub(crate) fn object_key(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    format!("public/{}-{}", chrono::Utc::now().timestamp_millis(), safe)
}
