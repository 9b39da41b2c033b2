//! In-memory proof storage.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::ports::{ProofStorage, UploadFailure};

/// Keeps uploaded proof files in memory and hands out `memory://` URLs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProofStorage {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryProofStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contents_of(&self, reference: &str) -> Option<Vec<u8>> {
        self.files.read().await.get(reference).cloned()
    }
}

#[async_trait]
impl ProofStorage for InMemoryProofStorage {
    async fn upload(&self, file_name: &str, contents: &[u8]) -> Result<String, UploadFailure> {
        if contents.is_empty() {
            return Err(UploadFailure::new("empty file"));
        }
        let reference = format!("memory://proofs/{}/{}", Uuid::new_v4(), file_name);
        self.files
            .write()
            .await
            .insert(reference.clone(), contents.to_vec());
        Ok(reference)
    }
}
