//! Filesystem adapter for KnowledgeBaseStore
//!
//! Each tenant's knowledge base lives in `<dir>/<tenant_id>.json`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::entities::{KnowledgeBase, TenantId};
use crate::domain::ports::KnowledgeBaseStore;
use crate::error::DomainError;

/// JSON-file implementation of KnowledgeBaseStore
pub struct FileKnowledgeBaseStore {
    dir: PathBuf,
}

impl FileKnowledgeBaseStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            DomainError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, tenant_id: &TenantId) -> PathBuf {
        self.dir.join(format!("{}.json", tenant_id.as_str()))
    }
}

#[async_trait]
impl KnowledgeBaseStore for FileKnowledgeBaseStore {
    async fn load(&self, tenant_id: &TenantId) -> Result<Option<KnowledgeBase>, DomainError> {
        let path = self.path_for(tenant_id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let kb: KnowledgeBase = serde_json::from_slice(&bytes).map_err(|e| {
            DomainError::Storage(format!("Corrupt knowledge base {}: {}", path.display(), e))
        })?;

        if kb.tenant_id != *tenant_id {
            return Err(DomainError::Storage(format!(
                "{} belongs to tenant {}",
                path.display(),
                kb.tenant_id
            )));
        }

        Ok(Some(kb))
    }

    async fn save(&self, kb: &KnowledgeBase) -> Result<(), DomainError> {
        let path = self.path_for(&kb.tenant_id);
        let tmp = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec(kb)
            .map_err(|e| DomainError::Internal(format!("Failed to serialize: {}", e)))?;

        tokio::fs::write(&tmp, &bytes).await.map_err(|e| {
            DomainError::Storage(format!("Failed to write {}: {}", tmp.display(), e))
        })?;
        // Same-filesystem rename is atomic: readers never see a partial file
        tokio::fs::rename(&tmp, &path).await.map_err(|e| {
            DomainError::Storage(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            tenant_id = %kb.tenant_id,
            documents = kb.len(),
            bytes = bytes.len(),
            "Knowledge base written"
        );
        Ok(())
    }

    async fn delete(&self, tenant_id: &TenantId) -> Result<bool, DomainError> {
        let path = self.path_for(tenant_id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::Storage(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
