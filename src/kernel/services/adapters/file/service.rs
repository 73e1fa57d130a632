//! 文件服务：管理多个 FileProvider
//!
//! 根据 URI scheme 选择对应的 Provider

use super::local::LocalFileProvider;
use crate::kernel::services::ports::file::{FileError, FileProvider, Result};
use crate::models::ResourceUri;
use rustc_hash::FxHashMap;

pub struct FileService {
    providers: FxHashMap<String, Box<dyn FileProvider>>,
}

impl FileService {
    pub fn new() -> Self {
        let mut service = Self::empty();
        service.register_provider(Box::new(LocalFileProvider::new()));
        service
    }

    pub fn empty() -> Self {
        Self {
            providers: FxHashMap::default(),
        }
    }

    pub fn register_provider(&mut self, provider: Box<dyn FileProvider>) {
        let scheme = provider.scheme().to_string();
        self.providers.insert(scheme, provider);
    }

    fn get_provider(&self, uri: &ResourceUri) -> Result<&dyn FileProvider> {
        let scheme = uri
            .scheme()
            .map(|s| s.to_ascii_lowercase())
            .ok_or_else(|| FileError::InvalidPath(uri.to_string()))?;
        self.providers
            .get(&scheme)
            .map(|p| p.as_ref())
            .ok_or(FileError::ProviderNotFound(scheme))
    }

    pub async fn exists(&self, uri: &ResourceUri) -> bool {
        match self.get_provider(uri) {
            Ok(provider) => provider.exists(uri).await,
            Err(e) => {
                tracing::debug!(uri = %uri, error = %e, "exists check without provider");
                false
            }
        }
    }

    pub async fn read_file(&self, uri: &ResourceUri) -> Result<Vec<u8>> {
        self.get_provider(uri)?.read_file(uri).await
    }

    pub async fn read_to_string(&self, uri: &ResourceUri) -> Result<String> {
        let bytes = self.read_file(uri).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub async fn write_file(&self, uri: &ResourceUri, content: &[u8]) -> Result<()> {
        self.get_provider(uri)?.write_file(uri, content).await
    }

    pub fn has_provider(&self, scheme: &str) -> bool {
        self.providers.contains_key(scheme)
    }

    pub fn available_schemes(&self) -> Vec<&str> {
        self.providers.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/file/service.rs"]
mod tests;
