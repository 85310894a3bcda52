use crate::{FilesystemResourceProvider, HttpResourceProvider};
use async_trait::async_trait;
use inspecta_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::Path;

/// Dispatches each reference by scheme: `http(s)://` goes to the network,
/// anything else is read from the local asset directory.
#[derive(Debug)]
pub struct RoutingResourceProvider {
    http: HttpResourceProvider,
    local: FilesystemResourceProvider,
}

impl RoutingResourceProvider {
    pub fn new<P: AsRef<Path>>(asset_dir: P) -> Self {
        Self {
            http: HttpResourceProvider::new(),
            local: FilesystemResourceProvider::new(asset_dir),
        }
    }

    pub fn with_http(mut self, http: HttpResourceProvider) -> Self {
        self.http = http;
        self
    }
}

#[async_trait]
impl ResourceProvider for RoutingResourceProvider {
    async fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        if HttpResourceProvider::is_http_reference(path) {
            self.http.load(path).await
        } else {
            self.local.load(path).await
        }
    }

    fn name(&self) -> &'static str {
        "RoutingResourceProvider"
    }
}
