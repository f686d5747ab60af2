use async_trait::async_trait;

/// Source of verified contract text, e.g. a block-explorer client.
/// Returns `None` when the registry has no verified source for `address`.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch_verified_source(&self, address: &str) -> Option<String>;
}
