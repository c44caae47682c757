use async_trait::async_trait;

use crate::error::GenerateError;

/// A remote (or stubbed) text-generation service.
///
/// Implementations own their transport, auth and timeouts; callers only see
/// the generated text or a [`GenerateError`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;

    /// Short human-readable name for logs.
    fn name(&self) -> &str {
        "generator"
    }
}
