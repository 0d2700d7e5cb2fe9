//! `RecipeAiPort` implementation for `OpenAiCompatClient`.

use async_trait::async_trait;
use tracing::debug;

use recipebox_core::{
    GeneratedRecipe, GenerationError, InlineImage, RecipeAiPort, SubstitutionRequest,
};

use crate::client::OpenAiCompatClient;
use crate::error::AiError;
use crate::http::CompletionBackend;
use crate::models::{RecipeOutput, SubstitutionsOutput};
use crate::prompts;

/// Convert internal `AiError` to core `GenerationError`.
fn map_error(err: AiError) -> GenerationError {
    match err {
        AiError::NotConfigured => {
            GenerationError::NotConfigured("no API key configured".to_string())
        }
        AiError::InvalidUrl(e) => GenerationError::NotConfigured(e.to_string()),
        e @ (AiError::ApiRequestFailed { .. } | AiError::Network(_)) => {
            GenerationError::Backend(e.to_string())
        }
        AiError::InvalidResponse { message } => GenerationError::InvalidResponse(message),
        AiError::JsonParse(e) => GenerationError::InvalidResponse(e.to_string()),
    }
}

#[async_trait]
impl<B: CompletionBackend> RecipeAiPort for OpenAiCompatClient<B> {
    async fn suggest_substitutes(
        &self,
        request: &SubstitutionRequest,
    ) -> Result<Vec<String>, GenerationError> {
        let chat = prompts::substitution_request(&self.model, request);
        let output: SubstitutionsOutput = self.complete_json(&chat).await.map_err(map_error)?;
        debug!(count = output.substitutions.len(), "Received substitutions");
        Ok(output.substitutions)
    }

    async fn recipe_from_image(
        &self,
        photo: &InlineImage,
    ) -> Result<GeneratedRecipe, GenerationError> {
        let chat = prompts::recipe_from_image_request(&self.model, photo);
        let output: RecipeOutput = self.complete_json(&chat).await.map_err(map_error)?;
        debug!(title = %output.title, "Received generated recipe");
        Ok(output.into())
    }
}
