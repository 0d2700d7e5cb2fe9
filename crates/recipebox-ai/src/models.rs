//! Wire types for the chat completions API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use recipebox_core::GeneratedRecipe;

// ============================================================================
// Request
// ============================================================================

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub response_format: ResponseFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    pub const fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(parts),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// Plain text or a list of typed parts.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// `{"type": "json_schema", "json_schema": {...}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub json_schema: JsonSchema,
}

impl ResponseFormat {
    pub fn json_schema(name: &'static str, schema: Value) -> Self {
        Self {
            kind: "json_schema",
            json_schema: JsonSchema {
                name,
                strict: true,
                schema,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSchema {
    pub name: &'static str,
    pub strict: bool,
    pub schema: Value,
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ResponseMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

// ============================================================================
// Structured outputs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SubstitutionsOutput {
    pub substitutions: Vec<String>,
}

/// Recipe as returned by the model. Missing fields default to empty and are
/// caught by draft validation in the core.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecipeOutput {
    pub title: String,
    pub cuisine: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl From<RecipeOutput> for GeneratedRecipe {
    fn from(output: RecipeOutput) -> Self {
        Self {
            title: output.title,
            cuisine: output.cuisine,
            ingredients: output.ingredients,
            instructions: output.instructions,
        }
    }
}
