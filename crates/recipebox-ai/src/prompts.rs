//! Request builders for the two assistant calls.

use serde_json::{Value, json};

use recipebox_core::{InlineImage, SubstitutionRequest};

use crate::models::{ChatMessage, ChatRequest, ContentPart, ResponseFormat};

const SUBSTITUTION_SCHEMA_NAME: &str = "ingredient_substitutions";
const RECIPE_SCHEMA_NAME: &str = "recipe_from_image";

const RECIPE_FROM_IMAGE_SYSTEM: &str = "You are a culinary expert who can identify dishes \
from photos and create recipes for them.";

const RECIPE_FROM_IMAGE_TASK: &str = "Analyze the provided image and generate a plausible \
recipe. Your response must be in the format requested.

- Give the dish a creative and fitting title.
- Identify the cuisine type.
- Provide a list of ingredients.
- Provide a list of step-by-step instructions.

Image of the dish:";

fn substitution_prompt(request: &SubstitutionRequest) -> String {
    format!(
        "Suggest some common substitutions for the ingredient \"{}\" in the recipe \"{}\". \
         Return a list of possible substitutions. \
         If there are no good substitutions, return an empty array.",
        request.ingredient, request.recipe_name
    )
}

fn substitution_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "substitutions": {
                "type": "array",
                "items": {"type": "string"},
                "description": "An array of suggested substitutions for the ingredient."
            }
        },
        "required": ["substitutions"],
        "additionalProperties": false
    })
}

fn recipe_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": {
                "type": "string",
                "description": "A creative and fitting title for the recipe."
            },
            "cuisine": {
                "type": "string",
                "description": "The cuisine type of the dish (e.g., Italian, Mexican, etc.)."
            },
            "ingredients": {
                "type": "array",
                "items": {"type": "string"},
                "description": "A list of ingredients required for the recipe."
            },
            "instructions": {
                "type": "array",
                "items": {"type": "string"},
                "description": "A list of step-by-step instructions to prepare the dish."
            }
        },
        "required": ["title", "cuisine", "ingredients", "instructions"],
        "additionalProperties": false
    })
}

pub fn substitution_request(model: &str, request: &SubstitutionRequest) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(substitution_prompt(request))],
        response_format: ResponseFormat::json_schema(
            SUBSTITUTION_SCHEMA_NAME,
            substitution_schema(),
        ),
    }
}

pub fn recipe_from_image_request(model: &str, photo: &InlineImage) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(RECIPE_FROM_IMAGE_SYSTEM),
            ChatMessage::user_parts(vec![
                ContentPart::text(RECIPE_FROM_IMAGE_TASK),
                ContentPart::image(photo.to_data_uri()),
            ]),
        ],
        response_format: ResponseFormat::json_schema(RECIPE_SCHEMA_NAME, recipe_schema()),
    }
}
