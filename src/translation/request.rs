// Request translation (recommend request → Gemini)
// Author: kelexine (https://github.com/kelexine)

use crate::error::Result;
use crate::models::gemini::{Content, GenerateContentRequest, GenerationConfig, Part, SystemInstruction};
use crate::models::recommend::{ChatMessage, Mode, RecommendRequest};
use crate::prompts::{CHAT_SYSTEM, DEFAULT_PHOTO_PROMPT, PHOTO_SYSTEM};
use crate::vision::inline_image;
use tracing::debug;

pub const MAX_OUTPUT_TOKENS: u32 = 1200;
const CHAT_TEMPERATURE: f32 = 0.7;
const PHOTO_TEMPERATURE: f32 = 0.8;

/// Build the generation payload for an inbound request.
///
/// Photo mode needs both `mode == "photo"` and a non-empty image; a photo
/// request without an image is handled as chat.
pub fn build_payload(req: RecommendRequest, max_image_bytes: usize) -> Result<GenerateContentRequest> {
    let image = req
        .image_base64
        .as_deref()
        .filter(|data| !data.is_empty());

    match (req.mode, image) {
        (Mode::Photo, Some(image)) => {
            let inline_data = inline_image(image, req.image_mime.as_deref(), max_image_bytes)?;
            let prompt = req
                .prompt
                .as_deref()
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_PHOTO_PROMPT);

            debug!(
                "Built photo payload: mime={}, custom_prompt={}",
                inline_data.mime_type,
                prompt != DEFAULT_PHOTO_PROMPT
            );

            Ok(GenerateContentRequest {
                contents: vec![Content {
                    role: "user".to_string(),
                    parts: vec![Part::InlineData { inline_data }, Part::text(prompt)],
                }],
                system_instruction: Some(SystemInstruction::from_text(PHOTO_SYSTEM)),
                generation_config: Some(generation_config(PHOTO_TEMPERATURE)),
            })
        }
        _ => {
            let contents = translate_messages(req.messages.unwrap_or_default());
            debug!("Built chat payload: {} turns", contents.len());

            Ok(GenerateContentRequest {
                contents,
                system_instruction: Some(SystemInstruction::from_text(CHAT_SYSTEM)),
                generation_config: Some(generation_config(CHAT_TEMPERATURE)),
            })
        }
    }
}

/// Translate messages array. "assistant" → "model", everything else → "user".
fn translate_messages(messages: Vec<ChatMessage>) -> Vec<Content> {
    messages
        .into_iter()
        .map(|msg| {
            let role = match msg.role.as_str() {
                "assistant" => "model",
                _ => "user",
            };
            Content {
                role: role.to_string(),
                parts: vec![Part::text(msg.content)],
            }
        })
        .collect()
}

fn generation_config(temperature: f32) -> GenerationConfig {
    GenerationConfig {
        max_output_tokens: Some(MAX_OUTPUT_TOKENS),
        temperature: Some(temperature),
    }
}
