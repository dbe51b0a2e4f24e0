//! Captioning through an Anthropic model hosted on Amazon Bedrock

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockruntime::config::Credentials;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use gallery_core::constants::{BEDROCK_ANTHROPIC_VERSION, CAPTION_INSTRUCTION, CAPTION_MEDIA_TYPE};
use gallery_core::RemoteCredentials;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::captioner::{CaptionError, Captioner};

// Messages API request/response structures (Bedrock flavour)
#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    anthropic_version: &'static str,
    max_tokens: u32,
    messages: Vec<MessageParam<'a>>,
}

#[derive(Debug, Serialize)]
struct MessageParam<'a> {
    role: &'static str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'static str },
}

#[derive(Debug, Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: &'static str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    content: Vec<ContentBlockResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlockResponse {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Single-turn request: the image first, then the fixed instruction.
pub fn build_request_body(image_base64: &str, max_tokens: u32) -> Result<Vec<u8>, CaptionError> {
    let body = InvokeRequest {
        anthropic_version: BEDROCK_ANTHROPIC_VERSION,
        max_tokens,
        messages: vec![MessageParam {
            role: "user",
            content: vec![
                ContentBlock::Image {
                    source: ImageSource {
                        source_type: "base64",
                        media_type: CAPTION_MEDIA_TYPE,
                        data: image_base64,
                    },
                },
                ContentBlock::Text {
                    text: CAPTION_INSTRUCTION,
                },
            ],
        }],
    };

    serde_json::to_vec(&body).map_err(|e| CaptionError::Request(e.to_string()))
}

/// The caption is the first text block of the response.
pub fn parse_caption(body: &[u8]) -> Result<String, CaptionError> {
    let parsed: InvokeResponse = serde_json::from_slice(body)
        .map_err(|e| CaptionError::MalformedResponse(e.to_string()))?;

    let text = parsed
        .content
        .into_iter()
        .find_map(|block| match block {
            ContentBlockResponse::Text { text } => Some(text),
            ContentBlockResponse::Other => None,
        })
        .ok_or(CaptionError::EmptyCaption)?;

    let text = text.trim();
    if text.is_empty() {
        return Err(CaptionError::EmptyCaption);
    }
    Ok(text.to_string())
}

pub struct BedrockCaptioner {
    client: BedrockClient,
    model_id: String,
    max_tokens: u32,
}

impl Debug for BedrockCaptioner {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("BedrockCaptioner")
            .field("model_id", &self.model_id)
            .finish()
    }
}

impl BedrockCaptioner {
    /// Build a client that signs with the same key pair and region as the storage backend
    pub async fn from_credentials(
        credentials: &RemoteCredentials,
        model_id: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        let provider = Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            "gallery-environment",
        );

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(credentials.region.clone()))
            .credentials_provider(provider)
            .load()
            .await;

        Self {
            client: BedrockClient::new(&config),
            model_id: model_id.into(),
            max_tokens,
        }
    }
}

#[async_trait]
impl Captioner for BedrockCaptioner {
    async fn caption(&self, image_base64: &str) -> Result<String, CaptionError> {
        let body = build_request_body(image_base64, self.max_tokens)?;
        let start = std::time::Instant::now();

        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| CaptionError::Request(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(
            model_id = %self.model_id,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Bedrock invoke completed"
        );

        parse_caption(output.body().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = build_request_body("QUJD", 300).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(json["max_tokens"], 300);
        let content = &json["messages"][0]["content"];
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(content[0]["type"], "image");
        assert_eq!(content[0]["source"]["type"], "base64");
        assert_eq!(content[0]["source"]["media_type"], "image/jpeg");
        assert_eq!(content[0]["source"]["data"], "QUJD");
        assert_eq!(content[1]["type"], "text");
        assert_eq!(content[1]["text"], CAPTION_INSTRUCTION);
    }

    #[test]
    fn test_parse_caption_takes_first_text_block() {
        let body = br#"{
            "id": "msg_1",
            "content": [
                {"type": "text", "text": " A red kite over the dunes. "},
                {"type": "text", "text": "ignored"}
            ],
            "stop_reason": "end_turn"
        }"#;
        assert_eq!(parse_caption(body).unwrap(), "A red kite over the dunes.");
    }

    #[test]
    fn test_parse_caption_skips_non_text_blocks() {
        let body = br#"{"content": [{"type": "tool_use", "id": "x"}, {"type": "text", "text": "Harbour"}]}"#;
        assert_eq!(parse_caption(body).unwrap(), "Harbour");
    }

    #[test]
    fn test_parse_caption_failures() {
        assert!(matches!(
            parse_caption(b"not json"),
            Err(CaptionError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_caption(br#"{"content": []}"#),
            Err(CaptionError::EmptyCaption)
        ));
        assert!(matches!(
            parse_caption(br#"{"content": [{"type": "text", "text": "  "}]}"#),
            Err(CaptionError::EmptyCaption)
        ));
    }
}
