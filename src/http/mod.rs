pub mod prompt;
pub mod wire;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, warn};

use crate::{
    config::Config,
    media::ImageHandle,
    studio::{
        error::{ClientError, GenerationFailed},
        state::RoomDimensions,
        traits::GenerationService,
    },
};

use wire::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    estimate_model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            estimate_model: config.estimate_model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ClientError> {
        if self.api_key.is_empty() {
            return Err(ClientError::MissingApiKey);
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn try_estimate(&self, room: &ImageHandle) -> Result<RoomDimensions, ClientError> {
        let request = estimate_request(room);
        let response = self.send(&self.estimate_model, &request).await?;
        parse_dimensions(&response)
    }

    async fn try_generate(
        &self,
        room: &ImageHandle,
        furniture: &ImageHandle,
        instruction: &str,
        dimensions: Option<&RoomDimensions>,
    ) -> Result<ImageHandle, ClientError> {
        let request = composite_request(room, furniture, instruction, dimensions);
        let response = self.send(&self.model, &request).await?;
        extract_composite(&response)
    }
}

#[async_trait]
impl GenerationService for GeminiClient {
    async fn estimate_dimensions(&self, room: &ImageHandle) -> RoomDimensions {
        match self.try_estimate(room).await {
            Ok(dimensions) => {
                info!("Estimated room dimensions: {:?}", dimensions);
                dimensions
            }
            Err(e) => {
                warn!("Error estimating dimensions: {}", e);
                RoomDimensions::fallback()
            }
        }
    }

    async fn generate_composite(
        &self,
        room: &ImageHandle,
        furniture: &ImageHandle,
        instruction: &str,
        dimensions: Option<&RoomDimensions>,
    ) -> Result<ImageHandle, GenerationFailed> {
        info!(
            "Generating composite (room {:?}, furniture {:?}, dimensions: {})",
            room,
            furniture,
            dimensions.is_some()
        );

        self.try_generate(room, furniture, instruction, dimensions)
            .await
            .map_err(|e| {
                error!("Gemini API error: {}", e);
                GenerationFailed::from(e)
            })
    }
}

pub fn estimate_request(room: &ImageHandle) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part::image(room), Part::text(prompt::ESTIMATE_PROMPT)],
        }],
        generation_config: Some(GenerationConfig::room_dimensions()),
    }
}

/// Room, then furniture, then the prompt. The model relies on this order.
pub fn composite_request(
    room: &ImageHandle,
    furniture: &ImageHandle,
    instruction: &str,
    dimensions: Option<&RoomDimensions>,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::image(room),
                Part::image(furniture),
                Part::text(prompt::composite_prompt(instruction, dimensions)),
            ],
        }],
        generation_config: None,
    }
}

pub fn parse_dimensions(response: &GenerateContentResponse) -> Result<RoomDimensions, ClientError> {
    let text = response.text().ok_or(ClientError::EmptyText)?;
    Ok(serde_json::from_str(strip_code_fence(&text))?)
}

pub fn extract_composite(response: &GenerateContentResponse) -> Result<ImageHandle, ClientError> {
    if response.candidates.is_empty() {
        return Err(ClientError::NoCandidates);
    }

    if let Some(reason) = response
        .candidates
        .first()
        .and_then(|c| c.finish_reason.as_deref())
    {
        debug!("Composite finish reason: {}", reason);
    }

    response
        .first_inline_image()
        .map(ImageHandle::png_from_payload)
        .ok_or(ClientError::NoImagePart)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::studio::state::Unit;

    fn response(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    fn offline_config(api_key: &str) -> Config {
        Config {
            api_key: api_key.to_string(),
            // Nothing listens on port 1.
            base_url: "http://127.0.0.1:1/v1beta".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn composite_parts_are_room_furniture_prompt() {
        let room = ImageHandle::new("data:image/jpeg;base64,Uk9PTQ==");
        let sofa = ImageHandle::new("data:image/png;base64,U09GQQ==");
        let request = composite_request(&room, &sofa, "left corner", None);

        let value = serde_json::to_value(&request).unwrap();
        let parts = value["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["inlineData"]["data"], "Uk9PTQ==");
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[1]["inlineData"]["data"], "U09GQQ==");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert!(
            parts[2]["text"]
                .as_str()
                .unwrap()
                .contains("Additional User Instruction: left corner")
        );
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn estimate_request_asks_for_json() {
        let room = ImageHandle::new("data:image/jpeg;base64,Uk9PTQ==");
        let value = serde_json::to_value(estimate_request(&room)).unwrap();
        let parts = value["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1]["text"], prompt::ESTIMATE_PROMPT);
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn dimensions_parse_from_json_text() {
        let resp = response(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"length\":\"15\",\"width\":\"11\",\"height\":\"8\",\"unit\":\"ft\"}"}]}}]}"#,
        );
        let dims = parse_dimensions(&resp).unwrap();
        assert_eq!(dims.length, "15");
        assert_eq!(dims.unit, Unit::Feet);
    }

    #[test]
    fn fenced_json_is_tolerated() {
        let resp = response(
            r#"{"candidates":[{"content":{"parts":[{"text":"```json\n{\"length\":\"5\",\"width\":\"4\",\"height\":\"3\",\"unit\":\"m\"}\n```"}]}}]}"#,
        );
        assert_eq!(parse_dimensions(&resp).unwrap().unit, Unit::Meters);
    }

    #[test]
    fn unparsable_text_is_an_error() {
        let resp =
            response(r#"{"candidates":[{"content":{"parts":[{"text":"about 12 by 12"}]}}]}"#);
        assert!(matches!(parse_dimensions(&resp), Err(ClientError::Json(_))));
        assert!(matches!(
            parse_dimensions(&response(r#"{"candidates":[]}"#)),
            Err(ClientError::EmptyText)
        ));
    }

    #[test]
    fn composite_wraps_first_inline_image_as_png() {
        let resp = response(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"Here is the room"},
                {"inlineData":{"mimeType":"image/jpeg","data":"QUJD"}},
                {"inlineData":{"mimeType":"image/png","data":"REVG"}}
            ]}}]}"#,
        );
        let handle = extract_composite(&resp).unwrap();
        assert_eq!(handle.as_str(), "data:image/png;base64,QUJD");
    }

    #[test]
    fn text_only_composite_is_rejected() {
        let resp = response(
            r#"{"candidates":[{"content":{"parts":[{"text":"I cannot edit images."}]}}]}"#,
        );
        assert!(matches!(
            extract_composite(&resp),
            Err(ClientError::NoImagePart)
        ));
    }

    #[test]
    fn empty_candidates_are_rejected() {
        assert!(matches!(
            extract_composite(&response(r#"{"candidates":[]}"#)),
            Err(ClientError::NoCandidates)
        ));
        assert!(matches!(
            extract_composite(&response("{}")),
            Err(ClientError::NoCandidates)
        ));
    }

    #[tokio::test]
    async fn estimation_falls_back_when_unreachable() {
        let client = GeminiClient::new(&offline_config("test-key")).unwrap();
        let room = ImageHandle::from_bytes("image/jpeg", b"room");
        assert_eq!(
            client.estimate_dimensions(&room).await,
            RoomDimensions::fallback()
        );
    }

    #[tokio::test]
    async fn estimation_falls_back_without_key() {
        let client = GeminiClient::new(&offline_config("")).unwrap();
        let room = ImageHandle::from_bytes("image/jpeg", b"room");
        assert_eq!(
            client.estimate_dimensions(&room).await,
            RoomDimensions::fallback()
        );
    }

    #[tokio::test]
    async fn generation_failure_is_surfaced() {
        let client = GeminiClient::new(&offline_config("test-key")).unwrap();
        let room = ImageHandle::from_bytes("image/jpeg", b"room");
        let sofa = ImageHandle::from_bytes("image/png", b"sofa");
        let result = client.generate_composite(&room, &sofa, "", None).await;
        assert_eq!(result, Err(GenerationFailed));
    }
}
