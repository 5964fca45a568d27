//! Nano Banana image engine.

use crate::gemini::client::GeminiClient;
use crate::gemini::dto::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use crate::prompt::{PromptMode, build_slide_prompt};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use nanoslides_core::{
    AspectRatio, EditSlideRequest, GenerateSlideRequest, SlideMetadata, SlideResult,
};
use nanoslides_error::{GeminiError, GeminiErrorKind, NanoslidesResult};
use nanoslides_interface::SlideEngine;
use nanoslides_storage::ImageStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Engine name recorded in slide metadata.
pub const ENGINE_NAME: &str = "nanobanana";

/// User-facing model selector.
///
/// # Examples
///
/// ```
/// use nanoslides_models::ImageModel;
/// use std::str::FromStr;
///
/// assert_eq!(ImageModel::from_str("PRO").unwrap().api_model(), "gemini-3-pro-image-preview");
/// assert_eq!(ImageModel::default().to_string(), "flash");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ImageModel {
    /// Fast, cheaper model
    #[default]
    Flash,
    /// Higher quality model
    Pro,
}

impl ImageModel {
    /// Provider model id.
    pub fn api_model(&self) -> &'static str {
        match self {
            ImageModel::Flash => "gemini-2.5-flash-image",
            ImageModel::Pro => "gemini-3-pro-image-preview",
        }
    }
}

/// [`SlideEngine`] backed by Gemini image models.
#[derive(Debug, Clone)]
pub struct NanoBananaEngine {
    client: GeminiClient,
    model: ImageModel,
}

impl NanoBananaEngine {
    /// Engine using `model` through `client`.
    pub fn new(client: GeminiClient, model: ImageModel) -> Self {
        Self { client, model }
    }

    /// Selected model.
    pub fn model(&self) -> ImageModel {
        self.model
    }

    async fn call(
        &self,
        parts: Vec<Part>,
        config: GenerationConfig,
        revised_prompt: String,
        aspect_ratio: Option<AspectRatio>,
    ) -> NanoslidesResult<SlideResult> {
        let request = GenerateContentRequest::user(parts, Some(config));
        let response = self
            .client
            .generate_content(self.model.api_model(), &request)
            .await?;
        let result = self.to_slide_result(&response, revised_prompt, aspect_ratio)?;
        info!(
            model = self.model.api_model(),
            bytes = result.image_bytes().len(),
            "Received slide image"
        );
        Ok(result)
    }

    fn to_slide_result(
        &self,
        response: &GenerateContentResponse,
        revised_prompt: String,
        aspect_ratio: Option<AspectRatio>,
    ) -> Result<SlideResult, GeminiError> {
        let parts = response.first_parts();

        let texts: Vec<&str> = parts
            .iter()
            .filter_map(|part| part.text_content().as_deref())
            .filter(|text| !text.is_empty())
            .collect();

        let inline = parts
            .iter()
            .find_map(|part| part.inline_data().as_ref())
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::NoImage))?;
        let image_bytes = STANDARD
            .decode(inline.data())
            .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;
        if image_bytes.is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::NoImage));
        }

        let metadata = SlideMetadata {
            engine: Some(ENGINE_NAME.to_string()),
            model_selector: Some(self.model.to_string()),
            model: Some(self.model.api_model().to_string()),
            mime_type: Some(inline.mime_type().clone()),
            aspect_ratio: aspect_ratio.map(|ratio| ratio.to_string()),
            response_text: (!texts.is_empty()).then(|| texts.join("\n")),
            ..Default::default()
        };

        Ok(SlideResult::new(
            image_bytes,
            inline.mime_type().clone(),
            revised_prompt,
            metadata,
        ))
    }
}

#[async_trait]
impl SlideEngine for NanoBananaEngine {
    #[instrument(skip(self, req), fields(model = self.model.api_model(), aspect_ratio = %req.aspect_ratio()))]
    async fn generate(&self, req: &GenerateSlideRequest) -> NanoslidesResult<SlideResult> {
        let prompt = build_slide_prompt(req.prompt(), req.style(), PromptMode::Generate);
        debug!(prompt_len = prompt.len(), "Built generation prompt");

        let mut parts = vec![Part::text(prompt.clone())];
        parts.extend(reference_parts(&req.style().reference_images).await?);

        let ratio = req.aspect_ratio().to_string();
        let config = GenerationConfig::image(Some(&ratio));
        self.call(parts, config, prompt, Some(*req.aspect_ratio()))
            .await
    }

    #[instrument(skip(self, req), fields(model = self.model.api_model()))]
    async fn edit(&self, req: &EditSlideRequest) -> NanoslidesResult<SlideResult> {
        let prompt = build_slide_prompt(req.instruction(), req.style(), PromptMode::Edit);
        debug!(prompt_len = prompt.len(), "Built edit prompt");

        let mut parts = vec![
            Part::text(prompt.clone()),
            Part::inline("image/png", STANDARD.encode(req.image())),
        ];
        parts.extend(reference_parts(&req.style().reference_images).await?);

        self.call(parts, GenerationConfig::image(None), prompt, None)
            .await
    }

    fn engine_name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn model_name(&self) -> &str {
        self.model.api_model()
    }
}

/// Read reference images into inline parts.
///
/// A missing file fails with a storage `NotFound`.
pub(crate) async fn reference_parts(paths: &[PathBuf]) -> NanoslidesResult<Vec<Part>> {
    let mut parts = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = ImageStore::read(path).await?;
        parts.push(Part::inline(mime_for_path(path), STANDARD.encode(bytes)));
    }
    Ok(parts)
}

/// MIME type guessed from the file extension, PNG when unknown.
pub(crate) fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("a/b.JPG")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("c.webp")), "image/webp");
        assert_eq!(mime_for_path(Path::new("noext")), "image/png");
    }

    #[tokio::test]
    async fn test_missing_reference_fails() {
        let err = reference_parts(&[PathBuf::from("/no/such/ref.png")])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Not found"));
    }
}
