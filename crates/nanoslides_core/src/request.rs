//! Request and result types exchanged with a slide engine.

use crate::{ResolvedStyle, SlideMetadata};
use nanoslides_error::{SlideError, SlideErrorKind};
use serde::{Deserialize, Serialize};

/// Output aspect ratios an engine can be asked for.
///
/// # Examples
///
/// ```
/// use nanoslides_core::AspectRatio;
/// use std::str::FromStr;
///
/// assert_eq!(AspectRatio::default().to_string(), "16:9");
/// assert_eq!(AspectRatio::from_str("4:3").unwrap(), AspectRatio::Standard);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum AspectRatio {
    /// 1:1
    #[strum(serialize = "1:1")]
    #[serde(rename = "1:1")]
    Square,
    /// 2:3
    #[strum(serialize = "2:3")]
    #[serde(rename = "2:3")]
    Portrait2x3,
    /// 3:2
    #[strum(serialize = "3:2")]
    #[serde(rename = "3:2")]
    Landscape3x2,
    /// 3:4
    #[strum(serialize = "3:4")]
    #[serde(rename = "3:4")]
    Portrait3x4,
    /// 4:3
    #[strum(serialize = "4:3")]
    #[serde(rename = "4:3")]
    Standard,
    /// 4:5
    #[strum(serialize = "4:5")]
    #[serde(rename = "4:5")]
    Portrait4x5,
    /// 5:4
    #[strum(serialize = "5:4")]
    #[serde(rename = "5:4")]
    Landscape5x4,
    /// 9:16
    #[strum(serialize = "9:16")]
    #[serde(rename = "9:16")]
    Vertical,
    /// 16:9
    #[default]
    #[strum(serialize = "16:9")]
    #[serde(rename = "16:9")]
    Widescreen,
    /// 21:9
    #[strum(serialize = "21:9")]
    #[serde(rename = "21:9")]
    Ultrawide,
}

/// Request to generate a slide from scratch.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct GenerateSlideRequest {
    /// Slide prompt
    prompt: String,
    /// Effective style
    style: ResolvedStyle,
    /// Output aspect ratio
    aspect_ratio: AspectRatio,
}

impl GenerateSlideRequest {
    /// Create a generation request.
    pub fn new(prompt: impl Into<String>, style: ResolvedStyle, aspect_ratio: AspectRatio) -> Self {
        Self {
            prompt: prompt.into(),
            style,
            aspect_ratio,
        }
    }
}

/// Request to edit an existing slide image.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct EditSlideRequest {
    /// Image being edited
    image: Vec<u8>,
    /// What to change
    instruction: String,
    /// Effective style
    style: ResolvedStyle,
}

impl EditSlideRequest {
    /// Create an edit request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the instruction is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use nanoslides_core::{EditSlideRequest, ResolvedStyle};
    ///
    /// assert!(EditSlideRequest::new(vec![1, 2, 3], "  ", ResolvedStyle::default()).is_err());
    /// ```
    #[track_caller]
    pub fn new(
        image: Vec<u8>,
        instruction: impl Into<String>,
        style: ResolvedStyle,
    ) -> Result<Self, SlideError> {
        let instruction = instruction.into();
        if instruction.trim().is_empty() {
            return Err(SlideError::new(SlideErrorKind::InvalidArgument(
                "edit instruction must not be empty".to_string(),
            )));
        }
        Ok(Self {
            image,
            instruction,
            style,
        })
    }
}

/// Image produced by an engine.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct SlideResult {
    /// Encoded image bytes
    image_bytes: Vec<u8>,
    /// MIME type of `image_bytes`
    mime_type: String,
    /// Prompt actually sent to the engine
    revised_prompt: String,
    /// Provenance to record with the slide
    metadata: SlideMetadata,
}

impl SlideResult {
    /// Create a result.
    pub fn new(
        image_bytes: Vec<u8>,
        mime_type: impl Into<String>,
        revised_prompt: impl Into<String>,
        metadata: SlideMetadata,
    ) -> Self {
        Self {
            image_bytes,
            mime_type: mime_type.into(),
            revised_prompt: revised_prompt.into(),
            metadata,
        }
    }

    /// File extension matching the MIME type, `png` for anything unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use nanoslides_core::{SlideMetadata, SlideResult};
    ///
    /// let result = SlideResult::new(vec![], "image/jpeg", "prompt", SlideMetadata::default());
    /// assert_eq!(result.extension(), "jpg");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self.mime_type.to_ascii_lowercase().as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }

    /// Split into bytes, revised prompt, and metadata.
    pub fn into_parts(self) -> (Vec<u8>, String, SlideMetadata) {
        (self.image_bytes, self.revised_prompt, self.metadata)
    }
}
