//! Slide entries and their metadata.

use nanoslides_error::{BuilderError, BuilderErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Review marker carried by drafts until they are applied.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReviewStatus {
    /// Waiting for the user to apply or discard it
    Pending,
}

/// Auxiliary facts recorded with a slide.
///
/// Keys the workspace knows about are typed fields. Anything else, such as
/// provenance written by a newer version, is kept in [`extra`](Self::extra)
/// and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideMetadata {
    /// Engine that produced the image (e.g. `nanobanana`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// User-facing model selector (e.g. `flash`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_selector: Option<String>,
    /// Provider model id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// MIME type of the stored image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Aspect ratio requested at generation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    /// Text the provider returned alongside the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
    /// Pending-review marker, stripped when a draft is applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_status: Option<ReviewStatus>,
    /// Image the edit started from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_from: Option<String>,
    /// Text files injected into the prompt
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_files: Vec<String>,
    /// Title of the deck this slide was planned for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_title: Option<String>,
    /// 1-based position within the planned deck
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_slide_index: Option<u32>,
    /// Planned slide title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_slide_title: Option<String>,
    /// Unrecognized keys, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SlideMetadata {
    /// True when no key is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the pending-review marker is set.
    pub fn is_pending_review(&self) -> bool {
        self.review_status == Some(ReviewStatus::Pending)
    }

    /// Copy of this metadata without the pending-review marker.
    pub fn without_review_status(&self) -> Self {
        Self {
            review_status: None,
            ..self.clone()
        }
    }

    /// Overlay every key set in `other` onto `self`.
    pub fn merge(&mut self, other: SlideMetadata) {
        fn overlay<T>(target: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *target = value;
            }
        }

        overlay(&mut self.engine, other.engine);
        overlay(&mut self.model_selector, other.model_selector);
        overlay(&mut self.model, other.model);
        overlay(&mut self.mime_type, other.mime_type);
        overlay(&mut self.aspect_ratio, other.aspect_ratio);
        overlay(&mut self.response_text, other.response_text);
        overlay(&mut self.review_status, other.review_status);
        overlay(&mut self.edited_from, other.edited_from);
        overlay(&mut self.deck_title, other.deck_title);
        overlay(&mut self.deck_slide_index, other.deck_slide_index);
        overlay(&mut self.deck_slide_title, other.deck_slide_title);
        if !other.reference_files.is_empty() {
            self.reference_files = other.reference_files;
        }
        self.extra.extend(other.extra);
    }
}

/// One slide of a presentation, either a main slide or a draft.
///
/// Construct through [`SlideEntry::builder`], which rejects a draft without a
/// `draft_of` link (and the reverse) as well as a zero order.
///
/// # Examples
///
/// ```
/// use nanoslides_core::SlideEntry;
///
/// let entry = SlideEntry::builder()
///     .id("intro")
///     .order(1u32)
///     .prompt("Title slide")
///     .build()
///     .unwrap();
/// assert_eq!(entry.id(), "intro");
/// assert!(!entry.is_draft());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct SlideEntry {
    /// Identifier, unique within a presentation
    pub(crate) id: String,
    /// Position among main slides; drafts copy their source's order
    pub(crate) order: u32,
    /// Prompt describing the slide
    #[builder(default)]
    #[serde(default)]
    pub(crate) prompt: String,
    /// Most recently produced image
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    pub(crate) image_path: Option<PathBuf>,
    /// Auxiliary facts
    #[builder(default)]
    #[serde(default, skip_serializing_if = "SlideMetadata::is_empty")]
    pub(crate) metadata: SlideMetadata,
    /// Not-yet-applied variant of another slide
    #[builder(default)]
    #[serde(default)]
    #[getter(skip)]
    pub(crate) is_draft: bool,
    /// Slide this draft would replace
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) draft_of: Option<String>,
}

impl SlideEntry {
    /// Creates a new slide entry builder.
    pub fn builder() -> SlideEntryBuilder {
        SlideEntryBuilder::default()
    }

    /// Whether this entry is a draft.
    pub fn is_draft(&self) -> bool {
        self.is_draft
    }

    /// Whether this entry participates in the main ordering.
    pub fn is_main(&self) -> bool {
        !self.is_draft
    }
}

impl SlideEntryBuilder {
    /// Build the SlideEntry.
    ///
    /// # Errors
    ///
    /// Returns error if a required field is missing, the order is zero, or
    /// the draft flag and draft link disagree.
    #[track_caller]
    pub fn build(&self) -> Result<SlideEntry, BuilderError> {
        let entry = self.build_internal().map_err(|e| {
            BuilderError::new(BuilderErrorKind::MissingField(e.to_string()))
        })?;

        if entry.id.trim().is_empty() {
            return Err(BuilderError::inconsistent_slide(&entry.id, "id must not be empty"));
        }
        if entry.order == 0 {
            return Err(BuilderError::inconsistent_slide(&entry.id, "order must be at least 1"));
        }
        if entry.is_draft != entry.draft_of.is_some() {
            return Err(BuilderError::inconsistent_slide(
                &entry.id,
                "draft_of must be set exactly when the entry is a draft",
            ));
        }
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_unset_keys() {
        let mut base = SlideMetadata {
            engine: Some("nanobanana".to_string()),
            model: Some("gemini-2.5-flash-image".to_string()),
            ..Default::default()
        };
        base.merge(SlideMetadata {
            model: Some("gemini-3-pro-image-preview".to_string()),
            ..Default::default()
        });
        assert_eq!(base.engine.as_deref(), Some("nanobanana"));
        assert_eq!(base.model.as_deref(), Some("gemini-3-pro-image-preview"));
    }

    #[test]
    fn builder_rejects_draft_without_link() {
        let result = SlideEntry::builder()
            .id("intro-draft")
            .order(1u32)
            .is_draft(true)
            .build();
        assert!(result.is_err());
    }
}
