//! Deck planning with Gemini text models.

use crate::gemini::client::GeminiClient;
use crate::gemini::dto::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use crate::gemini::engine::reference_parts;
use crate::prompt::build_planner_prompt;
use async_trait::async_trait;
use nanoslides_core::{PlanRequest, PresentationPlan, ResolvedStyle};
use nanoslides_error::{GeminiError, GeminiErrorKind, NanoslidesResult};
use nanoslides_interface::{PlannedDeck, PresentationPlanner};
use tracing::{info, instrument, warn};

/// Planner model tried first.
pub const PLANNER_PRIMARY_MODEL: &str = "gemini-3-pro-preview";
/// Planner model used when the primary is unavailable.
pub const PLANNER_FALLBACK_MODEL: &str = "gemini-2.5-pro";

const PLANNER_TEMPERATURE: f32 = 1.0;

/// [`PresentationPlanner`] backed by Gemini text models.
///
/// Models are tried in order; the next one is used only when the current
/// one reports itself unavailable. Any other failure is returned as is.
#[derive(Debug, Clone)]
pub struct GeminiPlanner {
    client: GeminiClient,
    models: Vec<String>,
}

impl GeminiPlanner {
    /// Planner with the default primary and fallback models.
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            models: vec![
                PLANNER_PRIMARY_MODEL.to_string(),
                PLANNER_FALLBACK_MODEL.to_string(),
            ],
        }
    }

    /// Replace the model chain.
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    /// Models tried, in order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    async fn request_with_fallback(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<(GenerateContentResponse, String), GeminiError> {
        let mut models = self.models.iter().peekable();
        while let Some(model) = models.next() {
            match self.client.generate_content(model, request).await {
                Ok(response) => return Ok((response, model.clone())),
                Err(e) if models.peek().is_some() && e.kind.is_service_unavailable() => {
                    warn!(model = %model, error = %e, "Planner model unavailable, falling back");
                }
                Err(e) => return Err(e),
            }
        }
        Err(GeminiError::new(GeminiErrorKind::ApiRequest(
            "no planner model configured".to_string(),
        )))
    }
}

#[async_trait]
impl PresentationPlanner for GeminiPlanner {
    #[instrument(skip(self, req, style), fields(slide_count = ?req.slide_count()))]
    async fn plan(&self, req: &PlanRequest, style: &ResolvedStyle) -> NanoslidesResult<PlannedDeck> {
        let prompt = build_planner_prompt(req, style);
        let mut parts = vec![Part::text(prompt)];
        parts.extend(reference_parts(&style.reference_images).await?);

        let request =
            GenerateContentRequest::user(parts, Some(GenerationConfig::json(PLANNER_TEMPERATURE)));
        let (response, model) = self.request_with_fallback(&request).await?;

        let plan = parse_plan(&response.all_text().join("\n"))?;
        plan.validate(*req.slide_count())?;

        info!(
            model = %model,
            deck_title = %plan.deck_title,
            slides = plan.slides.len(),
            "Planned presentation"
        );
        Ok(PlannedDeck::new(plan, model))
    }
}

/// Parse planner output, tolerating a Markdown code fence.
///
/// # Errors
///
/// - `MalformedResponse` if there is no text
/// - `InvalidPlan` if the text is not a plan object
///
/// # Examples
///
/// ```
/// use nanoslides_models::parse_plan;
///
/// let plan = parse_plan("```json\n{\"deck_title\": \"Intro\", \"slides\": []}\n```").unwrap();
/// assert_eq!(plan.deck_title, "Intro");
/// ```
pub fn parse_plan(raw: &str) -> Result<PresentationPlan, GeminiError> {
    let cleaned = strip_code_fence(raw);
    if cleaned.is_empty() {
        return Err(GeminiError::new(GeminiErrorKind::MalformedResponse(
            "planner returned no text output".to_string(),
        )));
    }
    serde_json::from_str(cleaned).map_err(|e| {
        GeminiError::new(GeminiErrorKind::InvalidPlan(format!(
            "planner returned invalid JSON: {}",
            e
        )))
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let inner = trimmed.trim_matches('`');
    inner.strip_prefix("json").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_parse_plan_rejects_non_object() {
        let err = parse_plan("[1, 2, 3]").unwrap_err();
        assert!(matches!(err.kind, GeminiErrorKind::InvalidPlan(_)));
    }

    #[test]
    fn test_parse_plan_rejects_empty() {
        let err = parse_plan("   ").unwrap_err();
        assert!(matches!(err.kind, GeminiErrorKind::MalformedResponse(_)));
    }
}
