//! Mock slide engine and planner for testing.

use async_trait::async_trait;
use image::{ImageBuffer, ImageFormat, Rgb};
use nanoslides::{
    EditSlideRequest, GeminiError, GeminiErrorKind, GenerateSlideRequest, NanoslidesResult,
    PlanRequest, PlannedDeck, PlannedSlide, PresentationPlan, PresentationPlanner, ResolvedStyle,
    SlideEngine, SlideMetadata, SlideResult,
};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

/// A small valid PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = ImageBuffer::from_pixel(width, height, Rgb([40u8, 90, 160]));
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("encode test png");
    bytes.into_inner()
}

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always return a 16x9 PNG
    Success,
    /// Always return the specified error
    Error(GeminiErrorKind),
    /// Succeed N times, then fail with the error
    SucceedThenFail {
        success_count: usize,
        error: GeminiErrorKind,
    },
}

/// Mock slide engine for testing.
///
/// Records every prompt and style it receives so tests can check what a
/// workflow sent.
#[derive(Debug, Clone)]
pub struct MockSlideEngine {
    behavior: MockBehavior,
    call_count: Arc<Mutex<usize>>,
    prompts: Arc<Mutex<Vec<String>>>,
    styles: Arc<Mutex<Vec<ResolvedStyle>>>,
}

#[allow(dead_code)]
impl MockSlideEngine {
    /// Engine that always succeeds.
    pub fn new_success() -> Self {
        Self::with_behavior(MockBehavior::Success)
    }

    /// Engine that always fails with the given error.
    pub fn new_error(error: GeminiErrorKind) -> Self {
        Self::with_behavior(MockBehavior::Error(error))
    }

    /// Engine that succeeds `success_count` times, then fails.
    pub fn new_succeed_then_fail(success_count: usize, error: GeminiErrorKind) -> Self {
        Self::with_behavior(MockBehavior::SucceedThenFail {
            success_count,
            error,
        })
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(Mutex::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            styles: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of generate and edit calls made.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts and instructions received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Styles received, in call order.
    pub fn styles(&self) -> Vec<ResolvedStyle> {
        self.styles.lock().unwrap().clone()
    }

    fn respond(
        &self,
        prompt: &str,
        style: &ResolvedStyle,
        aspect_ratio: Option<String>,
    ) -> NanoslidesResult<SlideResult> {
        let call = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.styles.lock().unwrap().push(style.clone());

        match &self.behavior {
            MockBehavior::Error(kind) => Err(GeminiError::new(kind.clone()).into()),
            MockBehavior::SucceedThenFail {
                success_count,
                error,
            } if call > *success_count => Err(GeminiError::new(error.clone()).into()),
            _ => {
                let metadata = SlideMetadata {
                    engine: Some("mock".to_string()),
                    model: Some("mock-image".to_string()),
                    mime_type: Some("image/png".to_string()),
                    aspect_ratio,
                    ..Default::default()
                };
                Ok(SlideResult::new(
                    png_bytes(16, 9),
                    "image/png",
                    prompt,
                    metadata,
                ))
            }
        }
    }
}

#[async_trait]
impl SlideEngine for MockSlideEngine {
    async fn generate(&self, req: &GenerateSlideRequest) -> NanoslidesResult<SlideResult> {
        self.respond(req.prompt(), req.style(), Some(req.aspect_ratio().to_string()))
    }

    async fn edit(&self, req: &EditSlideRequest) -> NanoslidesResult<SlideResult> {
        self.respond(req.instruction(), req.style(), None)
    }

    fn engine_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-image"
    }
}

/// Mock planner returning a fixed plan.
#[derive(Debug, Clone)]
pub struct MockPlanner {
    plan: PresentationPlan,
    requests: Arc<Mutex<Vec<PlanRequest>>>,
    styles: Arc<Mutex<Vec<ResolvedStyle>>>,
}

#[allow(dead_code)]
impl MockPlanner {
    /// Planner returning one slide per title, with an inferred style.
    pub fn with_titles(titles: &[&str]) -> Self {
        let slides = titles
            .iter()
            .map(|title| PlannedSlide {
                title: title.to_string(),
                prompt: format!("Slide about {}", title.to_lowercase()),
            })
            .collect();
        Self {
            plan: PresentationPlan {
                deck_title: "Mock deck".to_string(),
                planning_summary: "A short deck".to_string(),
                inferred_style_base_prompt: "Clean flat illustration".to_string(),
                inferred_style_negative_prompt: "Photographs".to_string(),
                slides,
            },
            requests: Arc::new(Mutex::new(Vec::new())),
            styles: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests received.
    pub fn requests(&self) -> Vec<PlanRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Styles received.
    pub fn styles(&self) -> Vec<ResolvedStyle> {
        self.styles.lock().unwrap().clone()
    }
}

#[async_trait]
impl PresentationPlanner for MockPlanner {
    async fn plan(&self, req: &PlanRequest, style: &ResolvedStyle) -> NanoslidesResult<PlannedDeck> {
        self.requests.lock().unwrap().push(req.clone());
        self.styles.lock().unwrap().push(style.clone());
        Ok(PlannedDeck::new(self.plan.clone(), "mock-planner"))
    }
}
