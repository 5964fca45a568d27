//! Prompt assembly for image generation and deck planning.

use nanoslides_core::{PlanRequest, ResolvedStyle};

const EDIT_GUARD: &str = "Do not modify anything else except what is specified by the user.";

/// Whether a prompt is for a fresh slide or an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    /// Generate from scratch
    Generate,
    /// Edit an existing image
    Edit,
}

/// Combine a user prompt with the effective style.
///
/// Sections, in order and separated by blank lines: style base prompt, the
/// prompt, a note about attached reference images, reference comments, the
/// negative prompt, the global preset id and, for edits, a guard against
/// unrequested changes. Empty sections are skipped.
///
/// # Examples
///
/// ```
/// use nanoslides_core::ResolvedStyle;
/// use nanoslides_models::{PromptMode, build_slide_prompt};
///
/// let style = ResolvedStyle {
///     base_prompt: "Flat pastel".to_string(),
///     negative_prompt: "photos".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(
///     build_slide_prompt("Team intro", &style, PromptMode::Generate),
///     "Flat pastel\n\nTeam intro\n\nAvoid:\nphotos"
/// );
/// ```
pub fn build_slide_prompt(prompt: &str, style: &ResolvedStyle, mode: PromptMode) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push(style.base_prompt.clone());
    sections.push(prompt.to_string());
    if !style.reference_images.is_empty() {
        sections.push(format!(
            "{} style reference image(s) are attached. \
             Use them only as visual style guidance for palette, tone, and texture.",
            style.reference_images.len()
        ));
    }
    if !style.reference_comments.is_empty() {
        let comments = style
            .reference_comments
            .iter()
            .map(|comment| format!("- {}", comment))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("Style references:\n{}", comments));
    }
    if !style.negative_prompt.is_empty() {
        sections.push(format!("Avoid:\n{}", style.negative_prompt));
    }
    if let Some(style_id) = &style.style_id {
        sections.push(format!("Apply global style preset: {}", style_id));
    }
    if mode == PromptMode::Edit {
        sections.push(EDIT_GUARD.to_string());
    }

    sections
        .into_iter()
        .filter(|section| !section.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Instructions sent to the planning model.
///
/// `style` is the context the caller already has. When it is empty the
/// planner is asked to infer a reusable style.
pub fn build_planner_prompt(request: &PlanRequest, style: &ResolvedStyle) -> String {
    let style_context = if style.has_context() {
        format!(
            "style_id={}\nbase_prompt={}\nnegative_prompt={}\nreference_comments={:?}\nreference_images_count={}",
            style.style_id.as_deref().unwrap_or("project/default"),
            or_placeholder(&style.base_prompt, "(empty)"),
            or_placeholder(&style.negative_prompt, "(empty)"),
            style.reference_comments,
            style.reference_images.len()
        )
    } else {
        "none".to_string()
    };

    let duration = request
        .duration_minutes()
        .map(|minutes| minutes.to_string())
        .unwrap_or_else(|| "not specified".to_string());
    let slide_count = request
        .slide_count()
        .map(|count| count.to_string())
        .unwrap_or_else(|| "choose sensible count".to_string());

    let mut prompt = format!(
        "You are orchestrating an entire slide deck for nanoslides.\n\
         Return strict JSON that matches the provided schema.\n\
         For each planned slide, produce a strong standalone image prompt suitable for \
         a single `nanoslides generate` call.\n\
         Deck prompt: {}\n\
         Audience: {}\n\
         Use case: {}\n\
         Duration minutes: {}\n\
         Requested slide count: {}\n\
         Detail level: {}\n\
         Illustration level: {}\n\
         Language: {}\n\
         Reference files count: {}\n\
         Existing style context:\n{}\n\
         Rules:\n\
         1) Keep slide sequence coherent and presentation-ready.\n\
         2) Each slide.prompt must describe visual content + text intent for the slide.\n\
         3) If existing style context is present, do not infer a new style and keep \
         inferred_style_base_prompt and inferred_style_negative_prompt empty strings.\n\
         4) If no style context is present, infer a reusable style by filling \
         inferred_style_base_prompt and optionally inferred_style_negative_prompt.\n\
         5) If requested slide count is specified, return exactly that many slides.\n\
         Respond with a JSON object with keys deck_title, planning_summary, \
         inferred_style_base_prompt, inferred_style_negative_prompt and slides, \
         where slides is a list of objects with keys title and prompt.\n",
        request.prompt(),
        request.audience().as_deref().unwrap_or("general"),
        request.use_case().as_deref().unwrap_or("general presentation"),
        duration,
        slide_count,
        request.detail_level(),
        request.illustration_level(),
        request.language(),
        request.reference_file_count(),
        style_context,
    );

    if !request.reference_context().is_empty() {
        prompt.push_str("\n\n");
        prompt.push_str(request.reference_context());
    }
    prompt
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanoslides_core::Level;
    use std::path::PathBuf;

    #[test]
    fn test_plain_prompt_passes_through() {
        let prompt = build_slide_prompt("Just this", &ResolvedStyle::default(), PromptMode::Generate);
        assert_eq!(prompt, "Just this");
    }

    #[test]
    fn test_full_edit_prompt_order() {
        let style = ResolvedStyle {
            style_id: Some("noir".to_string()),
            base_prompt: "Base".to_string(),
            negative_prompt: "Neg".to_string(),
            reference_images: vec![PathBuf::from("/a.png"), PathBuf::from("/b.png")],
            reference_comments: vec!["Grainy".to_string(), "Moody".to_string()],
        };
        let prompt = build_slide_prompt("Make the title red", &style, PromptMode::Edit);
        assert_eq!(
            prompt,
            "Base\n\nMake the title red\n\n\
             2 style reference image(s) are attached. Use them only as visual style guidance for palette, tone, and texture.\n\n\
             Style references:\n- Grainy\n- Moody\n\n\
             Avoid:\nNeg\n\n\
             Apply global style preset: noir\n\n\
             Do not modify anything else except what is specified by the user."
        );
    }

    #[test]
    fn test_planner_prompt_defaults() {
        let request = PlanRequest::builder()
            .prompt("Launch our product")
            .build()
            .unwrap();
        let prompt = build_planner_prompt(&request, &ResolvedStyle::default());
        assert!(prompt.contains("Deck prompt: Launch our product\n"));
        assert!(prompt.contains("Audience: general\n"));
        assert!(prompt.contains("Use case: general presentation\n"));
        assert!(prompt.contains("Duration minutes: not specified\n"));
        assert!(prompt.contains("Requested slide count: choose sensible count\n"));
        assert!(prompt.contains("Detail level: medium\n"));
        assert!(prompt.contains("Language: en\n"));
        assert!(prompt.contains("Existing style context:\nnone\n"));
    }

    #[test]
    fn test_planner_prompt_with_style_and_references() {
        let request = PlanRequest::builder()
            .prompt("Quarterly review")
            .slide_count(5usize)
            .detail_level(Level::High)
            .reference_file_count(1usize)
            .reference_context("Use the following reference files...")
            .build()
            .unwrap();
        let style = ResolvedStyle {
            base_prompt: "Corporate blue".to_string(),
            ..Default::default()
        };
        let prompt = build_planner_prompt(&request, &style);
        assert!(prompt.contains("Requested slide count: 5\n"));
        assert!(prompt.contains("Detail level: high\n"));
        assert!(prompt.contains(
            "style_id=project/default\nbase_prompt=Corporate blue\nnegative_prompt=(empty)\n\
             reference_comments=[]\nreference_images_count=0"
        ));
        assert!(prompt.ends_with("\n\nUse the following reference files..."));
    }
}
