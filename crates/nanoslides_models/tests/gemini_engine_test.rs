use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use mockito::Matcher;
use nanoslides_core::{AspectRatio, EditSlideRequest, GenerateSlideRequest, ResolvedStyle};
use nanoslides_error::{GeminiErrorKind, NanoslidesErrorKind};
use nanoslides_interface::SlideEngine;
use nanoslides_models::{GeminiClient, ImageModel, NanoBananaEngine};
use serde_json::json;

const FAKE_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn image_response(mime: &str, text: Option<&str>) -> String {
    let mut parts = Vec::new();
    if let Some(text) = text {
        parts.push(json!({ "text": text }));
    }
    parts.push(json!({ "inlineData": { "mimeType": mime, "data": STANDARD.encode(FAKE_PNG) } }));
    json!({ "candidates": [ { "content": { "role": "model", "parts": parts } } ] }).to_string()
}

fn engine_for(server: &mockito::ServerGuard, model: ImageModel) -> NanoBananaEngine {
    let client = GeminiClient::new("test-key")
        .unwrap()
        .with_base_url(format!("{}/v1beta", server.url()));
    NanoBananaEngine::new(client, model)
}

#[tokio::test]
async fn generate_decodes_image_and_records_metadata() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash-image:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "contents": [ { "parts": [ { "text": "Flat pastel\n\nTeam intro" } ] } ],
            "generationConfig": {
                "responseModalities": ["TEXT", "IMAGE"],
                "imageConfig": { "aspectRatio": "4:3" }
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(image_response("image/jpeg", Some("Here is your slide")))
        .create_async()
        .await;

    let engine = engine_for(&server, ImageModel::Flash);
    let style = ResolvedStyle {
        base_prompt: "Flat pastel".to_string(),
        ..Default::default()
    };
    let request = GenerateSlideRequest::new("Team intro", style, AspectRatio::Standard);
    let result = engine.generate(&request).await?;

    mock.assert_async().await;
    assert_eq!(result.image_bytes().as_slice(), FAKE_PNG);
    assert_eq!(result.mime_type(), "image/jpeg");
    assert_eq!(result.extension(), "jpg");
    assert_eq!(result.revised_prompt(), "Flat pastel\n\nTeam intro");

    let metadata = result.metadata();
    assert_eq!(metadata.engine.as_deref(), Some("nanobanana"));
    assert_eq!(metadata.model_selector.as_deref(), Some("flash"));
    assert_eq!(metadata.model.as_deref(), Some("gemini-2.5-flash-image"));
    assert_eq!(metadata.aspect_ratio.as_deref(), Some("4:3"));
    assert_eq!(metadata.response_text.as_deref(), Some("Here is your slide"));
    Ok(())
}

#[tokio::test]
async fn edit_sends_source_image_and_guard() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let source = vec![1u8, 2, 3];
    let mock = server
        .mock("POST", "/v1beta/models/gemini-3-pro-image-preview:generateContent")
        .match_body(Matcher::PartialJson(json!({
            "contents": [ { "parts": [
                { "text": "Make the title red\n\nDo not modify anything else except what is specified by the user." },
                { "inlineData": { "mimeType": "image/png", "data": STANDARD.encode(&source) } }
            ] } ]
        })))
        .with_status(200)
        .with_body(image_response("image/png", None))
        .create_async()
        .await;

    let engine = engine_for(&server, ImageModel::Pro);
    let request = EditSlideRequest::new(source, "Make the title red", ResolvedStyle::default())?;
    let result = engine.edit(&request).await?;

    mock.assert_async().await;
    assert_eq!(result.metadata().model_selector.as_deref(), Some("pro"));
    assert!(result.metadata().aspect_ratio.is_none());
    assert!(result.metadata().response_text.is_none());
    Ok(())
}

#[tokio::test]
async fn reference_images_are_attached() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let reference = dir.path().join("palette.webp");
    std::fs::write(&reference, b"webp-bytes")?;

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash-image:generateContent")
        .match_body(Matcher::PartialJson(json!({
            "contents": [ { "parts": [
                { "text": "Team intro\n\n1 style reference image(s) are attached. Use them only as visual style guidance for palette, tone, and texture." },
                { "inlineData": { "mimeType": "image/webp", "data": STANDARD.encode(b"webp-bytes") } }
            ] } ]
        })))
        .with_status(200)
        .with_body(image_response("image/png", None))
        .create_async()
        .await;

    let style = ResolvedStyle {
        reference_images: vec![reference],
        ..Default::default()
    };
    let engine = engine_for(&server, ImageModel::Flash);
    engine
        .generate(&GenerateSlideRequest::new("Team intro", style, AspectRatio::default()))
        .await?;
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn missing_reference_image_fails_before_request() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let style = ResolvedStyle {
        reference_images: vec!["/no/such/reference.png".into()],
        ..Default::default()
    };
    let engine = engine_for(&server, ImageModel::Flash);
    let err = engine
        .generate(&GenerateSlideRequest::new("Intro", style, AspectRatio::default()))
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), NanoslidesErrorKind::Storage(e) if e.is_not_found()));
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn response_without_image_is_an_error() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-2.5-flash-image:generateContent")
        .with_status(200)
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"I cannot draw that"}]}}]}"#)
        .create_async()
        .await;

    let engine = engine_for(&server, ImageModel::Flash);
    let err = engine
        .generate(&GenerateSlideRequest::new("Intro", ResolvedStyle::default(), AspectRatio::default()))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        NanoslidesErrorKind::Gemini(e) if e.kind == GeminiErrorKind::NoImage
    ));
    Ok(())
}

#[tokio::test]
async fn http_errors_carry_status_and_message() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1beta/models/gemini-2.5-flash-image:generateContent")
        .with_status(429)
        .with_body(r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#)
        .create_async()
        .await;

    let engine = engine_for(&server, ImageModel::Flash);
    let err = engine
        .generate(&GenerateSlideRequest::new("Intro", ResolvedStyle::default(), AspectRatio::default()))
        .await
        .unwrap_err();

    match err.kind() {
        NanoslidesErrorKind::Gemini(e) => {
            assert_eq!(e.kind.status_code(), Some(429));
            assert!(e.kind.to_string().contains("RESOURCE_EXHAUSTED: Quota exceeded"));
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}
