use image::{Rgb, RgbImage};
use nanoslides_export::{
    DEFAULT_SLIDE_HEIGHT_EMU, DEFAULT_SLIDE_WIDTH_EMU, DeckFormat, EMU_PER_PIXEL, PptxExporter,
    exporter_for, list_slide_images,
};
use nanoslides_interface::DeckExporter;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::TempDir;
use zip::ZipArchive;

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([20, 40, 200])).save(&path)?;
    Ok(path)
}

fn read_part(archive: &mut ZipArchive<File>, name: &str) -> anyhow::Result<String> {
    let mut text = String::new();
    archive.by_name(name)?.read_to_string(&mut text)?;
    Ok(text)
}

#[test]
fn test_uniform_images_use_their_own_size() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let slides = dir.path().join("slides");
    std::fs::create_dir(&slides)?;
    write_png(&slides, "1_a.png", 160, 90)?;
    write_png(&slides, "2_b.png", 320, 180)?;

    let images = list_slide_images(&slides)?;
    let output = dir.path().join("out/deck.pptx");
    let written = PptxExporter::new().export(&images, &output)?;
    assert_eq!(written, output);

    let mut archive = ZipArchive::new(File::open(&output)?)?;
    let presentation = read_part(&mut archive, "ppt/presentation.xml")?;
    assert!(presentation.contains(&format!(
        r#"<p:sldSz cx="{}" cy="{}"/>"#,
        160 * EMU_PER_PIXEL,
        90 * EMU_PER_PIXEL
    )));
    assert!(presentation.contains(r#"<p:sldId id="257" r:id="rId4"/>"#));

    let slide1 = read_part(&mut archive, "ppt/slides/slide1.xml")?;
    assert!(slide1.contains(r#"<a:off x="0" y="0"/>"#));
    assert!(slide1.contains(r#"r:embed="rId2""#));
    assert!(slide1.contains(r#"descr="1_a.png""#));

    let rels = read_part(&mut archive, "ppt/slides/_rels/slide2.xml.rels")?;
    assert!(rels.contains("../media/image2.png"));
    assert!(archive.by_name("ppt/media/image1.png").is_ok());
    assert!(archive.by_name("ppt/theme/theme1.xml").is_ok());
    assert!(archive.by_name("[Content_Types].xml").is_ok());
    Ok(())
}

#[test]
fn test_mixed_aspect_uses_widescreen_and_centers() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let wide = write_png(dir.path(), "1.png", 160, 90)?;
    let square = write_png(dir.path(), "2.png", 100, 100)?;
    let output = dir.path().join("deck.pptx");

    PptxExporter::new().export(&[wide, square], &output)?;

    let mut archive = ZipArchive::new(File::open(&output)?)?;
    let presentation = read_part(&mut archive, "ppt/presentation.xml")?;
    assert!(presentation.contains(&format!(
        r#"<p:sldSz cx="{}" cy="{}"/>"#,
        DEFAULT_SLIDE_WIDTH_EMU, DEFAULT_SLIDE_HEIGHT_EMU
    )));

    let slide2 = read_part(&mut archive, "ppt/slides/slide2.xml")?;
    let x = (DEFAULT_SLIDE_WIDTH_EMU - DEFAULT_SLIDE_HEIGHT_EMU) / 2;
    assert!(slide2.contains(&format!(r#"<a:off x="{}" y="0"/>"#, x)));
    Ok(())
}

#[test]
fn test_unreadable_image_fails() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let bogus = dir.path().join("1.png");
    std::fs::write(&bogus, b"not an image")?;

    let err = PptxExporter::new()
        .export(&[bogus], &dir.path().join("deck.pptx"))
        .unwrap_err();
    assert!(err.to_string().contains("Unable to read image dimensions"));
    assert!(!dir.path().join("deck.pptx").exists());
    Ok(())
}

#[test]
fn test_empty_image_list_is_rejected() {
    let err = PptxExporter::new()
        .export(&[], Path::new("deck.pptx"))
        .unwrap_err();
    assert!(err.to_string().contains("No slide images found"));
}

#[test]
fn test_format_lookup() -> anyhow::Result<()> {
    let format = DeckFormat::from_str("PPTX")?;
    assert_eq!(format, DeckFormat::Pptx);
    assert_eq!(exporter_for(format).extension(), "pptx");
    Ok(())
}
