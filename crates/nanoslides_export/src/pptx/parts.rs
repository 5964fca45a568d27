//! Office Open XML parts of a picture-only presentation.
//!
//! The package holds one master, one blank layout and one theme; every
//! slide references the blank layout and carries a single picture.

use super::layout::{PictureFrame, SlideSize};
use nanoslides_error::{ExportError, ExportErrorKind};
use std::fmt::Write as _;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";

/// First slide id allowed in `p:sldIdLst`.
const FIRST_SLIDE_ID: usize = 256;
/// Presentation relationships before the first slide (master, theme).
const FIXED_PRESENTATION_RELS: usize = 2;

/// Picture media as stored in the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MediaKind {
    Png,
    Jpeg,
    Webp,
}

impl MediaKind {
    pub(crate) fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => MediaKind::Jpeg,
            "webp" => MediaKind::Webp,
            _ => MediaKind::Png,
        }
    }

    pub(crate) fn extension(&self) -> &'static str {
        match self {
            MediaKind::Png => "png",
            MediaKind::Jpeg => "jpeg",
            MediaKind::Webp => "webp",
        }
    }

    fn content_type(&self) -> &'static str {
        match self {
            MediaKind::Png => "image/png",
            MediaKind::Jpeg => "image/jpeg",
            MediaKind::Webp => "image/webp",
        }
    }
}

const ALL_MEDIA: [MediaKind; 3] = [MediaKind::Png, MediaKind::Jpeg, MediaKind::Webp];

#[track_caller]
fn xml_error(e: std::fmt::Error) -> ExportError {
    ExportError::new(ExportErrorKind::Write(format!("XML formatting failed: {}", e)))
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub(crate) fn content_types_xml(slide_count: usize) -> Result<String, ExportError> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    write!(
        xml,
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#
    )
    .map_err(xml_error)?;
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    for media in ALL_MEDIA {
        write!(
            xml,
            r#"<Default Extension="{}" ContentType="{}"/>"#,
            media.extension(),
            media.content_type()
        )
        .map_err(xml_error)?;
    }
    write!(
        xml,
        r#"<Override PartName="/ppt/presentation.xml" ContentType="{}"/>"#,
        CT_PRESENTATION
    )
    .map_err(xml_error)?;
    write!(
        xml,
        r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="{}"/>"#,
        CT_SLIDE_MASTER
    )
    .map_err(xml_error)?;
    write!(
        xml,
        r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="{}"/>"#,
        CT_SLIDE_LAYOUT
    )
    .map_err(xml_error)?;
    write!(
        xml,
        r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="{}"/>"#,
        CT_THEME
    )
    .map_err(xml_error)?;
    for number in 1..=slide_count {
        write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="{}"/>"#,
            number, CT_SLIDE
        )
        .map_err(xml_error)?;
    }
    xml.push_str("</Types>");
    Ok(xml)
}

pub(crate) fn root_rels_xml() -> String {
    format!(
        r#"{}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="ppt/presentation.xml"/></Relationships>"#,
        XML_DECL, NS_RELS, REL_OFFICE_DOCUMENT
    )
}

pub(crate) fn presentation_xml(slide_count: usize, size: SlideSize) -> Result<String, ExportError> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        NS_A, NS_R, NS_P
    )
    .map_err(xml_error)?;
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    xml.push_str("<p:sldIdLst>");
    for index in 0..slide_count {
        write!(
            xml,
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            FIRST_SLIDE_ID + index,
            FIXED_PRESENTATION_RELS + index + 1
        )
        .map_err(xml_error)?;
    }
    xml.push_str("</p:sldIdLst>");
    write!(xml, r#"<p:sldSz cx="{}" cy="{}"/>"#, size.cx, size.cy).map_err(xml_error)?;
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    Ok(xml)
}

pub(crate) fn presentation_rels_xml(slide_count: usize) -> Result<String, ExportError> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    write!(xml, r#"<Relationships xmlns="{}">"#, NS_RELS).map_err(xml_error)?;
    write!(
        xml,
        r#"<Relationship Id="rId1" Type="{}" Target="slideMasters/slideMaster1.xml"/>"#,
        REL_SLIDE_MASTER
    )
    .map_err(xml_error)?;
    write!(
        xml,
        r#"<Relationship Id="rId2" Type="{}" Target="theme/theme1.xml"/>"#,
        REL_THEME
    )
    .map_err(xml_error)?;
    for index in 0..slide_count {
        write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{}" Target="slides/slide{}.xml"/>"#,
            FIXED_PRESENTATION_RELS + index + 1,
            REL_SLIDE,
            index + 1
        )
        .map_err(xml_error)?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

fn empty_sp_tree() -> &'static str {
    r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr></p:spTree>"#
}

pub(crate) fn slide_master_xml() -> String {
    format!(
        concat!(
            r#"{}<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
            r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>{}</p:cSld>"#,
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            r#"</p:sldMaster>"#
        ),
        XML_DECL,
        NS_A,
        NS_R,
        NS_P,
        empty_sp_tree()
    )
}

pub(crate) fn slide_master_rels_xml() -> String {
    format!(
        r#"{}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="{}" Target="../theme/theme1.xml"/></Relationships>"#,
        XML_DECL, NS_RELS, REL_SLIDE_LAYOUT, REL_THEME
    )
}

pub(crate) fn slide_layout_xml() -> String {
    format!(
        r#"{}<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="blank" preserve="1"><p:cSld name="Blank">{}</p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        XML_DECL,
        NS_A,
        NS_R,
        NS_P,
        empty_sp_tree()
    )
}

pub(crate) fn slide_layout_rels_xml() -> String {
    format!(
        r#"{}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#,
        XML_DECL, NS_RELS, REL_SLIDE_MASTER
    )
}

pub(crate) fn theme_xml() -> String {
    let colors = [
        ("dk1", r#"<a:sysClr val="windowText" lastClr="000000"/>"#),
        ("lt1", r#"<a:sysClr val="window" lastClr="FFFFFF"/>"#),
        ("dk2", r#"<a:srgbClr val="44546A"/>"#),
        ("lt2", r#"<a:srgbClr val="E7E6E6"/>"#),
        ("accent1", r#"<a:srgbClr val="4472C4"/>"#),
        ("accent2", r#"<a:srgbClr val="ED7D31"/>"#),
        ("accent3", r#"<a:srgbClr val="A5A5A5"/>"#),
        ("accent4", r#"<a:srgbClr val="FFC000"/>"#),
        ("accent5", r#"<a:srgbClr val="5B9BD5"/>"#),
        ("accent6", r#"<a:srgbClr val="70AD47"/>"#),
        ("hlink", r#"<a:srgbClr val="0563C1"/>"#),
        ("folHlink", r#"<a:srgbClr val="954F72"/>"#),
    ];
    let scheme: String = colors
        .iter()
        .map(|(name, color)| format!("<a:{name}>{color}</a:{name}>"))
        .collect();

    let solid = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    let line = r#"<a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#;
    let effect = "<a:effectStyle><a:effectLst/></a:effectStyle>";

    format!(
        concat!(
            r#"{decl}<a:theme xmlns:a="{ns_a}" name="nanoslides">"#,
            r#"<a:themeElements>"#,
            r#"<a:clrScheme name="nanoslides">{scheme}</a:clrScheme>"#,
            r#"<a:fontScheme name="nanoslides">"#,
            r#"<a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
            r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
            r#"</a:fontScheme>"#,
            r#"<a:fmtScheme name="nanoslides">"#,
            r#"<a:fillStyleLst>{solid}{solid}{solid}</a:fillStyleLst>"#,
            r#"<a:lnStyleLst>{line}{line}{line}</a:lnStyleLst>"#,
            r#"<a:effectStyleLst>{effect}{effect}{effect}</a:effectStyleLst>"#,
            r#"<a:bgFillStyleLst>{solid}{solid}{solid}</a:bgFillStyleLst>"#,
            r#"</a:fmtScheme>"#,
            r#"</a:themeElements>"#,
            r#"</a:theme>"#
        ),
        decl = XML_DECL,
        ns_a = NS_A,
        scheme = scheme,
        solid = solid,
        line = line,
        effect = effect,
    )
}

/// A slide holding one picture that references `rId2`.
pub(crate) fn slide_xml(number: usize, name: &str, frame: PictureFrame) -> Result<String, ExportError> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"><p:cSld><p:spTree>"#,
        NS_A, NS_R, NS_P
    )
    .map_err(xml_error)?;
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
    xml.push_str(r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#);

    xml.push_str("<p:pic><p:nvPicPr>");
    write!(
        xml,
        r#"<p:cNvPr id="2" name="Slide {} Image" descr="{}"/>"#,
        number,
        escape_attr(name)
    )
    .map_err(xml_error)?;
    xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#);
    xml.push_str(r#"<p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#);
    xml.push_str("<p:spPr><a:xfrm>");
    write!(xml, r#"<a:off x="{}" y="{}"/>"#, frame.x, frame.y).map_err(xml_error)?;
    write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, frame.cx, frame.cy).map_err(xml_error)?;
    xml.push_str(r#"</a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#);

    xml.push_str("</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
    Ok(xml)
}

pub(crate) fn slide_rels_xml(media_name: &str) -> String {
    format!(
        r#"{}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="{}" Target="../media/{}"/></Relationships>"#,
        XML_DECL, NS_RELS, REL_SLIDE_LAYOUT, REL_IMAGE, media_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_ids_line_up_with_rels() {
        let xml = presentation_xml(2, SlideSize::default()).unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId3"/><p:sldId id="257" r:id="rId4"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="12192000" cy="6858000"/>"#));

        let rels = presentation_rels_xml(2).unwrap();
        assert!(rels.contains(r#"Id="rId3""#) && rels.contains("Target=\"slides/slide1.xml\""));
        assert!(rels.contains(r#"Id="rId4""#) && rels.contains("Target=\"slides/slide2.xml\""));
    }

    #[test]
    fn test_slide_name_is_escaped() {
        let frame = PictureFrame { x: 0, y: 0, cx: 10, cy: 10 };
        let xml = slide_xml(1, "a<b>&\"c\".png", frame).unwrap();
        assert!(xml.contains(r#"descr="a&lt;b&gt;&amp;&quot;c&quot;.png""#));
    }

    #[test]
    fn test_media_kind_normalizes_jpg() {
        assert_eq!(MediaKind::from_extension("JPG").extension(), "jpeg");
        assert_eq!(MediaKind::from_extension("webp"), MediaKind::Webp);
    }
}
