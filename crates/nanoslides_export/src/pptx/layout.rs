//! Slide size and picture placement in English Metric Units.

/// EMU per pixel at 96 DPI.
pub const EMU_PER_PIXEL: i64 = 9525;
/// Width of a 16:9 widescreen slide.
pub const DEFAULT_SLIDE_WIDTH_EMU: i64 = 12_192_000;
/// Height of a 16:9 widescreen slide.
pub const DEFAULT_SLIDE_HEIGHT_EMU: i64 = 6_858_000;

const ASPECT_TOLERANCE: f64 = 0.05;

/// Slide dimensions in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSize {
    /// Width
    pub cx: i64,
    /// Height
    pub cy: i64,
}

impl Default for SlideSize {
    fn default() -> Self {
        Self {
            cx: DEFAULT_SLIDE_WIDTH_EMU,
            cy: DEFAULT_SLIDE_HEIGHT_EMU,
        }
    }
}

/// Position and extent of a picture on a slide, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PictureFrame {
    /// Left offset
    pub x: i64,
    /// Top offset
    pub y: i64,
    /// Width
    pub cx: i64,
    /// Height
    pub cy: i64,
}

/// Pick the slide size for images of the given pixel dimensions.
///
/// When every image shares the first image's aspect ratio within 5%, the
/// slide takes the first image's size. Otherwise the 16:9 default is used.
///
/// # Examples
///
/// ```
/// use nanoslides_export::{SlideSize, slide_size_for};
///
/// let size = slide_size_for(&[(1920, 1080), (1280, 720)]);
/// assert_eq!(size, SlideSize { cx: 1920 * 9525, cy: 1080 * 9525 });
/// assert_eq!(slide_size_for(&[(1920, 1080), (1000, 1000)]), SlideSize::default());
/// ```
pub fn slide_size_for(dimensions: &[(u32, u32)]) -> SlideSize {
    let Some(&(width, height)) = dimensions.first() else {
        return SlideSize::default();
    };
    if width == 0 || height == 0 {
        return SlideSize::default();
    }

    let first = aspect(width, height);
    let uniform = dimensions.iter().all(|&(w, h)| {
        h != 0 && ((aspect(w, h) / first) - 1.0).abs() <= ASPECT_TOLERANCE
    });

    if uniform {
        SlideSize {
            cx: i64::from(width) * EMU_PER_PIXEL,
            cy: i64::from(height) * EMU_PER_PIXEL,
        }
    } else {
        SlideSize::default()
    }
}

/// Scale an image to fit inside the slide, keeping its aspect ratio, and
/// center it.
pub fn fit_picture(slide: SlideSize, width: u32, height: u32) -> PictureFrame {
    if width == 0 || height == 0 {
        return PictureFrame {
            x: 0,
            y: 0,
            cx: slide.cx,
            cy: slide.cy,
        };
    }

    let image_cx = f64::from(width) * EMU_PER_PIXEL as f64;
    let image_cy = f64::from(height) * EMU_PER_PIXEL as f64;
    let scale = (slide.cx as f64 / image_cx).min(slide.cy as f64 / image_cy);

    let cx = ((image_cx * scale).round() as i64).min(slide.cx);
    let cy = ((image_cy * scale).round() as i64).min(slide.cy);
    PictureFrame {
        x: (slide.cx - cx) / 2,
        y: (slide.cy - cy) / 2,
        cx,
        cy,
    }
}

fn aspect(width: u32, height: u32) -> f64 {
    f64::from(width) / f64::from(height)
}
