use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{imageops, Rgb, RgbImage};
use png::{BitDepth, ColorType, PixelDimensions, Unit};
use plotters::coord::Shift;
use plotters::prelude::{BitMapBackend, DrawingArea, IntoDrawingArea};

use crate::error::Result;
use crate::plot::style::{figure_px, in_to_px, DPI, PAD_IN};

const METERS_PER_INCH: f64 = 0.0254;

/// Background colour; anything else counts as content when cropping.
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Owned RGB pixel buffer that one figure is drawn into.
///
/// The buffer lives only as long as the rendering call that created it.
pub(crate) struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub(crate) fn new(size_in: (f64, f64)) -> Self {
        let (width, height) = figure_px(size_in);
        Canvas {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 3],
        }
    }

    pub(crate) fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whole-canvas drawing area. Drop it (after `present`) before saving.
    pub(crate) fn drawing_area(&mut self) -> DrawingArea<BitMapBackend<'_>, Shift> {
        BitMapBackend::with_buffer(&mut self.pixels, (self.width, self.height)).into_drawing_area()
    }

    /// Crops to the drawn content plus padding and writes a PNG to `path`.
    pub(crate) fn save_png(self, path: &Path) -> Result<()> {
        let (width, height) = (self.width, self.height);
        let image = RgbImage::from_raw(width, height, self.pixels).ok_or_else(|| {
            image::ImageError::Parameter(image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            ))
        })?;
        let image = tight_crop(&image, in_to_px(PAD_IN));

        let mut writer = BufWriter::new(File::create(path)?);
        {
            let mut encoder = png::Encoder::new(&mut writer, image.width(), image.height());
            encoder.set_color(ColorType::Rgb);
            encoder.set_depth(BitDepth::Eight);
            encoder.set_pixel_dims(Some(pixel_dims()));
            let mut png_writer = encoder.write_header()?;
            png_writer.write_image_data(image.as_raw())?;
            png_writer.finish()?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// `pHYs` chunk contents recording the output resolution.
pub(crate) fn pixel_dims() -> PixelDimensions {
    let ppm = (DPI as f64 / METERS_PER_INCH).round() as u32;
    PixelDimensions { xppu: ppm, yppu: ppm, unit: Unit::Meter }
}

/// Smallest rectangle `(x, y, width, height)` holding every non-background
/// pixel, or `None` for a blank image.
pub(crate) fn content_bounds(image: &RgbImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in image.enumerate_pixels() {
        if *pixel == BACKGROUND {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Crops to the content bounds grown by `pad` pixels on each side, clamped to
/// the image. Blank images are returned unchanged.
pub(crate) fn tight_crop(image: &RgbImage, pad: u32) -> RgbImage {
    let Some((x, y, w, h)) = content_bounds(image) else {
        return image.clone();
    };
    let x0 = x.saturating_sub(pad);
    let y0 = y.saturating_sub(pad);
    let x1 = (x + w + pad).min(image.width());
    let y1 = (y + h + pad).min(image.height());
    imageops::crop_imm(image, x0, y0, x1 - x0, y1 - y0).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, BACKGROUND)
    }

    #[test]
    fn bounds_cover_all_marked_pixels() {
        let mut image = blank(50, 40);
        image.put_pixel(10, 5, Rgb([0, 0, 0]));
        image.put_pixel(30, 20, Rgb([0, 0, 255]));
        assert_eq!(content_bounds(&image), Some((10, 5, 21, 16)));
        assert_eq!(content_bounds(&blank(4, 4)), None);
    }

    #[test]
    fn crop_pads_and_clamps() {
        let mut image = blank(50, 40);
        image.put_pixel(2, 20, Rgb([0, 0, 0]));
        image.put_pixel(20, 25, Rgb([0, 0, 0]));

        let cropped = tight_crop(&image, 5);
        // Left edge clamps at 0, right edge gets the full pad.
        assert_eq!(cropped.dimensions(), (26, 16));
        assert_eq!(*cropped.get_pixel(2, 5), Rgb([0, 0, 0]));
    }

    #[test]
    fn blank_image_is_not_cropped() {
        assert_eq!(tight_crop(&blank(8, 6), 2).dimensions(), (8, 6));
    }

    #[test]
    fn pixel_dims_encode_300_dpi_in_meters() {
        let dims = pixel_dims();
        assert_eq!((dims.xppu, dims.yppu), (11811, 11811));
        assert_eq!(dims.unit, Unit::Meter);
    }

    #[test]
    fn saved_png_carries_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("canvas.png");
        let mut canvas = Canvas::new((0.5, 0.5));
        {
            let root = canvas.drawing_area();
            root.fill(&plotters::prelude::BLUE).unwrap();
            root.present().unwrap();
        }
        canvas.save_png(&path).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        let dims = reader.info().pixel_dims.expect("pHYs chunk");
        assert_eq!((dims.xppu, dims.yppu, dims.unit), (11811, 11811, Unit::Meter));
        assert_eq!(reader.info().width, 150);
    }

    #[test]
    fn canvas_matches_figure_size() {
        let canvas = Canvas::new((1.0, 0.5));
        assert_eq!(canvas.size(), (300, 150));
    }
}
