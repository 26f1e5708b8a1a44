//! Conversion of decoded images into a dense grid of 8-bit RGBA pixels.

use std::fmt::Display;

use image::{DynamicImage, Rgba};

/// Maps the 16-bit channel range onto the 8-bit one: `65535 / 257 == 255`.
const EXTENDED_DIVISOR: u16 = 257;

/// One RGBA pixel with 8 bits per channel.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Truncates 16-bit channel values down to 8 bits.
    /// This is lossy: anything below 257 becomes 0.
    pub fn from_extended([r, g, b, a]: [u16; 4]) -> Self {
        let narrow = |v: u16| (v / EXTENDED_DIVISOR) as u8;
        Self::new(narrow(r), narrow(g), narrow(b), narrow(a))
    }

    pub fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Pixel> for Rgba<u8> {
    fn from(p: Pixel) -> Self {
        Rgba(p.channels())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionError {
    EmptySurface { width: u32, height: u32 },
}

impl Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::EmptySurface { width, height } => {
                write!(f, "cannot read pixels of an empty {width}x{height} image")
            }
        }
    }
}

impl std::error::Error for ExtractionError {}

/// Row-major grid of pixels. Every row has exactly `width` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Reads every pixel of `image` through its 16-bit RGBA representation.
    pub fn extract(image: &DynamicImage) -> Result<Self, ExtractionError> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(ExtractionError::EmptySurface { width, height });
        }
        let extended = image.to_rgba16();
        let pixels = extended
            .pixels()
            .map(|&Rgba(channels)| Pixel::from_extended(channels))
            .collect();

        Ok(Self {
            width: width as usize,
            height: height as usize,
            pixels,
        })
    }

    /// Builds a grid from rows of pixels, or `None` if the rows are jagged or empty.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Pixel {
        self.pixels[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[Pixel] {
        let start = row * self.width;
        &self.pixels[start..start + self.width]
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, RgbaImage};

    #[test]
    fn test_from_extended_truncates() {
        assert_eq!(
            Pixel::from_extended([513, 514, 65535, 256]),
            Pixel::new(1, 2, 255, 0)
        );
    }

    #[test]
    fn test_extract_rgba8_is_exact() {
        let image = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8, y as u8, 200, 255]));
        let grid = PixelGrid::extract(&DynamicImage::ImageRgba8(image)).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        // grid[y][x] holds the pixel at (x, y)
        assert_eq!(grid.get(1, 2), Pixel::new(2, 1, 200, 255));
        assert_eq!(grid.row(0)[1], Pixel::new(1, 0, 200, 255));
    }

    #[test]
    fn test_extract_rgba16_truncates() {
        let image: ImageBuffer<Rgba<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(2, 2, Rgba([513, 514, 65534, 65535]));
        let grid = PixelGrid::extract(&DynamicImage::ImageRgba16(image)).unwrap();
        for pixel in grid.pixels() {
            assert_eq!(*pixel, Pixel::new(1, 2, 254, 255));
        }
    }

    #[test]
    fn test_extract_adds_opaque_alpha_to_rgb() {
        let image = image::RgbImage::from_pixel(1, 1, image::Rgb([10, 20, 30]));
        let grid = PixelGrid::extract(&DynamicImage::ImageRgb8(image)).unwrap();
        assert_eq!(grid.get(0, 0), Pixel::new(10, 20, 30, 255));
    }

    #[test]
    fn test_extract_keeps_straight_alpha() {
        // color channels are not scaled by alpha on the way in
        let image = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 50, 128]));
        let grid = PixelGrid::extract(&DynamicImage::ImageRgba8(image)).unwrap();
        assert_eq!(grid.get(0, 0), Pixel::new(200, 100, 50, 128));
    }

    #[test]
    fn test_extract_empty_image_fails() {
        let image = DynamicImage::new_rgba8(0, 4);
        assert_eq!(
            PixelGrid::extract(&image),
            Err(ExtractionError::EmptySurface {
                width: 0,
                height: 4
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_jagged() {
        let p = Pixel::default();
        assert!(PixelGrid::from_rows(vec![vec![p, p], vec![p]]).is_none());
        assert!(PixelGrid::from_rows(vec![]).is_none());
        assert!(PixelGrid::from_rows(vec![vec![]]).is_none());
        let grid = PixelGrid::from_rows(vec![vec![p, p], vec![p, p]]).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
    }
}
