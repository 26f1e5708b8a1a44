//! Iterative mean (box) blur.
//!
//! Every pass reads the whole image into a [`PixelGrid`], then computes each output
//! pixel independently as the average of a square window of input pixels.
//! Windows are clamped to the image, so pixels near the edges average fewer samples
//! instead of being darkened by padding.

use std::ops::Range;

use image::{DynamicImage, RgbaImage};
use rayon::iter::ParallelIterator;

use crate::{
    arg_parsers::{BlurConfig, KernelSize},
    error::BlurError,
    image::Image,
    pixel::{ExtractionError, Pixel, PixelGrid},
};

/// The rows and columns averaged for one output pixel.
///
/// The window starts `kernel / 2 + 1` cells before the target and spans `kernel - 1` cells,
/// so it trails the target pixel rather than being centered on it. Outputs depend on this
/// exact placement, so it must not be "fixed" into a centered window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl Window {
    pub fn new(row: usize, col: usize, kernel: KernelSize, height: usize, width: usize) -> Self {
        Self {
            rows: clamped_span(row, kernel.get(), height),
            cols: clamped_span(col, kernel.get(), width),
        }
    }

    /// Number of pixels in the window
    pub fn len(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn clamped_span(center: usize, kernel: usize, limit: usize) -> Range<usize> {
    let start = center.saturating_sub(kernel / 2 + 1).min(limit);
    let end = start.saturating_add(kernel - 1).min(limit);
    start..end
}

impl PixelGrid {
    /// Per-channel mean over the window for (row, col), truncated towards zero.
    ///
    /// An empty window (always the case for a 1x1 kernel) leaves the pixel as it was.
    pub fn window_mean(&self, row: usize, col: usize, kernel: KernelSize) -> Pixel {
        let window = Window::new(row, col, kernel, self.height(), self.width());
        if window.is_empty() {
            return self.get(row, col);
        }

        let mut sum = [0u64; 4];
        for r in window.rows.clone() {
            for pixel in &self.row(r)[window.cols.clone()] {
                for (acc, channel) in sum.iter_mut().zip(pixel.channels()) {
                    *acc += u64::from(channel);
                }
            }
        }

        let count = window.len() as u64;
        let [r, g, b, a] = sum.map(|total| (total / count).min(u64::from(u8::MAX)) as u8);
        Pixel::new(r, g, b, a)
    }
}

/// Runs a single pass over `grid`, writing every mean into a freshly allocated image.
///
/// Each pixel is its own unit of work on the rayon pool. Units only read `grid`
/// and each owns exactly one output pixel, so no locking is needed;
/// the call returns once every pixel has been written.
pub fn blur_pass(grid: &PixelGrid, kernel: KernelSize) -> RgbaImage {
    // grid dimensions come from a u32-sized image, so they always fit back
    let mut target = RgbaImage::new(grid.width() as u32, grid.height() as u32);
    target
        .par_enumerate_pixels_mut()
        .for_each(|(x, y, out)| {
            *out = grid.window_mean(y as usize, x as usize, kernel).into();
        });
    target
}

/// Blurs `image` `config.iterations` times, re-reading the previous result before every pass.
///
/// Zero iterations return the input unchanged. If the pixels of any pass cannot be read
/// the whole run fails and nothing is returned.
pub fn mean_blur(
    image: &DynamicImage,
    config: &BlurConfig,
) -> Result<DynamicImage, ExtractionError> {
    let _span = tracing::info_span!(
        "mean_blur",
        kernel = config.kernel_size.get(),
        iterations = config.iterations
    )
    .entered();

    let mut current = image.clone();
    for iteration in 0..config.iterations {
        let grid = PixelGrid::extract(&current)?;
        tracing::debug!(
            iteration,
            width = grid.width(),
            height = grid.height(),
            "starting blur pass"
        );
        current = DynamicImage::ImageRgba8(blur_pass(&grid, config.kernel_size));
    }
    tracing::info!(
        width = current.width(),
        height = current.height(),
        "mean blur finished"
    );
    Ok(current)
}

pub fn mean_blur_in_place(image: &mut Image, config: &BlurConfig) -> Result<(), BlurError> {
    let had_alpha = image.pixels.color().has_alpha();
    let mut blurred = mean_blur(&image.pixels, config)?;
    // Opaque inputs stay fully opaque, so the alpha channel can go without losing anything.
    // This keeps e.g. JPEG inputs encodable back to JPEG.
    if !had_alpha && blurred.color().has_alpha() {
        blurred = DynamicImage::ImageRgb8(blurred.to_rgb8());
    }
    image.pixels = blurred;
    Ok(())
}
