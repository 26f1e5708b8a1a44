//! Helpers for using `quickcheck`'s `Arbitrary` trait

use image::RgbaImage;
use quickcheck::Arbitrary;

/// Largest side of generated images; blur cost grows with area times kernel size
const MAX_SIDE: u32 = 16;

/// A small, never empty RGBA image with random contents.
#[derive(Debug, Clone)]
pub struct TestImage(pub RgbaImage);

impl Arbitrary for TestImage {
    fn arbitrary(gen: &mut quickcheck::Gen) -> Self {
        let width = side(gen);
        let height = side(gen);
        let pixels = (0..width * height * 4).map(|_| u8::arbitrary(gen)).collect();
        // the buffer has exactly width * height * 4 bytes
        Self(RgbaImage::from_raw(width, height, pixels).unwrap())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let (width, height) = self.0.dimensions();
        let image = self.0.clone();
        let smaller = [(width / 2, height), (width, height / 2)]
            .into_iter()
            .filter(move |&(w, h)| w > 0 && h > 0 && (w, h) != (width, height))
            .map(move |(w, h)| {
                Self(RgbaImage::from_fn(w, h, |x, y| *image.get_pixel(x, y)))
            });
        Box::new(smaller)
    }
}

#[must_use]
fn side(gen: &mut quickcheck::Gen) -> u32 {
    u32::arbitrary(gen) % MAX_SIDE + 1
}

