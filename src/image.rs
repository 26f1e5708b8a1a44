use image::{DynamicImage, ImageFormat};

#[derive(Debug, Clone)]
pub struct Image {
    /// Format the image was decoded from, if the decoder could tell
    pub format: Option<ImageFormat>,
    pub pixels: DynamicImage,
}
