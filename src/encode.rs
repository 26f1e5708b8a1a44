use std::{
    borrow::Cow,
    ffi::OsStr,
    fs::File,
    io::{BufWriter, Seek, Write},
    path::Path,
};

use image::{DynamicImage, ImageFormat};

use crate::{arg_parsers::Location, error::BlurError, image::Image, mb_err, mb_try};

pub fn encode(
    image: &Image,
    location: &Location,
    format: Option<FileFormat>,
) -> Result<(), BlurError> {
    let format = match format {
        // no-op, return immediately
        Some(FileFormat::DoNotEncode) => return Ok(()),
        Some(FileFormat::Format(fmt)) => Some(fmt),
        None => None,
    };
    let format = choose_encoding_format(image, location, format)?;

    let file = match location {
        // `File::create` automatically truncates (overwrites) the file if it exists.
        Location::Path(path) => File::create(path)
            .map_err(|error| mb_err!("unable to open image '{}': {error}", path.display()))?,
        // Some of the encoders require Seek, which Stdout doesn't implement.
        // We write to a temporary file and then print out the content at the end.
        Location::Stdio => mb_try!(tempfile::tempfile()),
    };
    let mut writer = BufWriter::new(file);

    tracing::debug!(?format, location = %location.display(), "encoding image");
    let pixels = pixels_for_format(&image.pixels, format);
    mb_try!(pixels.write_to(&mut writer, format));

    match location {
        Location::Path(_) => {
            // Dropping the writer would flush too, but would swallow the error.
            mb_try!(writer.flush());
        }
        Location::Stdio => {
            let mut file = mb_try!(writer.into_inner());
            mb_try!(file.seek(std::io::SeekFrom::Start(0)));
            let mut stdout = std::io::stdout().lock();
            mb_try!(std::io::copy(&mut file, &mut stdout));
            mb_try!(stdout.flush());
        }
    }

    Ok(())
}

/// JPEG has no alpha channel, and `image` refuses to silently drop it.
fn pixels_for_format(pixels: &DynamicImage, format: ImageFormat) -> Cow<'_, DynamicImage> {
    if format == ImageFormat::Jpeg && pixels.color().has_alpha() {
        Cow::Owned(DynamicImage::ImageRgb8(pixels.to_rgb8()))
    } else {
        Cow::Borrowed(pixels)
    }
}

fn choose_encoding_format(
    image: &Image,
    location: &Location,
    explicitly_specified: Option<ImageFormat>,
) -> Result<ImageFormat, BlurError> {
    if let Some(format) = explicitly_specified {
        return Ok(format);
    }
    // if format was not explicitly specified, guess based on the output path
    if let Location::Path(path) = location {
        if let Ok(format) = ImageFormat::from_path(path) {
            return Ok(format);
        }
    }
    // if that fails, use the input format
    if let Some(format) = image.format {
        return Ok(format);
    }
    let extension = match location {
        Location::Path(path) => Path::new(path).extension().unwrap_or(OsStr::new("")),
        Location::Stdio => OsStr::new(""),
    };
    Err(mb_err!(
        "no encode delegate for this image format `{}'",
        extension.to_ascii_uppercase().to_string_lossy()
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Format(ImageFormat),
    /// Encoding operation is present but is a no-op. On the CLI this is "null:" passed as filename.
    DoNotEncode,
}

impl FileFormat {
    /// Creates a format from the explicit specifier that precedes the filename,
    /// e.g. `png:my-file` or `null:`
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let lowercase_prefix = prefix.to_ascii_lowercase();
        let format = if lowercase_prefix == "null" {
            Self::DoNotEncode
        } else {
            Self::Format(ImageFormat::from_extension(lowercase_prefix)?)
        };
        Some(format)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn image(format: Option<ImageFormat>) -> Image {
        Image {
            format,
            pixels: DynamicImage::new_rgba8(2, 2),
        }
    }

    #[test]
    fn test_explicit_format_wins() {
        let location = Location::Path(PathBuf::from("out.png"));
        let explicit = Some(ImageFormat::Bmp);
        let format = choose_encoding_format(&image(Some(ImageFormat::Gif)), &location, explicit);
        assert_eq!(format.unwrap(), ImageFormat::Bmp);
    }

    #[test]
    fn test_format_from_extension() {
        let location = Location::Path(PathBuf::from("out.png"));
        let format = choose_encoding_format(&image(Some(ImageFormat::Gif)), &location, None);
        assert_eq!(format.unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_falls_back_to_input_format() {
        let format = choose_encoding_format(&image(Some(ImageFormat::Gif)), &Location::Stdio, None);
        assert_eq!(format.unwrap(), ImageFormat::Gif);
    }

    #[test]
    fn test_unknown_format_is_an_error() {
        let location = Location::Path(PathBuf::from("out.xyz"));
        let err = choose_encoding_format(&image(None), &location, None).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("meanblur: no encode delegate for this image format `XYZ'"));
    }

    #[test]
    fn test_null_prefix() {
        assert_eq!(FileFormat::from_prefix("NULL"), Some(FileFormat::DoNotEncode));
        assert_eq!(
            FileFormat::from_prefix("jpg"),
            Some(FileFormat::Format(ImageFormat::Jpeg))
        );
        assert_eq!(FileFormat::from_prefix("nope"), None);
    }

    #[test]
    fn test_do_not_encode_writes_nothing() {
        let location = Location::Path(PathBuf::from("/nonexistent/dir/out.png"));
        assert!(encode(&image(None), &location, Some(FileFormat::DoNotEncode)).is_ok());
    }

    #[test]
    fn test_jpeg_drops_alpha() {
        let pixels = DynamicImage::new_rgba8(1, 1);
        assert!(!pixels_for_format(&pixels, ImageFormat::Jpeg).color().has_alpha());
        assert!(pixels_for_format(&pixels, ImageFormat::Png).color().has_alpha());
    }
}
