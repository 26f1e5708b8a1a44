use std::io::{BufRead, Cursor, Read};

use image::{ImageFormat, ImageReader};

use crate::{arg_parsers::Location, error::BlurError, image::Image, mb_err, mb_try};

/// If the format has not been explicitly specified, guesses the format based on file contents.
pub fn decode(location: &Location, format: Option<ImageFormat>) -> Result<Image, BlurError> {
    match location {
        Location::Path(path) => {
            let reader = ImageReader::open(path)
                .map_err(|error| mb_err!("unable to open image '{}': {error}", path.display()))?;
            decode_from(reader, format)
        }
        Location::Stdio => {
            // guessing the format needs Seek, which stdin doesn't implement
            let mut bytes = Vec::new();
            mb_try!(std::io::stdin().lock().read_to_end(&mut bytes));
            decode_from(ImageReader::new(Cursor::new(bytes)), format)
        }
    }
}

fn decode_from<R: BufRead + std::io::Seek>(
    mut reader: ImageReader<R>,
    format: Option<ImageFormat>,
) -> Result<Image, BlurError> {
    match format {
        Some(format) => reader.set_format(format),
        None => reader = mb_try!(reader.with_guessed_format()),
    }
    let format = reader.format();
    let pixels = mb_try!(reader.decode());
    tracing::debug!(
        ?format,
        width = pixels.width(),
        height = pixels.height(),
        color = ?pixels.color(),
        "decoded image"
    );
    Ok(Image { format, pixels })
}
