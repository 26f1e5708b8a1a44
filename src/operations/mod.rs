pub mod mean_blur;

use crate::{arg_parsers::BlurConfig, error::BlurError, image::Image};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Operation {
    MeanBlur(BlurConfig),
}

impl Operation {
    pub fn execute(&self, image: &mut Image) -> Result<(), BlurError> {
        match self {
            Operation::MeanBlur(config) => mean_blur::mean_blur_in_place(image, config),
        }
    }
}
