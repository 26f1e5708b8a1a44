use std::fmt::{Debug, Display};

use crate::pixel::ExtractionError;

pub struct BlurError(pub String);

impl Display for BlurError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for BlurError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BlurError").field(&self.0).finish()
    }
}

impl std::error::Error for BlurError {}

impl From<ExtractionError> for BlurError {
    fn from(err: ExtractionError) -> Self {
        BlurError(format!("meanblur: {err}"))
    }
}

#[macro_export]
macro_rules! mb_err {
    ($($arg:tt)*) => {
        $crate::error::BlurError(format!(
            "meanblur: {} @ {}:{}:{}",
            format_args!($($arg)*),
            file!(),
            line!(),
            column!()
        ))
    };
}

#[macro_export]
macro_rules! mb_try {
    ($expr:expr $(,)?) => {
        match $expr {
            std::result::Result::Ok(val) => val,
            std::result::Result::Err(err) => {
                return std::result::Result::Err($crate::mb_err!("{}", err));
            }
        }
    };
}
