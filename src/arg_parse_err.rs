use std::{ffi::OsStr, num::ParseIntError};

/// Error reporting for argument parsing that mimics imagemagick.
/// Use `.display_with_arg()` to properly present this error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgParseErr {
    pub message: Option<String>,
}

impl ArgParseErr {
    pub fn display_with_arg(&self, arg_name: &str, value: &OsStr) -> String {
        let value = value.to_string_lossy();
        // a specific message wins, otherwise echo back what the user passed
        let message = match &self.message {
            Some(msg) => msg.as_str(),
            None => &value,
        };

        format!("invalid argument for option `{arg_name}': {message}")
    }

    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_msg(str: impl ToString) -> Self {
        Self {
            message: Some(str.to_string()),
        }
    }
}

impl From<ParseIntError> for ArgParseErr {
    fn from(_value: ParseIntError) -> Self {
        Self::new()
    }
}
