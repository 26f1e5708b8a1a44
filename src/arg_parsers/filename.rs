use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use crate::encode::FileFormat;

/// Where an image is read from or written to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Location {
    Path(PathBuf),
    /// `-` on the command line: stdin for inputs, stdout for outputs
    #[default]
    Stdio,
}

impl Location {
    fn from_arg(s: &OsStr) -> Self {
        if s == OsStr::new("-") || s.is_empty() {
            Location::Stdio
        } else {
            Location::Path(PathBuf::from(s))
        }
    }

    pub fn display(&self) -> std::path::Display<'_> {
        match self {
            Location::Path(path) => path.display(),
            Location::Stdio => Path::new("-").display(),
        }
    }
}

/// A file argument, optionally prefixed by an explicit format such as `png:out.dat`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileArg {
    pub location: Location,
    pub format: Option<FileFormat>,
}

impl From<&OsStr> for FileArg {
    fn from(s: &OsStr) -> Self {
        // Prefixes that are not a known format are part of the path,
        // which keeps `C:\images\in.png` and `dir:with:colons/a.png` working.
        if let Some((prefix, rest)) = s.to_str().and_then(|string| string.split_once(':')) {
            if let Some(format) = FileFormat::from_prefix(prefix) {
                return Self {
                    location: Location::from_arg(OsStr::new(rest)),
                    format: Some(format),
                };
            }
        }
        Self {
            location: Location::from_arg(s),
            format: None,
        }
    }
}
