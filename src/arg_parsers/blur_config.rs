use crate::{arg_parse_err::ArgParseErr, arg_parsers::strip_and_parse_number};
use std::{ffi::OsStr, num::NonZeroU32, str::FromStr};

#[cfg(test)]
use quickcheck::Arbitrary;

/// Side length of the square sampling window. Never zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KernelSize(NonZeroU32);

impl KernelSize {
    pub fn new(size: u32) -> Option<Self> {
        NonZeroU32::new(size).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get() as usize
    }
}

impl Default for KernelSize {
    fn default() -> Self {
        // 3x3
        Self(NonZeroU32::MIN.saturating_add(2))
    }
}

impl TryFrom<&OsStr> for KernelSize {
    type Error = ArgParseErr;

    fn try_from(s: &OsStr) -> Result<Self, Self::Error> {
        let string: &str = s.try_into().map_err(|_e| ArgParseErr::new())?;
        let size = strip_and_parse_number::<u32>(string).map_err(|_| ArgParseErr::new())?;
        Self::new(size).ok_or_else(|| ArgParseErr::with_msg("kernel size must be at least 1"))
    }
}

/// Parameters of a single blur run: `-blur 5x2` is a 5x5 kernel applied twice.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BlurConfig {
    pub kernel_size: KernelSize,
    pub iterations: u32,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            kernel_size: KernelSize::default(),
            iterations: 1,
        }
    }
}

#[cfg(test)]
impl Arbitrary for BlurConfig {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // large kernels and many passes only slow the tests down without reaching new code
        Self {
            kernel_size: KernelSize::new(u32::arbitrary(g) % 9 + 1).unwrap(),
            iterations: u32::arbitrary(g) % 4,
        }
    }
}

impl FromStr for BlurConfig {
    type Err = ArgParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(OsStr::new(s))
    }
}

impl TryFrom<&OsStr> for BlurConfig {
    type Error = ArgParseErr;

    fn try_from(s: &OsStr) -> Result<Self, Self::Error> {
        if !s.is_ascii() || s.is_empty() {
            return Err(ArgParseErr::new());
        }

        let string: &str = s.try_into().map_err(|_e| ArgParseErr::new())?;
        let parts: Vec<&str> = string.split('x').collect();

        match parts.as_slice() {
            [kernel] => Ok(Self {
                kernel_size: KernelSize::try_from(OsStr::new(kernel))?,
                ..Default::default()
            }),
            [kernel, iterations] => Ok(Self {
                kernel_size: KernelSize::try_from(OsStr::new(kernel))?,
                iterations: parse_iterations(iterations)?,
            }),
            _ => Err(ArgParseErr::new()),
        }
    }
}

pub fn parse_iterations(s: &str) -> Result<u32, ArgParseErr> {
    strip_and_parse_number::<u32>(s).map_err(|_| ArgParseErr::new())
}
