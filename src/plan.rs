use std::ffi::OsStr;

use crate::arg_parse_err::ArgParseErr;
use crate::arg_parsers::{parse_iterations, BlurConfig, FileArg, KernelSize};
use crate::args::{Arg, Sign};
use crate::decode::decode;
use crate::encode::{self, FileFormat};
use crate::{error::BlurError, operations::Operation, mb_err};

/// Plan of the whole run: one input, one output, and the blur to apply in between
#[derive(Debug, Default)]
pub struct ExecutionPlan {
    blur: BlurConfig,
    input_file: Option<FileArg>,
    output_file: FileArg,
}

impl ExecutionPlan {
    pub fn apply_arg(
        &mut self,
        arg: Arg,
        sign: Sign,
        value: Option<&OsStr>,
    ) -> Result<(), BlurError> {
        let arg_string: &'static str = arg.into();
        match (arg.needs_value(sign), value.is_some()) {
            (true, false) => return Err(mb_err!("argument requires a value: {arg_string}")),
            (false, true) => return Err(mb_err!("argument takes no value: {arg_string}")),
            _ => (),
        }

        self.apply_arg_inner(arg, value).map_err(|arg_err| {
            mb_err!(
                "{}",
                arg_err.display_with_arg(arg_string, value.unwrap_or_default())
            )
        })?;

        Ok(())
    }

    /// Currently this can only fail due to argument parsing.
    /// Split into its own function due to lack of try{} blocks on stable Rust.
    /// A missing value means the option was reset with `+`.
    fn apply_arg_inner(&mut self, arg: Arg, value: Option<&OsStr>) -> Result<(), ArgParseErr> {
        let defaults = BlurConfig::default();
        match (arg, value) {
            (Arg::Blur, Some(value)) => self.blur = BlurConfig::try_from(value)?,
            (Arg::Blur, None) => self.blur = defaults,
            (Arg::KernelSize, Some(value)) => self.blur.kernel_size = KernelSize::try_from(value)?,
            (Arg::KernelSize, None) => self.blur.kernel_size = defaults.kernel_size,
            (Arg::Iterations, Some(value)) => {
                let string: &str = value.try_into().map_err(|_e| ArgParseErr::new())?;
                self.blur.iterations = parse_iterations(string)?;
            }
            (Arg::Iterations, None) => self.blur.iterations = defaults.iterations,
        };

        Ok(())
    }

    pub fn add_input_file(&mut self, file: FileArg) -> Result<(), BlurError> {
        if self.input_file.is_some() {
            return Err(mb_err!("only one input image is supported"));
        }
        if file.format == Some(FileFormat::DoNotEncode) {
            return Err(mb_err!("no decode delegate for this image format `NULL'"));
        }
        self.input_file = Some(file);
        Ok(())
    }

    pub fn set_output_file(&mut self, file: FileArg) {
        self.output_file = file;
    }

    pub fn blur_config(&self) -> BlurConfig {
        self.blur
    }

    pub fn input_file(&self) -> Option<&FileArg> {
        self.input_file.as_ref()
    }

    pub fn output_file(&self) -> &FileArg {
        &self.output_file
    }

    pub fn execute(&self) -> Result<(), BlurError> {
        let Some(input) = &self.input_file else {
            return Err(mb_err!("no images defined"));
        };
        crate::init::init();

        let format = match input.format {
            Some(FileFormat::Format(format)) => Some(format),
            _ => None,
        };
        let mut image = decode(&input.location, format)?;

        Operation::MeanBlur(self.blur).execute(&mut image)?;

        encode::encode(&image, &self.output_file.location, self.output_file.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arg_parsers::Location;

    #[test]
    fn test_reset_restores_defaults() {
        let mut plan = ExecutionPlan::default();
        plan.apply_arg(Arg::Blur, Sign::Set, Some(OsStr::new("9x4")))
            .unwrap();
        plan.apply_arg(Arg::Iterations, Sign::Reset, None).unwrap();
        assert_eq!(plan.blur_config().kernel_size.get(), 9);
        assert_eq!(plan.blur_config().iterations, 1);
        plan.apply_arg(Arg::Blur, Sign::Reset, None).unwrap();
        assert_eq!(plan.blur_config(), BlurConfig::default());
    }

    #[test]
    fn test_reset_takes_no_value() {
        let mut plan = ExecutionPlan::default();
        let err = plan
            .apply_arg(Arg::KernelSize, Sign::Reset, Some(OsStr::new("3")))
            .unwrap_err();
        assert!(err
            .to_string()
            .starts_with("meanblur: argument takes no value: kernel-size"));
    }

    #[test]
    fn test_null_input_rejected() {
        let mut plan = ExecutionPlan::default();
        let err = plan
            .add_input_file(FileArg::from(OsStr::new("null:")))
            .unwrap_err();
        assert!(err.to_string().contains("no decode delegate"));
    }

    #[test]
    fn test_execute_without_input() {
        let plan = ExecutionPlan::default();
        assert_eq!(plan.output_file().location, Location::Stdio);
        let err = plan.execute().unwrap_err();
        assert!(err.to_string().starts_with("meanblur: no images defined"));
    }
}
