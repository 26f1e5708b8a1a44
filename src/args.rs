//! Imagemagick-style argument parsing.
//!
//! Options are prefixed by a single `-` (set) or `+` (reset to default),
//! which no argument parsing library supports, so the parser is hand-rolled.

use std::ffi::{OsStr, OsString};

use crate::{arg_parsers::FileArg, error::BlurError, mb_err, plan::ExecutionPlan};

use strum::{EnumString, IntoStaticStr, VariantArray};

#[derive(EnumString, IntoStaticStr, VariantArray, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum Arg {
    Blur,
    Iterations,
    KernelSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `-option value`
    Set,
    /// `+option`, restores the default
    Reset,
}

impl Arg {
    pub fn needs_value(&self, sign: Sign) -> bool {
        match sign {
            Sign::Set => true,
            Sign::Reset => false,
        }
    }

    pub fn help_text(&self) -> &'static str {
        match self {
            Arg::Blur => "mean blur with KERNELxITERATIONS, e.g. 5x2",
            Arg::Iterations => "number of blur passes (default 1)",
            Arg::KernelSize => "side length of the square averaging window (default 3)",
        }
    }
}

pub fn parse_args(args: Vec<OsString>) -> Result<ExecutionPlan, BlurError> {
    let mut iter = args.into_iter().skip(1); // skip argv[0], path to our binary
    let mut plan = ExecutionPlan::default();
    let mut files = Vec::new();

    while let Some(raw_arg) = iter.next() {
        if starts_with_sign(&raw_arg) {
            // A file named "-foobar.png" will be parsed as an option, like imagemagick does.
            let (sign, string_arg) = sign_and_arg_name(raw_arg)?;
            let arg = Arg::try_from(string_arg.as_str())
                .map_err(|_| mb_err!("unrecognized option `{}'", string_arg))?;
            let value = if arg.needs_value(sign) {
                let value = iter
                    .next()
                    .ok_or_else(|| mb_err!("argument requires a value: {string_arg}"))?;
                Some(value)
            } else {
                None
            };
            plan.apply_arg(arg, sign, value.as_deref())?;
        } else {
            files.push(raw_arg);
        }
    }

    // the last file is always the output, everything before it is input
    let output_file = files.pop().ok_or_else(|| mb_err!("no images defined"))?;
    if files.is_empty() {
        return Err(mb_err!(
            "missing an image filename `{}'",
            output_file.to_string_lossy()
        ));
    }
    for input in files {
        plan.add_input_file(FileArg::from(input.as_os_str()))?;
    }
    plan.set_output_file(FileArg::from(output_file.as_os_str()));
    Ok(plan)
}

/// Checks if the string is an option: starts with a single `-` or `+` followed by a name.
/// A lone `-` means stdin/stdout, and a leading `--` is treated as a filename.
fn starts_with_sign(arg: &OsStr) -> bool {
    let bytes = arg.as_encoded_bytes();
    matches!(bytes.first(), Some(b'-' | b'+'))
        && bytes.len() > 1
        && bytes.get(1) != Some(&b'-')
}

/// Splits the string into a sign and argument name
fn sign_and_arg_name(raw_arg: OsString) -> Result<(Sign, String), BlurError> {
    let mut string = raw_arg
        .into_string()
        .map_err(|s| mb_err!("unrecognized option `{}'", s.to_string_lossy()))?;
    let sign = match string.remove(0) {
        '+' => Sign::Reset,
        _ => Sign::Set,
    };
    Ok((sign, string))
}
