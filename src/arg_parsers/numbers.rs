use std::str::FromStr;

/// Trims surrounding whitespace and parses the rest as `T`.
///
/// Option values such as ` 5 ` in `-kernel-size " 5 "` are accepted,
/// matching how imagemagick treats numeric arguments.
pub fn strip_and_parse_number<T>(input: &str) -> Result<T, T::Err>
where
    T: FromStr,
    T::Err: std::error::Error,
{
    input.trim().parse::<T>()
}
