use super::{FormatError, FormatStrategy};
use crate::args::ArgValue;
use crate::pattern::Variant;
use std::fmt::Write;

/// Printf-style formatting on the `%s` spelling of a pattern.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct PrintfStrategy;

impl FormatStrategy for PrintfStrategy {
    fn name(&self) -> &'static str {
        "printf"
    }

    fn variant(&self) -> Variant {
        Variant::Printf
    }

    fn format(&self, syntax: &str, args: Option<&[ArgValue]>) -> Result<String, FormatError> {
        format_printf(syntax, args)
    }
}

/// Render a printf-style pattern.
///
/// Each `%s` consumes the next argument in order, `%%` is a percent sign
/// and `%n` a line break. Arguments are rendered with their `Display` form.
///
pub fn format_printf(pattern: &str, args: Option<&[ArgValue]>) -> Result<String, FormatError> {
    let args = args.unwrap_or(&[]);
    let mut result = String::with_capacity(pattern.len() + 16 * args.len());
    let mut next_arg = args.iter();
    let mut position = 0;
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => {
                let arg = next_arg
                    .next()
                    .ok_or(FormatError::MissingArgument { position })?;
                // Writing into a String cannot fail.
                let _ = write!(result, "{}", arg);
                position += 1;
            }
            Some('%') => result.push('%'),
            Some('n') => result.push('\n'),
            Some(other) => return Err(FormatError::UnknownConversion(other.to_string())),
            None => return Err(FormatError::UnknownConversion(String::new())),
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn text(values: &[&str]) -> Vec<ArgValue> {
        values.iter().map(|v| ArgValue::Text(v.to_string())).collect()
    }

    #[test]
    fn test_printf_static_text() {
        assert_eq!(format_printf("1NO_PATTERN.", None).unwrap(), "1NO_PATTERN.");
    }

    #[test]
    fn test_printf_consumes_in_order() {
        let args = text(&["a", "b", "c"]);
        let formatted = format_printf("3COMPLEX_PATTERN '{3}' %s %s %s.", Some(&args[..])).unwrap();
        assert_eq!(formatted, "3COMPLEX_PATTERN '{3}' a b c.");
    }

    #[test]
    fn test_printf_escapes() {
        let args = text(&["x"]);
        assert_eq!(
            format_printf("100%% %s%n", Some(&args[..])).unwrap(),
            "100% x\n"
        );
    }

    #[test]
    fn test_printf_date_display() {
        let date = Utc.with_ymd_and_hms(1980, 3, 4, 22, 5, 9).unwrap();
        let args = vec![ArgValue::Date(date)];
        assert_eq!(
            format_printf("born %s", Some(&args[..])).unwrap(),
            "born Tue Mar 04 22:05:09 UTC 1980"
        );
    }

    #[test]
    fn test_printf_missing_argument() {
        let args = text(&["only"]);
        let result = format_printf("%s and %s", Some(&args[..]));
        assert_eq!(result, Err(FormatError::MissingArgument { position: 1 }));
        assert_eq!(
            format_printf("%s", None),
            Err(FormatError::MissingArgument { position: 0 })
        );
    }

    #[test]
    fn test_printf_unknown_conversion() {
        assert_eq!(
            format_printf("%d", None),
            Err(FormatError::UnknownConversion("d".to_string()))
        );
        assert_eq!(
            format_printf("trailing %", None),
            Err(FormatError::UnknownConversion(String::new()))
        );
    }

    #[test]
    fn test_printf_extra_arguments_ignored() {
        let args = text(&["a", "b"]);
        assert_eq!(format_printf("%s.", Some(&args[..])).unwrap(), "a.");
    }
}
