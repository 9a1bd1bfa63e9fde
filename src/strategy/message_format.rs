use super::{FormatError, FormatStrategy};
use crate::args::ArgValue;
use crate::pattern::Variant;
use std::cell::Cell;
use std::fmt;

const QUOTE: char = '\'';

/// Positional message formatting on the canonical syntax.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct MessageFormatStrategy;

impl FormatStrategy for MessageFormatStrategy {
    fn name(&self) -> &'static str {
        "message_format"
    }

    fn variant(&self) -> Variant {
        Variant::Canonical
    }

    fn format(&self, syntax: &str, args: Option<&[ArgValue]>) -> Result<String, FormatError> {
        format_message(syntax, args)
    }
}

/// Render a positional pattern.
///
/// `{n}` is replaced by argument `n`. Text between single quotes is copied
/// literally and `''` yields one quote. A placeholder whose index has no
/// argument is kept as `{n}`.
///
pub fn format_message(pattern: &str, args: Option<&[ArgValue]>) -> Result<String, FormatError> {
    let capacity = pattern.len() + 16 * args.map_or(0, |args| args.len());
    let mut result = String::with_capacity(capacity);
    write_message(&mut result, pattern, args)?;
    Ok(result)
}

/// Render a positional pattern into `out`, with the rules of
/// `format_message`.
///
pub fn write_message<W: fmt::Write + ?Sized>(
    out: &mut W,
    pattern: &str,
    args: Option<&[ArgValue]>,
) -> Result<(), FormatError> {
    let args = args.unwrap_or(&[]);
    let mut in_quote = false;
    let mut chars = pattern.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c == QUOTE {
            if chars.peek().map(|(_, next)| *next) == Some(QUOTE) {
                chars.next();
                out.write_char(QUOTE)?;
            } else {
                in_quote = !in_quote;
            }
            continue;
        }
        if in_quote || c != '{' {
            out.write_char(c)?;
            continue;
        }

        let start = offset + c.len_utf8();
        let end = pattern[start..]
            .find('}')
            .map(|len| start + len)
            .ok_or(FormatError::UnmatchedBrace { offset })?;
        let content = pattern[start..end].trim();
        let index: usize = content
            .parse()
            .map_err(|_| FormatError::InvalidIndex(content.to_string()))?;
        match args.get(index) {
            Some(arg) => out.write_str(&arg.short_form())?,
            None => write!(out, "{{{}}}", content)?,
        }
        while let Some((next_offset, _)) = chars.peek() {
            if *next_offset > end {
                break;
            }
            chars.next();
        }
    }

    Ok(())
}

/// Positional message rendered only when it is displayed.
///
/// A formatting failure is kept aside and the display reports
/// `fmt::Error`; `take_error` hands the original error back.
///
pub struct LazyMessage<'a> {
    pattern: &'a str,
    args: Option<&'a [ArgValue]>,
    error: Cell<Option<FormatError>>,
}

impl<'a> LazyMessage<'a> {
    pub fn new(pattern: &'a str, args: Option<&'a [ArgValue]>) -> LazyMessage<'a> {
        LazyMessage {
            pattern,
            args,
            error: Cell::new(None),
        }
    }

    /// The error raised by the last display, if any.
    ///
    pub fn take_error(&self) -> Option<FormatError> {
        self.error.take()
    }
}

impl fmt::Display for LazyMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_message(f, self.pattern, self.args).map_err(|e| {
            self.error.set(Some(e));
            fmt::Error
        })
    }
}
