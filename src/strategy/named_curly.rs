use super::{argument_name, FormatError, FormatStrategy};
use crate::args::ArgValue;
use crate::pattern::Variant;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

fn parameter_regex() -> &'static Regex {
    static PARAMETER: OnceLock<Regex> = OnceLock::new();
    PARAMETER.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("parameter pattern is a valid regex")
    })
}

/// Template with `{name}` parameters. Values are bound with `put` and the
/// template rendered with `format`.
///
#[derive(Debug)]
pub struct NamedTemplate<'a> {
    pattern: &'a str,
    values: HashMap<String, String>,
}

impl<'a> NamedTemplate<'a> {
    pub fn new(pattern: &'a str) -> NamedTemplate<'a> {
        NamedTemplate {
            pattern,
            values: HashMap::new(),
        }
    }

    /// Bind `value` to the parameter `key`, replacing any earlier value.
    ///
    pub fn put(&mut self, key: impl Into<String>, value: &ArgValue) -> &mut Self {
        self.values.insert(key.into(), value.to_string());
        self
    }

    /// Render the template. Every parameter must have a bound value.
    ///
    pub fn format(&self) -> Result<String, FormatError> {
        let mut unbound: Option<String> = None;
        let rendered = parameter_regex().replace_all(self.pattern, |caps: &Captures| {
            let key = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            match self.values.get(key) {
                Some(value) => value.clone(),
                None => {
                    unbound.get_or_insert_with(|| key.to_string());
                    String::new()
                }
            }
        });
        match unbound {
            Some(key) => Err(FormatError::UnboundName(key)),
            None => Ok(rendered.into_owned()),
        }
    }
}

/// Named-parameter formatting on the `{arg0}` spelling of a pattern.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct NamedCurlyStrategy;

impl FormatStrategy for NamedCurlyStrategy {
    fn name(&self) -> &'static str {
        "named_curly"
    }

    fn variant(&self) -> Variant {
        Variant::NamedCurly
    }

    fn format(&self, syntax: &str, args: Option<&[ArgValue]>) -> Result<String, FormatError> {
        bind(syntax, args).format()
    }
}

/// Template for `syntax` with `arg<i>` bound to each argument. No values
/// are bound when there are no arguments.
///
fn bind<'a>(syntax: &'a str, args: Option<&[ArgValue]>) -> NamedTemplate<'a> {
    let mut template = NamedTemplate::new(syntax);
    for (index, arg) in args.unwrap_or(&[]).iter().enumerate() {
        template.put(argument_name(index), arg);
    }
    template
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> ArgValue {
        ArgValue::Text(value.to_string())
    }

    #[test]
    fn test_template_binds_by_name() {
        let mut template = NamedTemplate::new("{greeting}, {who}!");
        template.put("greeting", &text("Hello")).put("who", &text("world"));
        assert_eq!(template.format().unwrap(), "Hello, world!");
    }

    #[test]
    fn test_template_put_replaces_value() {
        let mut template = NamedTemplate::new("{a}");
        template.put("a", &text("first"));
        template.put("a", &text("second"));
        assert_eq!(template.format().unwrap(), "second");
    }

    #[test]
    fn test_template_unbound_parameter() {
        let mut template = NamedTemplate::new("{a} {b} {c}");
        template.put("a", &text("x"));
        assert_eq!(
            template.format(),
            Err(FormatError::UnboundName("b".to_string()))
        );
    }

    #[test]
    fn test_template_keeps_numeric_and_quoted_text() {
        let template = NamedTemplate::new("'3' {3} {}");
        assert_eq!(template.format().unwrap(), "'3' {3} {}");
    }

    #[test]
    fn test_strategy_binds_generated_names() {
        let args = vec![text("a"), text("b"), text("c")];
        let formatted = NamedCurlyStrategy
            .format("3COMPLEX_PATTERN '3' {arg2} {arg1} {arg0}.", Some(&args[..]))
            .unwrap();
        assert_eq!(formatted, "3COMPLEX_PATTERN '3' c b a.");
    }

    #[test]
    fn test_strategy_without_arguments() {
        assert_eq!(
            NamedCurlyStrategy.format("1NO_PATTERN.", None).unwrap(),
            "1NO_PATTERN."
        );
        assert_eq!(
            NamedCurlyStrategy.format("{arg0}", None),
            Err(FormatError::UnboundName("arg0".to_string()))
        );
    }

    #[test]
    fn test_bind_without_arguments_binds_nothing() {
        assert!(bind("1NO_PATTERN.", None).values.is_empty());

        let args = vec![text("a"), text("b")];
        let template = bind("{arg0}{arg1}", Some(&args[..]));
        assert_eq!(template.values.len(), 2);
        assert_eq!(template.values.get("arg1"), Some(&"b".to_string()));
    }
}
