use super::{argument_name, FormatError, FormatStrategy};
use crate::args::ArgValue;
use crate::pattern::Variant;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::OnceLock;

fn attribute_regex() -> &'static Regex {
    static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
    ATTRIBUTE.get_or_init(|| {
        Regex::new(r"<([A-Za-z_][A-Za-z0-9_]*)>").expect("attribute pattern is a valid regex")
    })
}

/// Template with `<name>` attributes.
///
/// Adding the same attribute more than once collects the values, which are
/// rendered back to back. Attributes without values render as nothing.
///
#[derive(Debug)]
pub struct TaggedTemplate<'a> {
    pattern: &'a str,
    attributes: HashMap<String, Vec<String>>,
}

impl<'a> TaggedTemplate<'a> {
    pub fn new(pattern: &'a str) -> TaggedTemplate<'a> {
        TaggedTemplate {
            pattern,
            attributes: HashMap::new(),
        }
    }

    pub fn add(&mut self, name: impl Into<String>, value: &ArgValue) -> &mut Self {
        self.attributes
            .entry(name.into())
            .or_default()
            .push(value.to_string());
        self
    }

    pub fn render(&self) -> String {
        attribute_regex()
            .replace_all(self.pattern, |caps: &Captures| {
                let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                self.attributes
                    .get(name)
                    .map(|values| values.concat())
                    .unwrap_or_default()
            })
            .into_owned()
    }
}

/// Tag-delimited attribute formatting on the `<arg0>` spelling of a pattern.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct NamedTaggedStrategy;

impl FormatStrategy for NamedTaggedStrategy {
    fn name(&self) -> &'static str {
        "named_tagged"
    }

    fn variant(&self) -> Variant {
        Variant::NamedTagged
    }

    fn format(&self, syntax: &str, args: Option<&[ArgValue]>) -> Result<String, FormatError> {
        Ok(bind(syntax, args).render())
    }
}

fn bind<'a>(syntax: &'a str, args: Option<&[ArgValue]>) -> TaggedTemplate<'a> {
    let mut template = TaggedTemplate::new(syntax);
    for (index, arg) in args.unwrap_or(&[]).iter().enumerate() {
        template.add(argument_name(index), arg);
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
    fn test_template_renders_attributes() {
        let mut template = TaggedTemplate::new("<a> and <b>");
        template.add("a", &text("x")).add("b", &text("y"));
        assert_eq!(template.render(), "x and y");
    }

    #[test]
    fn test_template_multi_valued_attribute() {
        let mut template = TaggedTemplate::new("[<items>]");
        template.add("items", &text("1"));
        template.add("items", &text("2"));
        assert_eq!(template.render(), "[12]");
    }

    #[test]
    fn test_template_missing_attribute_is_empty() {
        let template = TaggedTemplate::new("a<b>c");
        assert_eq!(template.render(), "ac");
    }

    #[test]
    fn test_strategy_leaves_quoted_braces() {
        let args = vec![text("a"), text("b"), text("c")];
        let formatted = NamedTaggedStrategy
            .format("3COMPLEX_PATTERN '{3}' <arg2> <arg1> <arg0>.", Some(&args[..]))
            .unwrap();
        assert_eq!(formatted, "3COMPLEX_PATTERN '{3}' c b a.");
    }

    #[test]
    fn test_strategy_without_arguments() {
        assert_eq!(
            NamedTaggedStrategy.format("1NO_PATTERN.", None).unwrap(),
            "1NO_PATTERN."
        );
    }

    #[test]
    fn test_bind_without_arguments_adds_nothing() {
        assert!(bind("1NO_PATTERN.", None).attributes.is_empty());

        let args = vec![text("a")];
        let template = bind("<arg0>", Some(&args[..]));
        assert_eq!(template.attributes.get("arg0"), Some(&vec!["a".to_string()]));
    }
}
