//! Formatting strategies under measurement.
//!
//! Every strategy renders one spelling of a test pattern with a sequence of
//! argument values:
//! - `message_format`: positional `{0}` placeholders with quoting
//! - `printf`: ordered `%s` conversions
//! - `named_curly`: `{arg0}` parameters bound before rendering
//! - `named_tagged`: `<arg0>` attributes bound before rendering
//! - `deferred_log`: positional formatting performed only when a log record
//!   is enabled

mod deferred_log;
mod error;
mod message_format;
mod named_curly;
mod named_tagged;
mod printf;

pub use deferred_log::DeferredLogStrategy;
pub use error::{FormatError, UnknownStrategy};
pub use message_format::{format_message, write_message, LazyMessage, MessageFormatStrategy};
pub use named_curly::{NamedCurlyStrategy, NamedTemplate};
pub use named_tagged::{NamedTaggedStrategy, TaggedTemplate};
pub use printf::{format_printf, PrintfStrategy};

use crate::args::ArgValue;
use crate::pattern::Variant;
use std::fmt;
use std::str::FromStr;

/// Shared capability of every formatting strategy.
///
/// Implementations never mutate the pattern they are given and perform no
/// binding when `args` is `None`.
///
pub trait FormatStrategy: Send + Sync {
    /// Name used on the command line and in reports.
    fn name(&self) -> &'static str;

    /// Spelling of the pattern this strategy consumes.
    fn variant(&self) -> Variant;

    /// Render `syntax` with `args`.
    fn format(&self, syntax: &str, args: Option<&[ArgValue]>) -> Result<String, FormatError>;
}

/// Names of the available strategies, in report order.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    MessageFormat,
    Printf,
    NamedCurly,
    NamedTagged,
    DeferredLog,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::MessageFormat,
        Strategy::Printf,
        Strategy::NamedCurly,
        Strategy::NamedTagged,
        Strategy::DeferredLog,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::MessageFormat => "message_format",
            Strategy::Printf => "printf",
            Strategy::NamedCurly => "named_curly",
            Strategy::NamedTagged => "named_tagged",
            Strategy::DeferredLog => "deferred_log",
        }
    }

    /// Returns a ready to use instance of the strategy.
    ///
    pub fn build(self) -> Box<dyn FormatStrategy> {
        match self {
            Strategy::MessageFormat => Box::new(MessageFormatStrategy),
            Strategy::Printf => Box::new(PrintfStrategy),
            Strategy::NamedCurly => Box::new(NamedCurlyStrategy),
            Strategy::NamedTagged => Box::new(NamedTaggedStrategy),
            Strategy::DeferredLog => Box::new(DeferredLogStrategy::new()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.name() == name)
            .ok_or_else(|| UnknownStrategy {
                name: name.to_string(),
            })
    }
}

/// Binding name of the argument at `index` for named strategies.
///
pub(crate) fn argument_name(index: usize) -> String {
    format!("arg{}", index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names_parse() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
            assert_eq!(strategy.build().name(), strategy.name());
        }
    }

    #[test]
    fn test_unknown_strategy_name() {
        let result = "MESSAGE_FORMAT".parse::<Strategy>();
        assert!(matches!(result, Err(UnknownStrategy { ref name }) if name == "MESSAGE_FORMAT"));
    }

    #[test]
    fn test_strategy_variants() {
        assert_eq!(Strategy::MessageFormat.build().variant(), Variant::Canonical);
        assert_eq!(Strategy::Printf.build().variant(), Variant::Printf);
        assert_eq!(Strategy::NamedCurly.build().variant(), Variant::NamedCurly);
        assert_eq!(Strategy::NamedTagged.build().variant(), Variant::NamedTagged);
        assert_eq!(Strategy::DeferredLog.build().variant(), Variant::Canonical);
    }

    #[test]
    fn test_static_text_passes_through_every_strategy() {
        for strategy in Strategy::ALL {
            let formatted = strategy.build().format("1NO_PATTERN.", None).unwrap();
            assert_eq!(formatted, "1NO_PATTERN.", "{}", strategy);
        }
    }
}
