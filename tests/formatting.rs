//! End to end checks of catalog patterns rendered by every strategy.

use messageformat_bench::harness::{invoke, BlackHole};
use messageformat_bench::pattern::CatalogError;
use messageformat_bench::strategy::{
    format_message, format_printf, NamedCurlyStrategy, NamedTaggedStrategy,
};
use messageformat_bench::{
    ArgValue, ArgumentSource, Catalog, FormatStrategy, PatternId, Strategy, Variant,
};
use std::sync::Arc;

fn catalog() -> Catalog {
    Catalog::new(Arc::new(ArgumentSource::new()))
}

fn text(values: &[&str]) -> Vec<ArgValue> {
    values.iter().map(|v| ArgValue::Text(v.to_string())).collect()
}

#[test]
fn test_every_strategy_renders_every_pattern() {
    let catalog = catalog();
    for strategy in Strategy::ALL {
        let instance = strategy.build();
        for pattern in catalog.iter() {
            let args = catalog.arguments(pattern);
            let formatted = instance
                .format(pattern.syntax(instance.variant()), args.as_deref())
                .unwrap_or_else(|e| panic!("{} on {}: {}", strategy, pattern.id(), e));
            let prefix = &pattern.canonical()[..1];
            assert!(formatted.starts_with(prefix), "{} on {}", strategy, pattern.id());
            if let Some(args) = &args {
                for arg in args.iter().filter(|arg| matches!(arg, ArgValue::Text(_))) {
                    assert!(formatted.contains(&arg.to_string()));
                }
            }
        }
    }
}

#[test]
fn test_complex_pattern_ordering_per_strategy() {
    let catalog = catalog();
    let pattern = catalog.pattern(PatternId::ComplexPattern);
    let args = text(&["a", "b", "c"]);

    let positional = format_message(pattern.syntax(Variant::Canonical), Some(&args[..])).unwrap();
    assert_eq!(positional, "3COMPLEX_PATTERN {3} c b a.");

    // Printf consumes arguments in order of appearance, not by index.
    let printf = format_printf(pattern.syntax(Variant::Printf), Some(&args[..])).unwrap();
    assert_eq!(printf, "3COMPLEX_PATTERN '{3}' a b c.");

    let curly = NamedCurlyStrategy
        .format(pattern.syntax(Variant::NamedCurly), Some(&args[..]))
        .unwrap();
    assert_eq!(curly, "3COMPLEX_PATTERN '3' c b a.");

    let tagged = NamedTaggedStrategy
        .format(pattern.syntax(Variant::NamedTagged), Some(&args[..]))
        .unwrap();
    assert_eq!(tagged, "3COMPLEX_PATTERN '{3}' c b a.");
}

#[test]
fn test_static_pattern_without_arguments() {
    let catalog = catalog();
    let pattern = catalog.pattern(PatternId::NoPattern);
    assert!(catalog.arguments(pattern).is_none());
    for strategy in Strategy::ALL {
        let instance = strategy.build();
        let formatted = instance
            .format(pattern.syntax(instance.variant()), None)
            .unwrap();
        assert_eq!(formatted, "1NO_PATTERN.");
    }
}

#[test]
fn test_arguments_are_fresh_per_invocation() {
    let catalog = catalog();
    let pattern = catalog.pattern(PatternId::ComplexPattern);
    let first = catalog.arguments(pattern).unwrap();
    let second = catalog.arguments(pattern).unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 3);
}

#[test]
fn test_invoke_feeds_sink_for_every_pair() {
    let catalog = catalog();
    let mut sink = BlackHole::new();
    for strategy in Strategy::ALL {
        let instance = strategy.build();
        for pattern in catalog.iter() {
            invoke(instance.as_ref(), pattern, &catalog, &mut sink).unwrap();
        }
    }
    assert_eq!(sink.consumed(), (Strategy::ALL.len() * PatternId::ALL.len()) as u64);
}

#[test]
fn test_unknown_pattern_lookup() {
    let catalog = catalog();
    assert!(matches!(
        catalog.get("UNKNOWN"),
        Err(CatalogError::NotFound { .. })
    ));
}
