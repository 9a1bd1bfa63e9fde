//! Test pattern catalog.
//!
//! This module defines the fixed set of message patterns every strategy is
//! measured against, including:
//! - `PatternId`, the closed enumeration of pattern names
//! - `TestPattern`, one pattern with its eagerly derived syntax variants
//! - `Catalog`, the read-only lookup built once per run

mod error;
pub mod variant;

pub use error::CatalogError;
pub use variant::{derive_variants, SyntaxVariants, Variant};

use crate::args::{ArgKind, ArgValue, ArgumentSource};
use log::*;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Names of the measured patterns, in report order.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatternId {
    NoPattern,
    SimplePattern,
    ComplexPattern,
    FormattingPattern,
}

impl PatternId {
    pub const ALL: [PatternId; 4] = [
        PatternId::NoPattern,
        PatternId::SimplePattern,
        PatternId::ComplexPattern,
        PatternId::FormattingPattern,
    ];

    /// Returns the name used on the command line and in reports.
    ///
    pub fn name(self) -> &'static str {
        match self {
            PatternId::NoPattern => "NO_PATTERN",
            PatternId::SimplePattern => "SIMPLE_PATTERN",
            PatternId::ComplexPattern => "COMPLEX_PATTERN",
            PatternId::FormattingPattern => "FORMATTING_PATTERN",
        }
    }

    fn canonical(self) -> &'static str {
        match self {
            PatternId::NoPattern => "1NO_PATTERN.",
            PatternId::SimplePattern => "2SIMPLE_PATTERN {0}.",
            PatternId::ComplexPattern => "3COMPLEX_PATTERN '{3}' {2} {1} {0}.",
            PatternId::FormattingPattern => "4FORMATTING_PATTERN {0} {1}.",
        }
    }

    fn arguments(self) -> Option<&'static [ArgKind]> {
        match self {
            PatternId::NoPattern => None,
            PatternId::SimplePattern => Some(&[ArgKind::Fact]),
            PatternId::ComplexPattern => Some(&[ArgKind::Fact, ArgKind::Fact, ArgKind::Fact]),
            PatternId::FormattingPattern => Some(&[ArgKind::Fact, ArgKind::Birthday]),
        }
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternId {
    type Err = CatalogError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        PatternId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == name)
            .ok_or_else(|| CatalogError::NotFound {
                name: name.to_string(),
            })
    }
}

/// One measured scenario: a canonical pattern, the kinds of arguments it
/// takes and its derived spellings.
///
#[derive(Clone, Debug)]
pub struct TestPattern {
    id: PatternId,
    canonical: &'static str,
    arguments: Option<&'static [ArgKind]>,
    variants: SyntaxVariants,
}

impl TestPattern {
    fn new(id: PatternId) -> TestPattern {
        let canonical = id.canonical();
        TestPattern {
            id,
            canonical,
            arguments: id.arguments(),
            variants: derive_variants(canonical),
        }
    }

    pub fn id(&self) -> PatternId {
        self.id
    }

    pub fn canonical(&self) -> &str {
        self.canonical
    }

    pub fn variants(&self) -> &SyntaxVariants {
        &self.variants
    }

    /// Returns the argument kinds, or `None` for static text.
    ///
    pub fn argument_kinds(&self) -> Option<&'static [ArgKind]> {
        self.arguments
    }

    /// Returns the spelling of this pattern a strategy asks for.
    ///
    pub fn syntax(&self, variant: Variant) -> &str {
        match variant {
            Variant::Canonical => self.canonical,
            Variant::Printf => &self.variants.printf,
            Variant::NamedCurly => &self.variants.named_curly,
            Variant::NamedTagged => &self.variants.named_tagged,
        }
    }
}

/// Read-only set of test patterns, built once at start-up.
///
pub struct Catalog {
    source: Arc<ArgumentSource>,
    patterns: Vec<TestPattern>,
}

impl Catalog {
    /// Build every pattern and its variants up front.
    ///
    pub fn new(source: Arc<ArgumentSource>) -> Catalog {
        let patterns: Vec<TestPattern> = PatternId::ALL
            .iter()
            .map(|id| TestPattern::new(*id))
            .collect();
        for pattern in &patterns {
            debug!(
                "Registered pattern {} (printf {:?}, named curly {:?}, named tagged {:?})",
                pattern.id,
                pattern.variants.printf,
                pattern.variants.named_curly,
                pattern.variants.named_tagged
            );
        }
        Catalog { source, patterns }
    }

    /// Resolve a pattern by name.
    ///
    pub fn get(&self, name: &str) -> Result<&TestPattern, CatalogError> {
        let id: PatternId = name.parse()?;
        Ok(self.pattern(id))
    }

    /// Returns the pattern for an identifier.
    ///
    pub fn pattern(&self, id: PatternId) -> &TestPattern {
        // Patterns are stored in declaration order of `PatternId`.
        &self.patterns[id as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestPattern> {
        self.patterns.iter()
    }

    /// Generate a fresh argument sequence for a pattern, or `None` when the
    /// pattern is static text.
    ///
    pub fn arguments(&self, pattern: &TestPattern) -> Option<Vec<ArgValue>> {
        pattern
            .arguments
            .map(|kinds| kinds.iter().map(|kind| self.source.generate(*kind)).collect())
    }
}
