//! Result sinks and run parameters supplied to the measured code.

/// Consumer of measured results.
///
/// Implementations must make the consumed value observable to the
/// optimizer so the computation producing it cannot be elided.
///
pub trait Sink {
    fn consume<T>(&mut self, value: T);
}

/// Sink that swallows every value through `std::hint::black_box`.
///
#[derive(Debug, Default)]
pub struct BlackHole {
    consumed: u64,
}

impl BlackHole {
    pub fn new() -> Self {
        BlackHole::default()
    }

    /// Number of values consumed so far.
    ///
    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}

impl Sink for BlackHole {
    #[inline]
    fn consume<T>(&mut self, value: T) {
        std::hint::black_box(value);
        self.consumed += 1;
    }
}

/// Supplies the name of the pattern bound to a run.
///
pub trait ParameterProvider {
    fn pattern_name(&self) -> &str;
}

/// Parameter provider holding one fixed pattern name.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedParameter(pub String);

impl ParameterProvider for FixedParameter {
    fn pattern_name(&self) -> &str {
        &self.0
    }
}
