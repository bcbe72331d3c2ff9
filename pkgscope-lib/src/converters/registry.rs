use super::{
    Converter, EggInfoConverter, PipConverter, PipfileConverter, PipfileLockConverter, PyProjectConverter, SdistConverter,
    WheelConverter,
};
use core::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::Path;

/// Ordered collection of converters.
///
/// Probing goes in registration order, so earlier converters win when several accept a path.
#[derive(Default)]
pub struct ConverterRegistry {
    converters: Vec<Box<dyn Converter>>,
}

impl ConverterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in converter.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with(PyProjectConverter)
            .with(PipfileConverter)
            .with(PipfileLockConverter)
            .with(PipConverter)
            .with(EggInfoConverter)
            .with(SdistConverter)
            .with(WheelConverter)
    }

    /// Add a converter after the existing ones.
    #[must_use]
    pub fn with(mut self, converter: impl Converter + 'static) -> Self {
        self.register(Box::new(converter));
        self
    }

    pub fn register(&mut self, converter: Box<dyn Converter>) {
        self.converters.push(converter);
    }

    /// Converter registered under `format`.
    #[must_use]
    pub fn get(&self, format: &str) -> Option<&dyn Converter> {
        self.converters.iter().find(|c| c.format() == format).map(|c| &**c)
    }

    /// First converter, in registration order, that accepts `path`.
    #[must_use]
    pub fn find_for(&self, path: &Path) -> Option<&dyn Converter> {
        self.converters.iter().find(|c| c.can_parse(path)).map(|c| &**c)
    }

    /// Registered format names, in order.
    pub fn formats(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.converters.iter().map(|c| c.format())
    }
}

impl Debug for ConverterRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list().entries(self.formats()).finish()
    }
}
