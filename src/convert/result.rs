use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of a successful conversion, handed to whoever displays it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertResult {
    converter_name: String,
    original: String,
    output: String,
    metadata: BTreeMap<String, String>,
}

impl ConvertResult {
    pub fn new(
        converter_name: impl Into<String>,
        original: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            converter_name: converter_name.into(),
            original: original.into(),
            output: output.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Nest the converter name under a parent, e.g. "Temperature" -> "Simple.Temperature"
    pub fn with_name_prefix(mut self, prefix: &str) -> Self {
        self.converter_name = format!("{}.{}", prefix, self.converter_name);
        self
    }

    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = original.into();
        self
    }

    pub fn converter_name(&self) -> &str {
        &self.converter_name
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

/// What a converter made of a piece of text
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Matched(ConvertResult),
    NoMatch,
}

impl Conversion {
    pub fn is_match(&self) -> bool {
        matches!(self, Conversion::Matched(_))
    }

    pub fn into_result(self) -> Option<ConvertResult> {
        match self {
            Conversion::Matched(result) => Some(result),
            Conversion::NoMatch => None,
        }
    }

    pub fn map<F>(self, f: F) -> Conversion
    where
        F: FnOnce(ConvertResult) -> ConvertResult,
    {
        match self {
            Conversion::Matched(result) => Conversion::Matched(f(result)),
            Conversion::NoMatch => Conversion::NoMatch,
        }
    }
}

impl From<Option<ConvertResult>> for Conversion {
    fn from(result: Option<ConvertResult>) -> Self {
        match result {
            Some(result) => Conversion::Matched(result),
            None => Conversion::NoMatch,
        }
    }
}
