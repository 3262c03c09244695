use std::{collections::HashMap, fmt};

/// Where a test case is defined.
///
/// Both parts are optional: a provider may know the file without knowing
/// the line, or the other way around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceInformation {
    /// The name of the source file.
    pub file_name: Option<String>,
    /// The line number in the source file.
    pub line: Option<u32>,
}

impl SourceInformation {
    /// Create a location with both the file name and the line known.
    pub fn new(file_name: impl Into<String>, line: u32) -> Self {
        Self {
            file_name: Some(file_name.into()),
            line: Some(line),
        }
    }

    /// Return whether neither part is known.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.file_name.is_none() && self.line.is_none()
    }
}

impl fmt::Display for SourceInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file_name, self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{}", file, line),
            (Some(file), None) => f.write_str(file),
            (None, Some(line)) => write!(f, "<unknown>:{}", line),
            (None, None) => f.write_str("<unknown>"),
        }
    }
}

/// Look up the definition site of a test method.
///
/// Discovery consults a provider only when source information was
/// requested and the test case did not carry a location of its own.
pub trait SourceInformationProvider {
    /// Return the location of `class_name.method_name`, or `None` if unknown.
    fn source_information(&self, class_name: &str, method_name: &str)
        -> Option<SourceInformation>;
}

impl<P: ?Sized> SourceInformationProvider for &P
where
    P: SourceInformationProvider,
{
    fn source_information(
        &self,
        class_name: &str,
        method_name: &str,
    ) -> Option<SourceInformation> {
        (**self).source_information(class_name, method_name)
    }
}

/// A provider backed by a fixed table.
#[derive(Debug, Default)]
pub struct StaticSourceProvider {
    entries: HashMap<(String, String), SourceInformation>,
}

impl StaticSourceProvider {
    /// Create an empty table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the location of `class_name.method_name`.
    pub fn insert(
        &mut self,
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        info: SourceInformation,
    ) -> &mut Self {
        self.entries
            .insert((class_name.into(), method_name.into()), info);
        self
    }
}

impl SourceInformationProvider for StaticSourceProvider {
    fn source_information(
        &self,
        class_name: &str,
        method_name: &str,
    ) -> Option<SourceInformation> {
        self.entries
            .get(&(class_name.to_owned(), method_name.to_owned()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(SourceInformation::new("add.rs", 12).to_string(), "add.rs:12");
        assert_eq!(SourceInformation::default().to_string(), "<unknown>");
        let line_only = SourceInformation {
            file_name: None,
            line: Some(3),
        };
        assert_eq!(line_only.to_string(), "<unknown>:3");
    }

    #[test]
    fn static_provider_lookup() {
        let mut provider = StaticSourceProvider::new();
        provider.insert("AddTests", "adds", SourceInformation::new("add.rs", 7));

        assert_eq!(
            provider.source_information("AddTests", "adds"),
            Some(SourceInformation::new("add.rs", 7))
        );
        assert_eq!(provider.source_information("AddTests", "subtracts"), None);
    }

    #[test]
    fn location_macro_captures_this_file() {
        let info = crate::source_location!();
        assert!(info.file_name.as_deref().map_or(false, |f| f.ends_with("source.rs")));
        assert!(info.line.map_or(false, |line| line > 0));
    }
}
