use crate::{
    collection::TestCollection,
    reflect::{MethodInfo, TypeInfo},
    source::{SourceInformation, SourceInformationProvider},
    test_case::TestCaseDesc,
    traits::Traits,
};
use std::{
    str::FromStr,
    sync::{Arc, Weak},
};

/// How the default display name of a test case is formed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum MethodDisplay {
    /// `Class.method`
    ClassAndMethod,
    /// `method`
    Method,
}

impl Default for MethodDisplay {
    fn default() -> Self {
        MethodDisplay::ClassAndMethod
    }
}

impl FromStr for MethodDisplay {
    type Err = Box<dyn std::error::Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(MethodDisplay::ClassAndMethod),
            "method" => Ok(MethodDisplay::Method),
            v => Err(format!(
                "argument for --method-display must be class or method (was {})",
                v
            )
            .into()),
        }
    }
}

/// Settings applied while test cases are being discovered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Attach source file names and lines to the discovered test cases.
    pub include_source_information: bool,
    /// How default display names are formed.
    pub method_display: MethodDisplay,
}

/// The error from building an invalid test case.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuildError {
    /// The class name was empty.
    #[error("test case in method {method_name:?} has an empty class name")]
    EmptyClassName {
        /// The method name of the rejected test case.
        method_name: String,
    },

    /// The method name was empty.
    #[error("test case in class {class_name:?} has an empty method name")]
    EmptyMethodName {
        /// The class name of the rejected test case.
        class_name: String,
    },

    /// An explicit display name was empty.
    #[error("test case {class_name}.{method_name} has an empty display name")]
    EmptyDisplayName {
        /// The class name of the rejected test case.
        class_name: String,
        /// The method name of the rejected test case.
        method_name: String,
    },

    /// The test case was skipped without a reason.
    #[error("test case {class_name}.{method_name} is skipped without a reason")]
    EmptySkipReason {
        /// The class name of the rejected test case.
        class_name: String,
        /// The method name of the rejected test case.
        method_name: String,
    },
}

/// Produces [`TestCaseDesc`] values.
///
/// The class name, the method name and the collection are mandatory;
/// everything else is optional. A source location given through
/// [`source`](Self::source) is only kept when the discovery options
/// request source information.
#[derive(Debug)]
pub struct TestCaseBuilder {
    class_name: String,
    method_name: String,
    collection: Arc<dyn TestCollection>,
    display_name: Option<String>,
    arguments: Vec<(String, String)>,
    skip_reason: Option<String>,
    traits: Vec<(String, String)>,
    source: Option<SourceInformation>,
    class: Option<Weak<TypeInfo>>,
    method: Option<Weak<MethodInfo>>,
}

impl TestCaseBuilder {
    /// Start a test case declared as `class_name.method_name` in `collection`.
    pub fn new(
        class_name: impl Into<String>,
        method_name: impl Into<String>,
        collection: Arc<dyn TestCollection>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
            collection,
            display_name: None,
            arguments: vec![],
            skip_reason: None,
            traits: vec![],
            source: None,
            class: None,
            method: None,
        }
    }

    /// Override the display name.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Append a data argument, shown as `name: value` after the display name.
    pub fn argument(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }

    /// Mark the test case as skipped.
    pub fn skip(mut self, reason: impl Into<String>) -> Self {
        self.skip_reason = Some(reason.into());
        self
    }

    /// Attach a trait. A later trait with the same name replaces this one.
    pub fn trait_(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.traits.push((name.into(), value.into()));
        self
    }

    /// Attach several traits.
    pub fn traits<I, K, V>(mut self, traits: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.traits
            .extend(traits.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Record where the test case is defined.
    pub fn source(mut self, info: SourceInformation) -> Self {
        self.source = Some(info);
        self
    }

    /// Attach the live handle of the owning type.
    pub fn class_handle(mut self, class: &Arc<TypeInfo>) -> Self {
        self.class = Some(Arc::downgrade(class));
        self
    }

    /// Attach the live handle of the test method.
    pub fn method_handle(mut self, method: &Arc<MethodInfo>) -> Self {
        self.method = Some(Arc::downgrade(method));
        self
    }

    /// Finish the test case.
    pub fn build(self, options: &DiscoveryOptions) -> Result<TestCaseDesc, BuildError> {
        self.build_inner(options, None)
    }

    /// Finish the test case, asking `provider` for the source location if
    /// it was requested but not supplied.
    pub fn build_with_provider(
        self,
        options: &DiscoveryOptions,
        provider: &dyn SourceInformationProvider,
    ) -> Result<TestCaseDesc, BuildError> {
        self.build_inner(options, Some(provider))
    }

    fn build_inner(
        self,
        options: &DiscoveryOptions,
        provider: Option<&dyn SourceInformationProvider>,
    ) -> Result<TestCaseDesc, BuildError> {
        self.validate()?;

        let display_name = self.make_display_name(options.method_display);

        let source = if options.include_source_information {
            self.source.clone().or_else(|| {
                provider.and_then(|p| p.source_information(&self.class_name, &self.method_name))
            })
        } else {
            if self.source.is_some() {
                log::trace!(
                    "{}: source information was not requested; dropped",
                    display_name
                );
            }
            None
        };
        let source = source.unwrap_or_default();

        Ok(TestCaseDesc {
            class: self.class,
            class_name: self.class_name,
            display_name,
            method: self.method,
            method_name: self.method_name,
            skip_reason: self.skip_reason,
            source_file_line: source.line,
            source_file_name: source.file_name,
            test_collection: self.collection,
            traits: self.traits.into_iter().collect::<Traits>(),
        })
    }

    fn validate(&self) -> Result<(), BuildError> {
        if self.class_name.trim().is_empty() {
            return Err(BuildError::EmptyClassName {
                method_name: self.method_name.clone(),
            });
        }
        if self.method_name.trim().is_empty() {
            return Err(BuildError::EmptyMethodName {
                class_name: self.class_name.clone(),
            });
        }
        if self
            .display_name
            .as_ref()
            .map_or(false, |name| name.trim().is_empty())
        {
            return Err(BuildError::EmptyDisplayName {
                class_name: self.class_name.clone(),
                method_name: self.method_name.clone(),
            });
        }
        if self
            .skip_reason
            .as_ref()
            .map_or(false, |reason| reason.trim().is_empty())
        {
            return Err(BuildError::EmptySkipReason {
                class_name: self.class_name.clone(),
                method_name: self.method_name.clone(),
            });
        }
        Ok(())
    }

    fn make_display_name(&self, method_display: MethodDisplay) -> String {
        let mut name = match (&self.display_name, method_display) {
            (Some(name), _) => name.clone(),
            (None, MethodDisplay::ClassAndMethod) => {
                format!("{}.{}", self.class_name, self.method_name)
            }
            (None, MethodDisplay::Method) => self.method_name.clone(),
        };

        if !self.arguments.is_empty() {
            let arguments: Vec<_> = self
                .arguments
                .iter()
                .map(|(arg, value)| format!("{}: {}", arg, value))
                .collect();
            name.push('(');
            name.push_str(&arguments.join(", "));
            name.push(')');
        }

        name
    }
}
