/// Capture the current source position as a `SourceInformation`.
///
/// The result is only attached to a test case when the discovery options
/// ask for source information.
#[macro_export]
macro_rules! source_location {
    () => {
        $crate::SourceInformation::new(::std::file!(), ::std::line!())
    };
}

/// Forward every `TestCase` accessor through a smart pointer.
macro_rules! impl_test_case_body {
    () => {
        #[allow(deprecated)]
        fn class(&self) -> Option<std::sync::Arc<crate::reflect::TypeInfo>> {
            (**self).class()
        }

        fn class_name(&self) -> &str {
            (**self).class_name()
        }

        fn display_name(&self) -> &str {
            (**self).display_name()
        }

        #[allow(deprecated)]
        fn method(&self) -> Option<std::sync::Arc<crate::reflect::MethodInfo>> {
            (**self).method()
        }

        fn method_name(&self) -> &str {
            (**self).method_name()
        }

        fn skip_reason(&self) -> Option<&str> {
            (**self).skip_reason()
        }

        fn source_file_line(&self) -> Option<u32> {
            (**self).source_file_line()
        }

        fn source_file_name(&self) -> Option<&str> {
            (**self).source_file_name()
        }

        fn test_collection(&self) -> &dyn crate::collection::TestCollection {
            (**self).test_collection()
        }

        fn traits(&self) -> &crate::traits::Traits {
            (**self).traits()
        }
    };
}
