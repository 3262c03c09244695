use crate::{
    collection::TestCollection,
    reflect::{MethodInfo, TypeInfo},
    traits::Traits,
};
use std::{
    fmt,
    sync::{Arc, Weak},
};

/// A single test case.
///
/// This usually represents a single test, but a data driven test case may
/// produce several results when it is run. Every accessor is a cheap read:
/// implementations must not mutate state behind them.
pub trait TestCase: Send + Sync {
    /// Return the type this test case resides in, if it is known.
    ///
    /// Test cases discovered without runtime type information always
    /// return `None`, as do test cases whose type registry was dropped.
    #[deprecated(note = "use `class_name` instead")]
    fn class(&self) -> Option<Arc<TypeInfo>>;

    /// Return the fully qualified name of the type this test case resides in.
    fn class_name(&self) -> &str;

    /// Return the name used to display this test case.
    fn display_name(&self) -> &str;

    /// Return the method this test case resides in, if it is known.
    #[deprecated(note = "use `method_name` instead")]
    fn method(&self) -> Option<Arc<MethodInfo>>;

    /// Return the name of the method this test case resides in.
    fn method_name(&self) -> &str;

    /// Return the reason this test case is skipped.
    ///
    /// `None` means the test case will be run.
    fn skip_reason(&self) -> Option<&str>;

    /// Return the line where the test case is defined, if requested and known.
    fn source_file_line(&self) -> Option<u32>;

    /// Return the file where the test case is defined, if requested and known.
    fn source_file_name(&self) -> Option<&str>;

    /// Return the collection this test case belongs to.
    fn test_collection(&self) -> &dyn TestCollection;

    /// Return the traits associated with this test case.
    ///
    /// Empty when there are none.
    fn traits(&self) -> &Traits;

    /// Return whether this test case is skipped.
    #[inline]
    fn is_skipped(&self) -> bool {
        self.skip_reason().is_some()
    }
}

impl<T: ?Sized> TestCase for &T
where
    T: TestCase,
{
    impl_test_case_body!();
}

impl<T: ?Sized> TestCase for Box<T>
where
    T: TestCase,
{
    impl_test_case_body!();
}

impl<T: ?Sized> TestCase for Arc<T>
where
    T: TestCase,
{
    impl_test_case_body!();
}

/// The immutable description of a test case produced by discovery.
///
/// Built with [`TestCaseBuilder`](crate::TestCaseBuilder).
#[derive(Clone)]
pub struct TestCaseDesc {
    pub(crate) class: Option<Weak<TypeInfo>>,
    pub(crate) class_name: String,
    pub(crate) display_name: String,
    pub(crate) method: Option<Weak<MethodInfo>>,
    pub(crate) method_name: String,
    pub(crate) skip_reason: Option<String>,
    pub(crate) source_file_line: Option<u32>,
    pub(crate) source_file_name: Option<String>,
    pub(crate) test_collection: Arc<dyn TestCollection>,
    pub(crate) traits: Traits,
}

impl TestCaseDesc {
    /// Return a shared handle to the collection of this test case.
    #[inline]
    pub fn collection(&self) -> &Arc<dyn TestCollection> {
        &self.test_collection
    }
}

impl TestCase for TestCaseDesc {
    fn class(&self) -> Option<Arc<TypeInfo>> {
        self.class.as_ref().and_then(Weak::upgrade)
    }

    #[inline]
    fn class_name(&self) -> &str {
        &self.class_name
    }

    #[inline]
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn method(&self) -> Option<Arc<MethodInfo>> {
        self.method.as_ref().and_then(Weak::upgrade)
    }

    #[inline]
    fn method_name(&self) -> &str {
        &self.method_name
    }

    #[inline]
    fn skip_reason(&self) -> Option<&str> {
        self.skip_reason.as_deref()
    }

    #[inline]
    fn source_file_line(&self) -> Option<u32> {
        self.source_file_line
    }

    #[inline]
    fn source_file_name(&self) -> Option<&str> {
        self.source_file_name.as_deref()
    }

    #[inline]
    fn test_collection(&self) -> &dyn TestCollection {
        &*self.test_collection
    }

    #[inline]
    fn traits(&self) -> &Traits {
        &self.traits
    }
}

impl fmt::Debug for TestCaseDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCaseDesc")
            .field("class_name", &self.class_name)
            .field("method_name", &self.method_name)
            .field("display_name", &self.display_name)
            .field("skip_reason", &self.skip_reason)
            .field("source_file_name", &self.source_file_name)
            .field("source_file_line", &self.source_file_line)
            .field("test_collection", &self.test_collection.display_name())
            .field("traits", &self.traits)
            .finish()
    }
}

impl fmt::Debug for dyn TestCase + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("class_name", &self.class_name())
            .field("method_name", &self.method_name())
            .field("display_name", &self.display_name())
            .finish()
    }
}
