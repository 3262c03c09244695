use crate::{filter::TestFilter, test_case::TestCase};
use std::{collections::HashSet, sync::Arc};

/// The error from registering a test case.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Another test case with the same class, method and display name exists.
    #[error("the test case '{display_name}' ({class_name}.{method_name}) is conflicted")]
    Conflict {
        /// The class name of the rejected test case.
        class_name: String,
        /// The method name of the rejected test case.
        method_name: String,
        /// The display name of the rejected test case.
        display_name: String,
    },
}

/// The outcome of registering all discovered test cases.
#[derive(Debug, Default)]
pub struct Discovered {
    /// Test cases selected by the filter, sorted by display name.
    pub pending: Vec<Arc<dyn TestCase>>,
    /// Test cases rejected by the filter.
    pub filtered_out: Vec<Arc<dyn TestCase>>,
}

/// Collects discovered test cases and partitions them by a filter.
#[derive(Debug)]
pub struct Registry<'a> {
    filter: &'a TestFilter,
    pending: Vec<Arc<dyn TestCase>>,
    filtered_out: Vec<Arc<dyn TestCase>>,
    unique_keys: HashSet<(String, String, String)>,
}

impl<'a> Registry<'a> {
    /// Create an empty registry selecting with `filter`.
    pub fn new(filter: &'a TestFilter) -> Self {
        Self {
            filter,
            pending: vec![],
            filtered_out: vec![],
            unique_keys: HashSet::new(),
        }
    }

    /// Register a test case.
    ///
    /// A test case is identified by its class name, method name and display
    /// name together, so data driven cases of one method can coexist.
    pub fn add_test_case<T>(&mut self, test: T) -> Result<(), RegistryError>
    where
        T: TestCase + 'static,
    {
        self.add_shared(Arc::new(test))
    }

    /// Register a test case that is already shared.
    pub fn add_shared(&mut self, test: Arc<dyn TestCase>) -> Result<(), RegistryError> {
        let key = (
            test.class_name().to_owned(),
            test.method_name().to_owned(),
            test.display_name().to_owned(),
        );
        if !self.unique_keys.insert(key) {
            log::warn!("the test case '{}' is conflicted", test.display_name());
            return Err(RegistryError::Conflict {
                class_name: test.class_name().to_owned(),
                method_name: test.method_name().to_owned(),
                display_name: test.display_name().to_owned(),
            });
        }

        if self.filter.matches(&*test) {
            log::debug!("registered: {}", test.display_name());
            self.pending.push(test);
        } else {
            log::debug!("filtered out: {}", test.display_name());
            self.filtered_out.push(test);
        }

        Ok(())
    }

    /// Return the number of registered test cases.
    pub fn len(&self) -> usize {
        self.pending.len() + self.filtered_out.len()
    }

    /// Return whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finish registration.
    pub fn finish(self) -> Discovered {
        let mut pending = self.pending;
        // sort test cases by name.
        pending.sort_by(|t1, t2| t1.display_name().cmp(t2.display_name()));
        Discovered {
            pending,
            filtered_out: self.filtered_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::{DiscoveryOptions, TestCaseBuilder},
        collection::CollectionCatalog,
    };

    fn build(catalog: &mut CollectionCatalog, class_name: &str, method_name: &str) -> TestCaseBuilder {
        TestCaseBuilder::new(class_name, method_name, catalog.for_class(class_name))
    }

    #[test]
    fn partitions_and_sorts() {
        let mut filter = TestFilter::new();
        filter.skip_patterns.push("slow".into());

        let mut catalog = CollectionCatalog::new();
        let options = DiscoveryOptions::default();
        let mut registry = Registry::new(&filter);
        for method in &["zeta", "alpha", "slow_one", "beta"] {
            let case = build(&mut catalog, "Suite", method).build(&options).unwrap();
            registry.add_test_case(case).unwrap();
        }
        assert_eq!(registry.len(), 4);

        let discovered = registry.finish();
        let names: Vec<_> = discovered
            .pending
            .iter()
            .map(|t| t.display_name().to_owned())
            .collect();
        assert_eq!(names, vec!["Suite.alpha", "Suite.beta", "Suite.zeta"]);
        assert_eq!(discovered.filtered_out.len(), 1);
        assert_eq!(discovered.filtered_out[0].method_name(), "slow_one");
    }

    #[test]
    fn rejects_conflicts() {
        let filter = TestFilter::new();
        let mut catalog = CollectionCatalog::new();
        let options = DiscoveryOptions::default();
        let mut registry = Registry::new(&filter);

        registry
            .add_test_case(build(&mut catalog, "Suite", "adds").build(&options).unwrap())
            .unwrap();
        let err = registry
            .add_test_case(build(&mut catalog, "Suite", "adds").build(&options).unwrap())
            .unwrap_err();
        assert!(matches!(err, RegistryError::Conflict { ref method_name, .. } if method_name == "adds"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn data_driven_cases_coexist() {
        let filter = TestFilter::new();
        let mut catalog = CollectionCatalog::new();
        let options = DiscoveryOptions::default();
        let mut registry = Registry::new(&filter);

        for x in &["1", "2"] {
            let case = build(&mut catalog, "Suite", "adds")
                .argument("x", *x)
                .build(&options)
                .unwrap();
            registry.add_test_case(case).unwrap();
        }
        assert_eq!(registry.finish().pending.len(), 2);
    }
}
