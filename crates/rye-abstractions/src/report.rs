mod console;
mod log;

pub use self::{console::ConsoleReporter, log::LogReporter};

use crate::{registry::Discovered, test_case::TestCase};
use std::sync::Arc;

/// Totals of a discovery run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// The number of selected test cases, skipped ones included.
    pub pending: usize,
    /// The number of selected test cases that are skipped.
    pub skipped: usize,
    /// The number of test cases rejected by the filter.
    pub filtered_out: usize,
}

impl Summary {
    /// Count the test cases in `discovered`.
    pub fn new(discovered: &Discovered) -> Self {
        Self {
            pending: discovered.pending.len(),
            skipped: discovered
                .pending
                .iter()
                .filter(|test| test.is_skipped())
                .count(),
            filtered_out: discovered.filtered_out.len(),
        }
    }

    /// Return the number of selected test cases that will be run.
    #[inline]
    pub fn runnable(&self) -> usize {
        self.pending.saturating_sub(self.skipped)
    }
}

/// Receives the events of a discovery run.
pub trait Reporter {
    /// Called once with every selected test case before they are reported.
    fn discovery_starting(&self, tests: &[Arc<dyn TestCase>]);

    /// Called for each selected test case, in order.
    fn test_case_discovered(&self, test: &dyn TestCase);

    /// Called once at the end of the run.
    fn discovery_ended(&self, summary: &Summary);
}

macro_rules! impl_reporter_body {
    () => {
        fn discovery_starting(&self, tests: &[Arc<dyn TestCase>]) {
            (**self).discovery_starting(tests)
        }

        fn test_case_discovered(&self, test: &dyn TestCase) {
            (**self).test_case_discovered(test)
        }

        fn discovery_ended(&self, summary: &Summary) {
            (**self).discovery_ended(summary)
        }
    };
}

impl<R: ?Sized> Reporter for &R
where
    R: Reporter,
{
    impl_reporter_body!();
}

impl<R: ?Sized> Reporter for Box<R>
where
    R: Reporter,
{
    impl_reporter_body!();
}

impl<R: ?Sized> Reporter for std::rc::Rc<R>
where
    R: Reporter,
{
    impl_reporter_body!();
}

impl<R: ?Sized> Reporter for Arc<R>
where
    R: Reporter,
{
    impl_reporter_body!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::{DiscoveryOptions, TestCaseBuilder},
        collection::CollectionDesc,
    };

    #[test]
    fn summary_counts() {
        let collection: Arc<CollectionDesc> = Arc::new(CollectionDesc::new("c"));
        let options = DiscoveryOptions::default();
        let make = |name: &str, skip: Option<&str>| -> Arc<dyn TestCase> {
            let mut builder = TestCaseBuilder::new("Suite", name, collection.clone());
            if let Some(reason) = skip {
                builder = builder.skip(reason);
            }
            Arc::new(builder.build(&options).unwrap())
        };

        let discovered = Discovered {
            pending: vec![make("a", None), make("b", Some("Flaky on CI"))],
            filtered_out: vec![make("c", None)],
        };
        let summary = Summary::new(&discovered);
        assert_eq!(
            summary,
            Summary {
                pending: 2,
                skipped: 1,
                filtered_out: 1,
            }
        );
        assert_eq!(summary.runnable(), 1);
    }

    #[test]
    fn runnable_does_not_underflow() {
        let summary = Summary {
            pending: 0,
            skipped: 1,
            filtered_out: 0,
        };
        assert_eq!(summary.runnable(), 0);
    }
}
