use super::{Reporter, Summary};
use crate::test_case::TestCase;
use std::sync::Arc;

/// Sends discovery events to the `log` facade.
#[derive(Debug, Clone)]
pub struct LogReporter {
    _p: (),
}

impl LogReporter {
    /// Create a new `LogReporter`.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self { _p: () }
    }
}

impl Reporter for LogReporter {
    fn discovery_starting(&self, tests: &[Arc<dyn TestCase>]) {
        let suffix = match tests.len() {
            1 => "",
            _ => "s",
        };
        log::info!("discovered {} test{}", tests.len(), suffix);
    }

    fn test_case_discovered(&self, test: &dyn TestCase) {
        match test.skip_reason() {
            Some(reason) => log::info!("{}: skipped ({})", test.display_name(), reason),
            None => log::info!("{}: test", test.display_name()),
        }
        log::debug!(
            "{}: class={} method={} collection={} traits={:?}",
            test.display_name(),
            test.class_name(),
            test.method_name(),
            test.test_collection().display_name(),
            test.traits(),
        );
    }

    fn discovery_ended(&self, summary: &Summary) {
        log::info!(
            "discovery finished: {} pending, {} skipped, {} filtered out",
            summary.pending,
            summary.skipped,
            summary.filtered_out
        );
    }
}
