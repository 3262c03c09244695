use crate::{
    builder::DiscoveryOptions,
    cli::{Args, ExitStatus},
    filter::TestFilter,
    registry::Registry,
    report::{ConsoleReporter, LogReporter, Reporter, Summary},
    test_case::TestCase,
};
use anyhow::Context as _;
use std::fmt;

/// A listing session driven by command line arguments.
///
/// The session owns the configuration; callers discover their test cases
/// with [`discovery_options`](Self::discovery_options) and hand them to
/// [`run`](Self::run).
pub struct Session {
    args: Args,
    reporters: Vec<Box<dyn Reporter>>,
}

impl Session {
    /// Create a session from the process arguments.
    ///
    /// Exits the process if the arguments are invalid or help was requested.
    pub fn from_env() -> Self {
        let args = Args::from_env().unwrap_or_else(|st| st.exit());
        Self::new(args)
    }

    /// Create a session reporting to the console and to the `log` facade.
    pub fn new(args: Args) -> Self {
        let console = ConsoleReporter::new(&args);
        Self {
            args,
            reporters: vec![Box::new(console), Box::new(LogReporter::new())],
        }
    }

    /// Create a session reporting only to `reporter`.
    pub fn with_reporter<R>(args: Args, reporter: R) -> Self
    where
        R: Reporter + 'static,
    {
        Self {
            args,
            reporters: vec![Box::new(reporter)],
        }
    }

    /// Add another reporter.
    pub fn add_reporter<R>(&mut self, reporter: R) -> &mut Self
    where
        R: Reporter + 'static,
    {
        self.reporters.push(Box::new(reporter));
        self
    }

    /// Return the parsed arguments.
    #[inline]
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Return the options test cases should be discovered with.
    #[inline]
    pub fn discovery_options(&self) -> &DiscoveryOptions {
        &self.args.discovery
    }

    /// Return the filter selecting the listed test cases.
    #[inline]
    pub fn filter(&self) -> &TestFilter {
        &self.args.filter
    }

    /// Register, filter and report `tests`.
    pub fn run<I, T>(&self, tests: I) -> ExitStatus
    where
        I: IntoIterator<Item = T>,
        T: TestCase + 'static,
    {
        match self.try_run(tests) {
            Ok(..) => ExitStatus::OK,
            Err(err) => {
                log::error!("{:#}", err);
                eprintln!("registry error: {:#}", err);
                ExitStatus::FAILED
            }
        }
    }

    /// Register, filter and report `tests`, returning the totals.
    pub fn try_run<I, T>(&self, tests: I) -> anyhow::Result<Summary>
    where
        I: IntoIterator<Item = T>,
        T: TestCase + 'static,
    {
        let mut registry = Registry::new(&self.args.filter);
        for test in tests {
            let name = test.display_name().to_owned();
            registry
                .add_test_case(test)
                .with_context(|| format!("failed to register '{}'", name))?;
        }
        let discovered = registry.finish();

        for reporter in &self.reporters {
            reporter.discovery_starting(&discovered.pending);
        }
        for test in &discovered.pending {
            for reporter in &self.reporters {
                reporter.test_case_discovered(&**test);
            }
        }

        let summary = Summary::new(&discovered);
        for reporter in &self.reporters {
            reporter.discovery_ended(&summary);
        }

        Ok(summary)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("args", &self.args)
            .field("reporters", &self.reporters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::TestCaseBuilder,
        collection::CollectionCatalog,
        report::LogReporter,
        test_case::TestCaseDesc,
    };
    use std::{cell::RefCell, rc::Rc, sync::Arc};

    thread_local! {
        static LOG_LINES: RefCell<Vec<String>> = RefCell::new(vec![]);
    }

    struct ThreadLogger;

    impl log::Log for ThreadLogger {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            LOG_LINES.with(|lines| {
                lines
                    .borrow_mut()
                    .push(format!("{} {}", record.level(), record.args()))
            });
        }

        fn flush(&self) {}
    }

    static LOGGER: ThreadLogger = ThreadLogger;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl Reporter for Recorder {
        fn discovery_starting(&self, tests: &[Arc<dyn TestCase>]) {
            self.events
                .borrow_mut()
                .push(format!("starting {}", tests.len()));
        }

        fn test_case_discovered(&self, test: &dyn TestCase) {
            self.events
                .borrow_mut()
                .push(format!("case {}", test.display_name()));
        }

        fn discovery_ended(&self, summary: &Summary) {
            self.events.borrow_mut().push(format!(
                "ended {}/{}/{}",
                summary.pending, summary.skipped, summary.filtered_out
            ));
        }
    }

    fn cases(options: &DiscoveryOptions) -> Vec<TestCaseDesc> {
        let mut catalog = CollectionCatalog::new();
        vec![
            TestCaseBuilder::new("AddTests", "adds", catalog.for_class("AddTests"))
                .trait_("category", "smoke")
                .build(options)
                .unwrap(),
            TestCaseBuilder::new("AddTests", "adds_slowly", catalog.for_class("AddTests"))
                .trait_("category", "slow")
                .skip("Flaky on CI")
                .build(options)
                .unwrap(),
            TestCaseBuilder::new("SubTests", "subtracts", catalog.for_class("SubTests"))
                .build(options)
                .unwrap(),
        ]
    }

    #[test]
    fn reports_selected_cases() {
        let mut args = Args::default();
        args.filter.exclude_trait("category", "smoke");
        let recorder = Rc::new(Recorder::default());
        let session = Session::with_reporter(args, recorder.clone());

        let summary = session.try_run(cases(session.discovery_options())).unwrap();
        assert_eq!(
            summary,
            Summary {
                pending: 2,
                skipped: 1,
                filtered_out: 1,
            }
        );
        assert_eq!(
            *recorder.events.borrow(),
            vec![
                "starting 2",
                "case AddTests.adds_slowly",
                "case SubTests.subtracts",
                "ended 2/1/1",
            ]
        );
    }

    #[test]
    fn log_reporter_records_every_event() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);

        let session = Session::with_reporter(Args::default(), LogReporter::new());
        let summary = session.try_run(cases(session.discovery_options())).unwrap();
        assert_eq!(summary.runnable(), 2);

        let lines = LOG_LINES.with(|lines| lines.borrow().clone());
        let info: Vec<_> = lines
            .iter()
            .map(String::as_str)
            .filter(|l| l.starts_with("INFO "))
            .collect();
        assert_eq!(
            info,
            vec![
                "INFO discovered 3 tests",
                "INFO AddTests.adds: test",
                "INFO AddTests.adds_slowly: skipped (Flaky on CI)",
                "INFO SubTests.subtracts: test",
                "INFO discovery finished: 3 pending, 1 skipped, 0 filtered out",
            ]
        );
        assert!(lines
            .iter()
            .any(|l| l.starts_with("DEBUG AddTests.adds: class=AddTests method=adds")));
    }

    #[test]
    fn conflicts_fail_the_session() {
        let recorder = Rc::new(Recorder::default());
        let session = Session::with_reporter(Args::default(), recorder.clone());
        let mut tests = cases(session.discovery_options());
        tests.push(tests[0].clone());

        assert_eq!(session.run(tests), ExitStatus::FAILED);
        assert!(recorder.events.borrow().is_empty());
    }
}
