use super::{Reporter, Summary};
use crate::{
    cli::{Args, ColorConfig, OutputFormat},
    test_case::TestCase,
};
use std::{
    fmt,
    io,
    sync::Arc,
};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

struct Colored<T> {
    val: T,
    spec: Option<ColorSpec>,
}

impl<T> Colored<T> {
    fn fg(mut self, color: Color) -> Self {
        self.spec
            .get_or_insert_with(ColorSpec::new)
            .set_fg(Some(color));
        self
    }

    fn fmt_colored<W: ?Sized>(&self, w: &mut W) -> io::Result<()>
    where
        T: fmt::Display,
        W: WriteColor,
    {
        if let Some(ref spec) = self.spec {
            w.set_color(spec)?;
        }
        write!(w, "{}", &self.val)?;
        if let Some(..) = self.spec {
            w.reset()?;
        }
        Ok(())
    }
}

fn colored<T>(val: T) -> Colored<T> {
    Colored { val, spec: None }
}

fn plural_suffix(n: usize) -> &'static str {
    match n {
        1 => "",
        _ => "s",
    }
}

/// Prints discovered test cases to the standard output.
///
/// The listing follows the format of the built-in test harness
/// (`<name>: test`), so existing tooling can parse it.
pub struct ConsoleReporter {
    stream: StandardStream,
    format: OutputFormat,
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a reporter configured by the command line arguments.
    pub fn new(args: &Args) -> Self {
        Self {
            stream: StandardStream::stdout(match args.color {
                ColorConfig::Auto => ColorChoice::Auto,
                ColorConfig::Always => ColorChoice::Always,
                ColorConfig::Never => ColorChoice::Never,
            }),
            format: args.format,
            verbose: args.verbose,
        }
    }
}

impl fmt::Debug for ConsoleReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleReporter")
            .field("format", &self.format)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl Reporter for ConsoleReporter {
    fn discovery_starting(&self, _: &[Arc<dyn TestCase>]) {}

    fn test_case_discovered(&self, test: &dyn TestCase) {
        let mut w = self.stream.lock();
        let _ = print_test_case(&mut w, test, self.verbose);
    }

    fn discovery_ended(&self, summary: &Summary) {
        let mut w = self.stream.lock();
        let _ = print_footer(&mut w, summary, self.format);
    }
}

fn print_footer<W: ?Sized>(w: &mut W, summary: &Summary, format: OutputFormat) -> io::Result<()>
where
    W: WriteColor,
{
    match format {
        OutputFormat::Terse => Ok(()),
        OutputFormat::Pretty => print_summary(w, summary),
    }
}

fn print_test_case<W: ?Sized>(w: &mut W, test: &dyn TestCase, verbose: bool) -> io::Result<()>
where
    W: WriteColor,
{
    write!(w, "{}: test", test.display_name())?;
    if let Some(reason) = test.skip_reason() {
        write!(w, " ")?;
        colored(format!("(skipped: {})", reason))
            .fg(Color::Yellow)
            .fmt_colored(w)?;
    }
    writeln!(w)?;

    if verbose {
        writeln!(w, "    collection: {}", test.test_collection().display_name())?;
        match (test.source_file_name(), test.source_file_line()) {
            (Some(file), Some(line)) => writeln!(w, "    source: {}:{}", file, line)?,
            (Some(file), None) => writeln!(w, "    source: {}", file)?,
            (None, Some(line)) => writeln!(w, "    source: <unknown>:{}", line)?,
            (None, None) => (),
        }
        for (name, value) in test.traits() {
            writeln!(w, "    trait: {}={}", name, value)?;
        }
    }

    Ok(())
}

fn print_summary<W: ?Sized>(w: &mut W, summary: &Summary) -> io::Result<()>
where
    W: WriteColor,
{
    if summary.pending != 0 {
        writeln!(w)?;
    }
    writeln!(
        w,
        "{pending} test{suffix}, {skipped} skipped, {filtered_out} filtered out",
        pending = summary.pending,
        suffix = plural_suffix(summary.pending),
        skipped = summary.skipped,
        filtered_out = summary.filtered_out,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        builder::{DiscoveryOptions, TestCaseBuilder},
        collection::CollectionDesc,
        source::SourceInformation,
    };
    use termcolor::NoColor;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut NoColor<Vec<u8>>) -> io::Result<()>,
    {
        let mut w = NoColor::new(vec![]);
        f(&mut w).unwrap();
        String::from_utf8(w.into_inner()).unwrap()
    }

    #[test]
    fn plain_line() {
        let case = TestCaseBuilder::new(
            "AddTests",
            "adds",
            Arc::new(CollectionDesc::new("Test collection for AddTests")),
        )
        .build(&DiscoveryOptions::default())
        .unwrap();

        let out = render(|w| print_test_case(w, &case, false));
        assert_eq!(out, "AddTests.adds: test\n");
    }

    #[test]
    fn skipped_verbose_line() {
        let options = DiscoveryOptions {
            include_source_information: true,
            ..DiscoveryOptions::default()
        };
        let case = TestCaseBuilder::new(
            "AddTests",
            "adds",
            Arc::new(CollectionDesc::new("Test collection for AddTests")),
        )
        .skip("Flaky on CI")
        .trait_("category", "smoke")
        .source(SourceInformation::new("add.rs", 4))
        .build(&options)
        .unwrap();

        let out = render(|w| print_test_case(w, &case, true));
        assert_eq!(
            out,
            "AddTests.adds: test (skipped: Flaky on CI)\n\
             \x20   collection: Test collection for AddTests\n\
             \x20   source: add.rs:4\n\
             \x20   trait: category=smoke\n"
        );
    }

    #[test]
    fn summary_line() {
        let out = render(|w| {
            print_summary(
                w,
                &Summary {
                    pending: 1,
                    skipped: 0,
                    filtered_out: 2,
                },
            )
        });
        assert_eq!(out, "\n1 test, 0 skipped, 2 filtered out\n");

        let out = render(|w| print_summary(w, &Summary::default()));
        assert_eq!(out, "0 tests, 0 skipped, 0 filtered out\n");
    }

    #[test]
    fn terse_format_omits_summary() {
        let summary = Summary {
            pending: 3,
            skipped: 1,
            filtered_out: 0,
        };
        let out = render(|w| print_footer(w, &summary, OutputFormat::Terse));
        assert_eq!(out, "");

        let out = render(|w| print_footer(w, &summary, OutputFormat::Pretty));
        assert_eq!(out, "\n3 tests, 1 skipped, 0 filtered out\n");
    }
}
