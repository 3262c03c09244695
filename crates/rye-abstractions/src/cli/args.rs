use crate::{
    builder::{DiscoveryOptions, MethodDisplay},
    cli::exit_status::ExitStatus,
    filter::TestFilter,
    traits::parse_trait,
};
use getopts::Options;
use std::{error::Error, path::Path, str::FromStr};

/// Command line arguments.
#[derive(Debug, Clone)]
pub struct Args {
    /// Which test cases are listed.
    pub filter: TestFilter,
    /// How test cases are discovered.
    pub discovery: DiscoveryOptions,
    /// Coloring of the console output.
    pub color: ColorConfig,
    /// Shape of the console output.
    pub format: OutputFormat,
    /// Print collection, source and traits below each test case.
    pub verbose: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            filter: TestFilter::default(),
            discovery: DiscoveryOptions::default(),
            color: ColorConfig::Auto,
            format: OutputFormat::Pretty,
            verbose: false,
        }
    }
}

impl Args {
    /// Parse command line arguments.
    pub fn from_env() -> Result<Self, ExitStatus> {
        let args: Vec<_> = std::env::args().collect();
        Self::from_args(&args)
    }

    /// Parse the given arguments; the first one is the program name.
    ///
    /// Help requests print the usage and return `Err(ExitStatus::OK)`.
    pub fn from_args(args: &[String]) -> Result<Self, ExitStatus> {
        let parser = Parser::new(args);
        match parser.parse() {
            Ok(Some(args)) => Ok(args),
            Ok(None) => {
                parser.print_usage();
                Err(ExitStatus::OK)
            }
            Err(err) => {
                eprintln!("CLI argument error: {}", err);
                Err(ExitStatus::FAILED)
            }
        }
    }
}

/// The color configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum ColorConfig {
    /// Colorize if stdout is a tty.
    Auto,
    /// Always colorize.
    Always,
    /// Never colorize.
    Never,
}

impl FromStr for ColorConfig {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ColorConfig::Auto),
            "always" => Ok(ColorConfig::Always),
            "never" => Ok(ColorConfig::Never),
            v => Err(format!(
                "argument for --color must be auto, always, or never (was {})",
                v
            )
            .into()),
        }
    }
}

/// The output format.
#[derive(Copy, Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// Test case lines followed by a summary.
    Pretty,
    /// Test case lines only.
    Terse,
}

impl FromStr for OutputFormat {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(OutputFormat::Pretty),
            "terse" => Ok(OutputFormat::Terse),
            v => Err(format!(
                "argument for --format must be pretty or terse (was {})",
                v
            )
            .into()),
        }
    }
}

struct Parser<'a> {
    args: &'a [String],
    opts: Options,
}

impl<'a> Parser<'a> {
    fn new(args: &'a [String]) -> Self {
        let mut opts = Options::new();
        opts.optflag("h", "help", "Display this message");
        opts.optflag("", "list", "List all tests (the default action)");
        opts.optflag(
            "",
            "exact",
            "Exactly match filters rather than by substring",
        );
        opts.optmulti(
            "",
            "skip",
            "Skip tests whose names contain FILTER (this flag can be used multiple times)",
            "FILTER",
        );
        opts.optmulti(
            "",
            "class",
            "Only list tests in the given fully qualified class (can be used multiple times)",
            "CLASS",
        );
        opts.optmulti(
            "",
            "method",
            "Only list the given Class.method; '*' at either end is a wildcard (can be used multiple times)",
            "METHOD",
        );
        opts.optmulti(
            "",
            "trait",
            "Only list tests with the given trait; any of several matches (can be used multiple times)",
            "NAME=VALUE",
        );
        opts.optmulti(
            "",
            "notrait",
            "Do not list tests with the given trait (can be used multiple times)",
            "NAME=VALUE",
        );
        opts.optflag(
            "",
            "source-info",
            "Attach source file names and lines to the discovered tests",
        );
        opts.optopt(
            "",
            "method-display",
            "Configure the default display name of tests:
                class  = Class.method (default);
                method = method only;",
            "class|method",
        );
        opts.optopt(
            "",
            "color",
            "Configure coloring of output:
                auto   = colorize if stdout is a tty (default);
                always = always colorize output;
                never  = never colorize output;",
            "auto|always|never",
        );
        opts.optopt(
            "",
            "format",
            "Configure formatting of output:
                pretty = print the list and a summary (default);
                terse  = print the list only;",
            "pretty|terse",
        );
        opts.optflag("v", "verbose", "Print collection, source and traits of each test");

        // The following options and flags are reserved for keeping the compatibility with
        // the built-in test harness.
        opts.optflag("", "ignored", "");
        opts.optflag("", "test", "");
        opts.optflag("", "bench", "");
        opts.optflag("", "nocapture", "");
        opts.optflag("q", "quiet", "");
        opts.optopt("", "logfile", "", "PATH");
        opts.optopt("", "test-threads", "", "n_threads");
        opts.optopt("Z", "", "", "unstable-options");

        Self { args, opts }
    }

    fn print_usage(&self) {
        let binary = self.args.get(0).map_or("<test binary>", String::as_str);
        let progname = Path::new(binary)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(binary);

        let message = format!("Usage: {} [OPTIONS] [FILTER]", progname);
        eprintln!(
            r#"{usage}
The FILTER string is tested against the display name of all tests, and only
those tests whose names contain the filter are listed."#,
            usage = self.opts.usage(&message)
        );
    }

    fn parse(&self) -> Result<Option<Args>, Box<dyn Error>> {
        let args = &self.args[..];

        let matches = self.opts.parse(args.get(1..).unwrap_or(args))?;
        if matches.opt_present("h") {
            return Ok(None);
        }

        let mut filter = TestFilter::new();
        filter.pattern = matches.free.get(0).cloned();
        filter.exact = matches.opt_present("exact");
        filter.skip_patterns = matches.opt_strs("skip");
        filter.classes = matches.opt_strs("class").into_iter().collect();
        filter.methods = matches.opt_strs("method").into_iter().collect();
        for expr in matches.opt_strs("trait") {
            let (name, value) = parse_trait(&expr)?;
            filter.include_trait(&name, &value);
        }
        for expr in matches.opt_strs("notrait") {
            let (name, value) = parse_trait(&expr)?;
            filter.exclude_trait(&name, &value);
        }

        let discovery = DiscoveryOptions {
            include_source_information: matches.opt_present("source-info"),
            method_display: matches
                .opt_get::<MethodDisplay>("method-display")?
                .unwrap_or_default(),
        };

        let color = matches.opt_get::<ColorConfig>("color")?.unwrap_or(ColorConfig::Auto);
        let format = if matches.opt_present("quiet") {
            OutputFormat::Terse
        } else {
            matches.opt_get::<OutputFormat>("format")?.unwrap_or(OutputFormat::Pretty)
        };
        let verbose = matches.opt_present("verbose");

        Ok(Some(Args {
            filter,
            discovery,
            color,
            format,
            verbose,
        }))
    }
}
