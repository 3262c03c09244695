/*!
Test case metadata shared between the parts of a test framework.

A [`TestCase`] describes one discoverable test: the names of its owning class
and method, how it is displayed, why it is skipped (if it is), where it is
defined, which [`TestCollection`] it belongs to and which [`Traits`] tag it.
Discovery produces these descriptors through [`TestCaseBuilder`], and the
consumers in this crate ([`TestFilter`], [`Registry`], the reporters and the
listing [`Session`]) only ever read them.
!*/

#![doc(html_root_url = "https://docs.rs/rye-abstractions/0.1.0-dev")]
#![deny(missing_docs)]
#![forbid(clippy::unimplemented, clippy::todo)]

#[macro_use]
mod macros;
mod builder;
mod cli;
mod collection;
mod filter;
mod reflect;
mod registry;
mod report;
mod session;
mod source;
mod test_case;
mod traits;

pub use crate::{
    builder::{BuildError, DiscoveryOptions, MethodDisplay, TestCaseBuilder},
    cli::{Args, ColorConfig, ExitStatus, OutputFormat},
    collection::{CollectionCatalog, CollectionDesc, CollectionId, TestCollection},
    filter::TestFilter,
    reflect::{MethodInfo, TypeInfo, TypeRegistry},
    registry::{Discovered, Registry, RegistryError},
    report::{ConsoleReporter, LogReporter, Reporter, Summary},
    session::Session,
    source::{SourceInformation, SourceInformationProvider, StaticSourceProvider},
    test_case::{TestCase, TestCaseDesc},
    traits::{parse_trait, Iter as TraitsIter, TraitParseError, Traits},
};
