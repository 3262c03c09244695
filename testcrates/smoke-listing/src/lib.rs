//! A small suite of test cases, discovered the way a framework front-end would.

use rye_abstractions::{
    source_location, BuildError, CollectionCatalog, CollectionDesc, DiscoveryOptions,
    TestCaseBuilder, TestCaseDesc,
};
use std::sync::Arc;

/// Discover the calculator suite.
pub fn discover(options: &DiscoveryOptions) -> Result<Vec<TestCaseDesc>, BuildError> {
    let mut catalog = CollectionCatalog::new();
    let integration = Arc::new(CollectionDesc::new("Calculator integration"));

    let mut cases = vec![
        TestCaseBuilder::new(
            "Calculator.Tests.AddTests",
            "Add_TwoPositiveNumbers_ReturnsSum",
            catalog.for_class("Calculator.Tests.AddTests"),
        )
        .trait_("category", "smoke")
        .source(source_location!())
        .build(options)?,
        TestCaseBuilder::new(
            "Calculator.Tests.AddTests",
            "Add_Overflow_Wraps",
            catalog.for_class("Calculator.Tests.AddTests"),
        )
        .skip("Flaky on CI")
        .source(source_location!())
        .build(options)?,
        TestCaseBuilder::new(
            "Calculator.Tests.Integration",
            "Evaluates_Expression",
            integration,
        )
        .trait_("category", "slow")
        .build(options)?,
    ];

    for (x, y) in &[("1", "2"), ("-1", "1")] {
        cases.push(
            TestCaseBuilder::new(
                "Calculator.Tests.SubTests",
                "Sub_Theory",
                catalog.for_class("Calculator.Tests.SubTests"),
            )
            .argument("x", *x)
            .argument("y", *y)
            .build(options)?,
        );
    }

    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rye_abstractions::TestCase as _;

    #[test]
    fn suite_is_valid() {
        let cases = discover(&DiscoveryOptions::default()).unwrap();
        assert_eq!(cases.len(), 5);
        assert!(cases[0].test_collection() == cases[1].test_collection());
        assert_eq!(
            cases[3].display_name(),
            "Calculator.Tests.SubTests.Sub_Theory(x: 1, y: 2)"
        );
    }
}
