use crate::test_case::TestCase;
use std::collections::{BTreeMap, BTreeSet};

/// Selects test cases by name, class, method and trait.
///
/// An empty filter selects everything. Trait names are compared without
/// regard to ASCII case; trait values, class names and method names are
/// compared exactly.
#[derive(Debug, Clone, Default)]
pub struct TestFilter {
    /// Only display names matching this pattern are selected.
    pub pattern: Option<String>,
    /// Match `pattern` and `skip_patterns` exactly rather than by substring.
    pub exact: bool,
    /// Display names matching any of these patterns are rejected.
    pub skip_patterns: Vec<String>,
    /// If not empty, only test cases of these classes are selected.
    pub classes: BTreeSet<String>,
    /// If not empty, only these `Class.method` names are selected.
    ///
    /// A leading and/or trailing `*` matches any suffix/prefix.
    pub methods: BTreeSet<String>,
    include_traits: BTreeMap<String, BTreeSet<String>>,
    exclude_traits: BTreeMap<String, BTreeSet<String>>,
}

impl TestFilter {
    /// Create a filter selecting every test case.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the trait `name = value`.
    ///
    /// When several include traits are given, a test case is selected if it
    /// carries any one of them.
    pub fn include_trait(&mut self, name: &str, value: &str) -> &mut Self {
        self.include_traits
            .entry(name.to_ascii_lowercase())
            .or_default()
            .insert(value.to_owned());
        self
    }

    /// Reject test cases carrying the trait `name = value`.
    pub fn exclude_trait(&mut self, name: &str, value: &str) -> &mut Self {
        self.exclude_traits
            .entry(name.to_ascii_lowercase())
            .or_default()
            .insert(value.to_owned());
        self
    }

    /// Return whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
            && self.skip_patterns.is_empty()
            && self.classes.is_empty()
            && self.methods.is_empty()
            && self.include_traits.is_empty()
            && self.exclude_traits.is_empty()
    }

    /// Return whether `test` is selected by this filter.
    pub fn matches(&self, test: &dyn TestCase) -> bool {
        let name = test.display_name();

        if let Some(ref pattern) = self.pattern {
            if !self.matches_pattern(name, pattern) {
                return false;
            }
        }

        if self
            .skip_patterns
            .iter()
            .any(|pattern| self.matches_pattern(name, pattern))
        {
            return false;
        }

        if !self.classes.is_empty() && !self.classes.contains(test.class_name()) {
            return false;
        }

        if !self.methods.is_empty() {
            let full_name = format!("{}.{}", test.class_name(), test.method_name());
            if !self
                .methods
                .iter()
                .any(|pattern| matches_wildcard(pattern, &full_name))
            {
                return false;
            }
        }

        if !self.include_traits.is_empty() && !has_any_trait(test, &self.include_traits) {
            return false;
        }

        if has_any_trait(test, &self.exclude_traits) {
            return false;
        }

        true
    }

    fn matches_pattern(&self, name: &str, pattern: &str) -> bool {
        if self.exact {
            name == pattern
        } else {
            name.contains(pattern)
        }
    }
}

fn has_any_trait(test: &dyn TestCase, wanted: &BTreeMap<String, BTreeSet<String>>) -> bool {
    test.traits().iter().any(|(name, value)| {
        wanted
            .get(&name.to_ascii_lowercase())
            .map_or(false, |values| values.contains(value))
    })
}

fn matches_wildcard(pattern: &str, name: &str) -> bool {
    let starts = pattern.starts_with('*');
    let ends = pattern.len() > 1 && pattern.ends_with('*');
    let core = pattern
        .trim_start_matches('*')
        .trim_end_matches('*');
    match (starts, ends) {
        (false, false) => name == pattern,
        (true, false) => name.ends_with(core),
        (false, true) => name.starts_with(core),
        (true, true) => name.contains(core),
    }
}
