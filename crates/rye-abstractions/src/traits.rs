use std::{
    collections::{btree_map, BTreeMap},
    fmt,
    iter::FromIterator,
    sync::Arc,
};

/// The trait values attached to a test case.
///
/// This is a frozen view: once built there is no way to insert or remove
/// an entry, so a `Traits` can be handed to any number of readers (and
/// threads) without copying. Cloning only bumps a reference count.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Traits {
    inner: Arc<BTreeMap<String, String>>,
}

impl Traits {
    /// Create an empty set of traits.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value associated with `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    /// Return whether the pair `name = value` is present.
    pub fn contains(&self, name: &str, value: &str) -> bool {
        self.get(name).map_or(false, |v| v == value)
    }

    /// Iterate over the `(name, value)` pairs, ordered by name.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.inner.iter(),
        }
    }

    /// Return the number of traits.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Return whether no trait is attached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Traits
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let map: BTreeMap<String, String> = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            inner: Arc::new(map),
        }
    }
}

impl fmt::Debug for Traits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Traits {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of [`Traits`].
#[derive(Debug)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// The error from parsing a `name=value` trait expression.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TraitParseError {
    /// The expression did not contain `=`.
    #[error("trait expression must be of the form name=value (was {0:?})")]
    MissingSeparator(String),

    /// The part before `=` was empty.
    #[error("trait name must not be empty (was {0:?})")]
    EmptyName(String),
}

/// Parse a trait expression of the form `name=value`.
///
/// Surrounding whitespace of both parts is trimmed. The value may be empty.
pub fn parse_trait(expr: &str) -> Result<(String, String), TraitParseError> {
    let mut parts = expr.splitn(2, '=');
    let name = parts.next().unwrap_or("").trim();
    let value = match parts.next() {
        Some(value) => value.trim(),
        None => return Err(TraitParseError::MissingSeparator(expr.to_owned())),
    };
    if name.is_empty() {
        return Err(TraitParseError::EmptyName(expr.to_owned()));
    }
    Ok((name.to_owned(), value.to_owned()))
}
