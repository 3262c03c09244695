use std::{
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

/// The identity of a test collection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionId(u64);

impl CollectionId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Return the raw value of this identifier.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A group of test cases.
///
/// A collection is shared by every test case belonging to it, and two
/// collections are the same exactly when their identifiers are.
pub trait TestCollection: Send + Sync {
    /// Return the identifier of this collection.
    fn unique_id(&self) -> CollectionId;

    /// Return the name used to display this collection.
    fn display_name(&self) -> &str;
}

impl PartialEq for dyn TestCollection + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.unique_id() == other.unique_id()
    }
}

impl Eq for dyn TestCollection + '_ {}

impl fmt::Debug for dyn TestCollection + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCollection")
            .field("unique_id", &self.unique_id())
            .field("display_name", &self.display_name())
            .finish()
    }
}

/// The default implementation of [`TestCollection`].
#[derive(Debug)]
pub struct CollectionDesc {
    id: CollectionId,
    display_name: String,
}

impl CollectionDesc {
    /// Create a collection with a fresh identifier.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            id: CollectionId::next(),
            display_name: display_name.into(),
        }
    }
}

impl TestCollection for CollectionDesc {
    #[inline]
    fn unique_id(&self) -> CollectionId {
        self.id
    }

    #[inline]
    fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Hands out one shared collection per class.
///
/// Test cases declared in the same class end up in the same collection
/// unless discovery assigns them elsewhere explicitly.
#[derive(Debug, Default)]
pub struct CollectionCatalog {
    per_class: HashMap<String, Arc<CollectionDesc>>,
}

impl CollectionCatalog {
    /// Create an empty catalog.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the default collection of `class_name`, creating it on first use.
    pub fn for_class(&mut self, class_name: &str) -> Arc<CollectionDesc> {
        if let Some(collection) = self.per_class.get(class_name) {
            return collection.clone();
        }
        let collection = Arc::new(CollectionDesc::new(format!(
            "Test collection for {}",
            class_name
        )));
        log::debug!(
            "created collection {} ({})",
            collection.display_name(),
            collection.unique_id()
        );
        self.per_class
            .insert(class_name.to_owned(), collection.clone());
        collection
    }

    /// Return the number of collections created so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.per_class.len()
    }

    /// Return whether no collection has been created yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.per_class.is_empty()
    }
}
