//! Live handles to types and methods.
//!
//! These exist for discovery engines that work from runtime type
//! information. Test cases only keep weak references to them; the names
//! stored on the test case remain the canonical identity.

use std::{
    any::{self, TypeId},
    collections::HashMap,
    fmt,
    sync::{Arc, Weak},
};

/// Runtime information about a type owning test methods.
#[derive(Debug)]
pub struct TypeInfo {
    type_id: TypeId,
    name: String,
}

impl TypeInfo {
    /// Return the `TypeId` of the described type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Return the fully-qualified name of the described type.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return whether this describes `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

/// Runtime information about a test method.
pub struct MethodInfo {
    owner: Weak<TypeInfo>,
    owner_name: String,
    name: String,
}

impl MethodInfo {
    /// Return the type declaring this method, if it is still registered.
    pub fn owner(&self) -> Option<Arc<TypeInfo>> {
        self.owner.upgrade()
    }

    /// Return the name of the declaring type.
    #[inline]
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    /// Return the name of the method.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("owner", &self.owner_name)
            .field("name", &self.name)
            .finish()
    }
}

/// The owner of every [`TypeInfo`] and [`MethodInfo`] handed out.
///
/// Dropping the registry invalidates the handles held by test cases.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: HashMap<String, Arc<TypeInfo>>,
    methods: HashMap<(String, String), Arc<MethodInfo>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under its Rust type name.
    pub fn register<T: ?Sized + 'static>(&mut self) -> Arc<TypeInfo> {
        self.register_named::<T>(any::type_name::<T>())
    }

    /// Register `T` under an explicit fully-qualified name.
    ///
    /// Registering the same type under the same name twice returns the
    /// existing entry. A different type registered under a taken name
    /// replaces it, which expires the handles of the previous type.
    pub fn register_named<T: ?Sized + 'static>(&mut self, name: &str) -> Arc<TypeInfo> {
        if let Some(existing) = self.types.get(name) {
            if existing.is::<T>() {
                return existing.clone();
            }
            log::warn!(
                "type name '{}' re-registered for {}; replacing the previous type",
                name,
                any::type_name::<T>()
            );
            self.methods.retain(|(owner, _), _| owner != name);
        }
        let info = Arc::new(TypeInfo {
            type_id: TypeId::of::<T>(),
            name: name.to_owned(),
        });
        self.types.insert(name.to_owned(), info.clone());
        info
    }

    /// Register a method declared by `owner`.
    pub fn register_method(&mut self, owner: &Arc<TypeInfo>, name: &str) -> Arc<MethodInfo> {
        self.methods
            .entry((owner.name().to_owned(), name.to_owned()))
            .or_insert_with(|| {
                Arc::new(MethodInfo {
                    owner: Arc::downgrade(owner),
                    owner_name: owner.name().to_owned(),
                    name: name.to_owned(),
                })
            })
            .clone()
    }

    /// Look up a registered type by its fully-qualified name.
    pub fn type_by_name(&self, name: &str) -> Option<Arc<TypeInfo>> {
        self.types.get(name).cloned()
    }

    /// Look up a registered method by the names of its owner and itself.
    pub fn method_by_name(&self, owner_name: &str, name: &str) -> Option<Arc<MethodInfo>> {
        self.methods
            .get(&(owner_name.to_owned(), name.to_owned()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AddTests;

    #[test]
    fn register_is_idempotent() {
        let mut registry = TypeRegistry::new();
        let a = registry.register_named::<AddTests>("Calculator.Tests.AddTests");
        let b = registry.register_named::<AddTests>("Calculator.Tests.AddTests");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.is::<AddTests>());
        assert_eq!(a.name(), "Calculator.Tests.AddTests");
    }

    #[test]
    fn reregistering_name_with_other_type_replaces_it() {
        struct SubTests;

        let mut registry = TypeRegistry::new();
        let add = registry.register_named::<AddTests>("Calculator.Tests");
        let add_method = registry.register_method(&add, "adds");
        drop(add);

        let sub = registry.register_named::<SubTests>("Calculator.Tests");
        assert!(sub.is::<SubTests>());
        assert!(!sub.is::<AddTests>());
        assert!(registry
            .type_by_name("Calculator.Tests")
            .map_or(false, |info| Arc::ptr_eq(&info, &sub)));
        assert!(registry.method_by_name("Calculator.Tests", "adds").is_none());
        assert!(add_method.owner().is_none());
    }

    #[test]
    fn default_name_is_rust_type_name() {
        let mut registry = TypeRegistry::new();
        let info = registry.register::<AddTests>();
        assert!(info.name().ends_with("AddTests"));
        assert!(registry.type_by_name(info.name()).is_some());
    }

    #[test]
    fn methods_resolve_their_owner() {
        let mut registry = TypeRegistry::new();
        let owner = registry.register_named::<AddTests>("Calculator.Tests.AddTests");
        let method = registry.register_method(&owner, "Add_TwoPositiveNumbers_ReturnsSum");

        assert_eq!(method.owner_name(), "Calculator.Tests.AddTests");
        assert!(method.owner().map_or(false, |o| Arc::ptr_eq(&o, &owner)));
        assert!(registry
            .method_by_name("Calculator.Tests.AddTests", "Add_TwoPositiveNumbers_ReturnsSum")
            .is_some());
        assert!(registry
            .method_by_name("Calculator.Tests.AddTests", "Missing")
            .is_none());
    }

    #[test]
    fn handles_expire_with_registry() {
        let mut registry = TypeRegistry::new();
        let owner = Arc::downgrade(&registry.register_named::<AddTests>("AddTests"));
        assert!(owner.upgrade().is_some());
        drop(registry);
        assert!(owner.upgrade().is_none());
    }
}
