use crate::CronosError;
use std::{
    any::{Any, TypeId},
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
};

#[cfg(feature = "arc")]
mod types {
    use std::{any::Any, sync::Arc};

    /// A reference-counted pointer holding a component. The pointer type is
    /// determined by the feature flags passed to this crate.
    pub type Svc<T> = Arc<T>;

    /// A reference-counted pointer holding a type-erased component.
    pub type DynSvc = Arc<dyn Any + Send + Sync>;

    /// Implemented automatically on types that are capable of being a
    /// component.
    pub trait Service: Any + Send + Sync {}
    impl<T: ?Sized + Any + Send + Sync> Service for T {}

    pub(crate) fn erase<T: Service>(component: Svc<T>) -> DynSvc {
        component
    }
}

#[cfg(feature = "rc")]
mod types {
    use std::{any::Any, rc::Rc};

    /// A reference-counted pointer holding a component. The pointer type is
    /// determined by the feature flags passed to this crate.
    pub type Svc<T> = Rc<T>;

    /// A reference-counted pointer holding a type-erased component.
    pub type DynSvc = Rc<dyn Any>;

    /// Implemented automatically on types that are capable of being a
    /// component.
    pub trait Service: Any {}
    impl<T: ?Sized + Any> Service for T {}

    pub(crate) fn erase<T: Service>(component: Svc<T>) -> DynSvc {
        component
    }
}

pub use types::{DynSvc, Service, Svc};
pub(crate) use types::erase;

/// A result from resolving a component out of the container.
pub type CronosResult<T> = Result<T, CronosError>;

/// Identifies a bindable type. Two keys are equal exactly when they describe
/// the same type; the name is only carried along for diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Creates the [`TypeKey`] for the given type.
    #[inline]
    #[must_use]
    pub fn of<T: ?Sized + Any>() -> Self {
        TypeKey {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Gets the [`TypeId`] this key wraps.
    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Gets the type name of this key.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Person;
    struct Company;
    trait Observable {}

    #[test]
    fn keys_of_the_same_type_are_equal() {
        assert_eq!(TypeKey::of::<Person>(), TypeKey::of::<Person>());
        assert_ne!(TypeKey::of::<Person>(), TypeKey::of::<Company>());
        assert_ne!(TypeKey::of::<Person>(), TypeKey::of::<dyn Observable>());
    }

    #[test]
    fn keys_hash_by_type() {
        let mut keys = HashSet::new();
        keys.insert(TypeKey::of::<Person>());
        keys.insert(TypeKey::of::<Person>());
        keys.insert(TypeKey::of::<Company>());
        assert_eq!(2, keys.len());
    }

    #[test]
    fn display_uses_type_name() {
        let key = TypeKey::of::<Company>();
        assert!(key.to_string().ends_with("Company"));
        assert_eq!(key.name(), key.to_string());
    }
}
