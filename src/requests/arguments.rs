use crate::{Cronos, CronosResult, DynSvc, TypeKey};
use std::collections::HashMap;

/// The context in which the parameters of a single constructor invocation are
/// resolved. Each parameter is fetched from the owning container unless a
/// qualifier has substituted a specific component for its type.
pub struct Arguments<'a> {
    container: &'a mut Cronos,
    requester: Option<TypeKey>,
    overrides: HashMap<TypeKey, DynSvc>,
}

impl<'a> Arguments<'a> {
    pub(crate) fn new(container: &'a mut Cronos, requester: Option<TypeKey>) -> Self {
        Arguments {
            container,
            requester,
            overrides: HashMap::new(),
        }
    }

    /// The type whose constructor is being invoked, or `None` for the root
    /// function passed to [`Cronos::init`].
    #[must_use]
    pub fn requester(&self) -> Option<TypeKey> {
        self.requester
    }

    /// Fetches the component bound to a type for use as a parameter.
    pub fn fetch(&mut self, type_key: TypeKey) -> CronosResult<DynSvc> {
        if let Some(component) = self.overrides.get(&type_key) {
            tracing::trace!("Using qualified component for {}", type_key);
            return Ok(component.clone());
        }

        self.container.fetch(type_key)
    }

    /// Supplies `component` for every parameter of type `type_key` in this
    /// invocation. Returns the previous substitution, if any.
    pub(crate) fn insert_override(
        &mut self,
        type_key: TypeKey,
        component: DynSvc,
    ) -> Option<DynSvc> {
        self.overrides.insert(type_key, component)
    }
}
