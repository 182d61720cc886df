use crate::{erase, Arguments, Constructor, CronosResult, DynSvc, Service, Svc, TypeKey};
use std::marker::PhantomData;

/// Weakly typed constructor as stored in the registry.
pub(crate) trait Binding: 'static {
    /// The type keys of the parameters, in declared order.
    fn dependencies(&self) -> Vec<TypeKey>;

    /// Builds the component.
    fn construct(&self, arguments: &mut Arguments<'_>) -> CronosResult<DynSvc>;
}

pub(crate) struct ConstructorBinding<D, C>
where
    C: Constructor<D>,
    C::Output: Service,
{
    constructor: C,
    marker: PhantomData<fn(D) -> C::Output>,
}

impl<D, C> ConstructorBinding<D, C>
where
    C: Constructor<D>,
    C::Output: Service,
{
    pub fn new(constructor: C) -> Self {
        ConstructorBinding {
            constructor,
            marker: PhantomData,
        }
    }
}

impl<D, C> Binding for ConstructorBinding<D, C>
where
    D: 'static,
    C: Constructor<D> + 'static,
    C::Output: Service,
{
    fn dependencies(&self) -> Vec<TypeKey> {
        self.constructor.dependencies()
    }

    fn construct(&self, arguments: &mut Arguments<'_>) -> CronosResult<DynSvc> {
        let component = self.constructor.construct(arguments)?;
        Ok(erase(Svc::new(component)))
    }
}

/// Replaces the default resolution of one parameter type with a component
/// that was resolved ahead of time.
pub(crate) struct QualifiedBinding {
    inner: Box<dyn Binding>,
    interface: TypeKey,
    component: DynSvc,
}

impl QualifiedBinding {
    pub fn new(inner: Box<dyn Binding>, interface: TypeKey, component: DynSvc) -> Self {
        QualifiedBinding {
            inner,
            interface,
            component,
        }
    }
}

impl Binding for QualifiedBinding {
    fn dependencies(&self) -> Vec<TypeKey> {
        self.inner.dependencies()
    }

    fn construct(&self, arguments: &mut Arguments<'_>) -> CronosResult<DynSvc> {
        // Outer qualifiers were applied later and take precedence
        if let Some(previous) =
            arguments.insert_override(self.interface, self.component.clone())
        {
            arguments.insert_override(self.interface, previous);
        }

        self.inner.construct(arguments)
    }
}
