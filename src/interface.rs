use crate::{DynSvc, Service, Svc};

/// Indicates that a type can be recovered from a type-erased component. Each
/// sized service type is an interface for itself. Trait objects (`dyn Trait`)
/// must be declared with the [`interface!`] macro, which lists the concrete
/// types that may stand behind them.
pub trait Interface: Service {
    /// Attempts to view a component as this interface. Returns `None` if the
    /// component's concrete type is not one of this interface's implementers.
    fn from_component(component: DynSvc) -> Option<Svc<Self>>;
}

impl<T: Service> Interface for T {
    fn from_component(component: DynSvc) -> Option<Svc<Self>> {
        component.downcast().ok()
    }
}

/// Marker trait that indicates that a type is an interface for another type.
/// Each sized type is an interface for itself, and each `dyn Trait` is an
/// interface for the types listed in its [`interface!`] declaration. This is
/// used to check qualifiers at compile time.
pub trait InterfaceFor<T: Service>: Interface {}
impl<T: Service> InterfaceFor<T> for T {}

pub(crate) fn accepts<I: ?Sized + Interface>(component: &DynSvc) -> bool {
    I::from_component(component.clone()).is_some()
}

/// Marks a trait as being an interface for several concrete types. A request
/// for `Svc<dyn Trait>` can then be satisfied by a component of any of the
/// listed types.
///
/// With the "arc" feature enabled, the trait must be a subtrait of [`Send`]
/// and [`Sync`], which is easiest to get by making it a subtrait of
/// [`Service`].
///
/// # Example
///
/// ```
/// use cronos::{bind_as, interface, Cronos, Service, Svc};
///
/// trait Observable: Service {
///     fn observe(&self) -> &'static str;
/// }
///
/// #[derive(Default)]
/// struct Observer;
/// impl Observable for Observer {
///     fn observe(&self) -> &'static str { "observer" }
/// }
///
/// interface!(Observable = [Observer]);
///
/// let mut cronos = Cronos::new();
/// cronos.register_with(Observer::default, [bind_as::<dyn Observable>()]).unwrap();
///
/// let observable: Svc<dyn Observable> = cronos.get().unwrap();
/// assert_eq!("observer", observable.observe());
/// ```
#[macro_export]
macro_rules! interface {
    ($trait:path = [$($(#[$attr:meta])* $impl:ty),* $(,)?]) => {
        impl $crate::Interface for dyn $trait {
            fn from_component(
                component: $crate::DynSvc,
            ) -> ::std::option::Option<$crate::Svc<Self>> {
                $(
                    $(#[$attr])*
                    let component = match component.downcast::<$impl>() {
                        ::std::result::Result::Ok(service) => {
                            return ::std::option::Option::Some(service as $crate::Svc<Self>);
                        }
                        ::std::result::Result::Err(component) => component,
                    };
                )*
                ::std::mem::drop(component);
                ::std::option::Option::None
            }
        }

        $(
            $(#[$attr])*
            impl $crate::InterfaceFor<$impl> for dyn $trait {}
        )*
    };
}
