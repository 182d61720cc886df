use crate::{
    interface::accepts, Cronos, CronosError, CronosResult, DynSvc, Interface,
    InterfaceFor, Service, TypeKey,
};
use std::fmt::{Debug, Formatter};

/// A configuration task attached to a registration. Options are queued by
/// [`Cronos::register_with`] and run once, in ascending priority order,
/// before the first component is resolved.
#[derive(Clone)]
pub struct Options {
    kind: OptionKind,
    priority: u8,
}

#[derive(Clone)]
enum OptionKind {
    Singleton(bool),
    As {
        interface: TypeKey,
        accepts: fn(&DynSvc) -> bool,
    },
    Qualifier {
        concrete: TypeKey,
        interface: TypeKey,
    },
}

impl Options {
    /// Priority of this option. Lower priorities run first.
    #[must_use]
    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub(crate) fn apply(self, type_key: TypeKey, cronos: &mut Cronos) -> CronosResult<()> {
        match self.kind {
            OptionKind::Singleton(true) => Ok(()),
            OptionKind::Singleton(false) => {
                tracing::debug!("{} is not a singleton", type_key);
                cronos.mark_not_singleton(type_key);
                Ok(())
            }
            OptionKind::As { interface, accepts } => {
                let component = cronos.fetch(type_key)?;
                if !accepts(&component) {
                    return Err(CronosError::InvalidImplementation {
                        interface,
                        implementation: type_key,
                    });
                }

                tracing::debug!("Binding {} as {}", type_key, interface);
                cronos.alias(interface, component);
                Ok(())
            }
            OptionKind::Qualifier { concrete, interface } => {
                let component = cronos.fetch(concrete)?;
                tracing::debug!(
                    "Qualifying {} parameters of {} with {}",
                    interface,
                    type_key,
                    concrete
                );
                cronos.qualify(type_key, interface, component);
                Ok(())
            }
        }
    }
}

impl Debug for Options {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("Options");
        match &self.kind {
            OptionKind::Singleton(singleton) => debug.field("singleton", singleton),
            OptionKind::As { interface, .. } => debug.field("as", &interface.name()),
            OptionKind::Qualifier { concrete, interface } => debug
                .field("concrete", &concrete.name())
                .field("interface", &interface.name()),
        };
        debug.field("priority", &self.priority).finish()
    }
}

/// Controls whether a component is shared. Components are singletons by
/// default: they are built on first request and reused afterwards. Passing
/// `false` rebuilds the component every time it is requested.
///
/// ```
/// use cronos::{singleton, Cronos, Svc};
///
/// struct Id(u32);
///
/// let mut cronos = Cronos::new();
/// let next = std::sync::atomic::AtomicU32::new(0);
/// cronos
///     .register_with(
///         move || Id(next.fetch_add(1, std::sync::atomic::Ordering::SeqCst)),
///         [singleton(false)],
///     )
///     .unwrap();
///
/// let first: Svc<Id> = cronos.get().unwrap();
/// let second: Svc<Id> = cronos.get().unwrap();
/// assert_ne!(first.0, second.0);
/// ```
#[must_use]
pub fn singleton(singleton: bool) -> Options {
    Options {
        kind: OptionKind::Singleton(singleton),
        priority: 1,
    }
}

/// Also binds the component under the interface `I`, so that requests for
/// `Svc<I>` receive the same instance. An interface that already has a
/// component keeps it. The component's type must be listed in the
/// [`interface!`](crate::interface) declaration of `I`.
#[must_use]
pub fn bind_as<I: ?Sized + Interface>() -> Options {
    Options {
        kind: OptionKind::As {
            interface: TypeKey::of::<I>(),
            accepts: accepts::<I>,
        },
        priority: 2,
    }
}

/// Injects the component bound to `C` into every `Svc<I>` parameter of this
/// constructor, instead of the component bound to `I`. The constructor's
/// other parameters are resolved as usual.
///
/// ```
/// use cronos::{bind_as, interface, qualifier, Cronos, Service, Svc};
///
/// trait Greeter: Service {
///     fn greet(&self) -> &'static str;
/// }
///
/// #[derive(Default)]
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> &'static str { "hello" }
/// }
///
/// #[derive(Default)]
/// struct French;
/// impl Greeter for French {
///     fn greet(&self) -> &'static str { "bonjour" }
/// }
///
/// interface!(Greeter = [English, French]);
///
/// struct Host(Svc<dyn Greeter>);
///
/// let mut cronos = Cronos::new();
/// cronos.register_with(English::default, [bind_as::<dyn Greeter>()]).unwrap();
/// cronos.register(French::default).unwrap();
/// cronos
///     .register_with(Host, [qualifier::<French, dyn Greeter>()])
///     .unwrap();
///
/// let host: Svc<Host> = cronos.get().unwrap();
/// assert_eq!("bonjour", host.0.greet());
/// ```
#[must_use]
pub fn qualifier<C, I>() -> Options
where
    C: Service,
    I: ?Sized + InterfaceFor<C>,
{
    Options {
        kind: OptionKind::Qualifier {
            concrete: TypeKey::of::<C>(),
            interface: TypeKey::of::<I>(),
        },
        priority: 3,
    }
}
