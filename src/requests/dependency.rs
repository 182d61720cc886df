use crate::{Arguments, CronosError, CronosResult, Interface, Svc, TypeKey};

/// A parameter that can be injected into a constructor.
///
/// - [`Svc<T>`](crate::Svc): the component bound to `T`. `T` may be a
///   concrete type or a `dyn Trait` declared with
///   [`interface!`](crate::interface).
/// - `Option<Svc<T>>`: like `Svc<T>`, but resolves to `None` rather than
///   failing when nothing is bound to `T`.
///
/// ```
/// use cronos::{Cronos, Svc};
///
/// struct Config(u16);
/// struct Server { port: u16 }
///
/// let mut cronos = Cronos::new();
/// cronos.register(|config: Option<Svc<Config>>| Server {
///     port: config.map_or(8080, |config| config.0),
/// }).unwrap();
///
/// let server: Svc<Server> = cronos.get().unwrap();
/// assert_eq!(8080, server.port);
/// ```
pub trait Dependency: Sized + 'static {
    /// The type key this parameter is resolved through.
    fn type_key() -> TypeKey;

    /// Resolves this parameter.
    fn resolve(arguments: &mut Arguments<'_>) -> CronosResult<Self>;
}

impl<I: ?Sized + Interface> Dependency for Svc<I> {
    fn type_key() -> TypeKey {
        TypeKey::of::<I>()
    }

    fn resolve(arguments: &mut Arguments<'_>) -> CronosResult<Self> {
        let type_key = Self::type_key();
        let component = arguments.fetch(type_key)?;
        I::from_component(component)
            .ok_or(CronosError::InvalidComponent { type_key })
    }
}

impl<I: ?Sized + Interface> Dependency for Option<Svc<I>> {
    fn type_key() -> TypeKey {
        TypeKey::of::<I>()
    }

    fn resolve(arguments: &mut Arguments<'_>) -> CronosResult<Self> {
        match Svc::<I>::resolve(arguments) {
            Ok(component) => Ok(Some(component)),
            Err(CronosError::MissingBinding { type_key })
                if type_key == Self::type_key() =>
            {
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}
