use crate::{Arguments, Constructor, CronosError, CronosResult, TypeKey};
use std::{any::Any, error::Error, marker::PhantomData};

/// A constructor that may fail with a custom error type. When it fails,
/// resolution is aborted with [`CronosError::ConstructionFailed`].
pub struct FallibleConstructor<D, R, E, F>
where
    R: Any,
    E: Error + 'static,
    F: Constructor<D, Output = Result<R, E>>,
{
    inner: F,
    marker: PhantomData<fn(D) -> Result<R, E>>,
}

impl<D, R, E, F> Constructor<D> for FallibleConstructor<D, R, E, F>
where
    D: 'static,
    R: Any,
    E: Error + 'static,
    F: Constructor<D, Output = Result<R, E>>,
{
    type Output = R;

    fn dependencies(&self) -> Vec<TypeKey> {
        self.inner.dependencies()
    }

    fn construct(&self, arguments: &mut Arguments<'_>) -> CronosResult<R> {
        match self.inner.construct(arguments)? {
            Ok(result) => Ok(result),
            Err(error) => {
                let type_key = TypeKey::of::<R>();
                tracing::error!("Constructor for {} failed: {}", type_key, error);
                Err(CronosError::ConstructionFailed {
                    type_key,
                    inner: Box::new(error),
                })
            }
        }
    }
}

/// Defines a conversion into a fallible constructor. This trait is
/// automatically implemented for all constructors that return a
/// [`Result<T, E>`] with an error type that implements [`Error`].
pub trait IntoFallible<D, R, E, F>
where
    R: Any,
    E: Error + 'static,
    F: Constructor<D, Output = Result<R, E>>,
{
    /// Marks a constructor as being able to fail. On success, the component
    /// is bound unwrapped from the result, so a constructor returning
    /// `Result<T, E>` satisfies requests for `Svc<T>`. On failure, the whole
    /// resolution is aborted and nothing built for the failing branch is
    /// cached.
    ///
    /// ## Example
    ///
    /// ```
    /// use cronos::{Cronos, CronosError, IntoFallible, Svc};
    /// use std::fmt::{Display, Formatter};
    ///
    /// #[derive(Debug)]
    /// struct PersonError;
    ///
    /// impl std::error::Error for PersonError {}
    /// impl Display for PersonError {
    ///     fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    ///         write!(f, "error creating person")
    ///     }
    /// }
    ///
    /// struct Person;
    /// fn new_person() -> Result<Person, PersonError> {
    ///     Err(PersonError)
    /// }
    ///
    /// let mut cronos = Cronos::new();
    /// cronos.register(new_person.fallible()).unwrap();
    ///
    /// match cronos.get::<Svc<Person>>() {
    ///     Err(CronosError::ConstructionFailed { .. }) => {}
    ///     Err(error) => panic!("unexpected error: {error}"),
    ///     Ok(_) => unreachable!("construction should have failed"),
    /// }
    /// ```
    ///
    /// The error type must implement [`Error`]:
    ///
    /// ```compile_fail
    /// use cronos::{Cronos, IntoFallible};
    ///
    /// struct Person;
    /// struct Dog;
    ///
    /// let mut cronos = Cronos::new();
    /// cronos.register((|| -> Result<Person, Dog> { Err(Dog) }).fallible()).unwrap();
    /// ```
    #[must_use]
    fn fallible(self) -> FallibleConstructor<D, R, E, F>;
}

impl<D, R, E, F> IntoFallible<D, R, E, F> for F
where
    R: Any,
    E: Error + 'static,
    F: Constructor<D, Output = Result<R, E>>,
{
    fn fallible(self) -> FallibleConstructor<D, R, E, F> {
        FallibleConstructor {
            inner: self,
            marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cronos, Svc};
    use std::fmt::{Display, Formatter};

    #[derive(Debug)]
    struct PersonError;

    impl Error for PersonError {}

    impl Display for PersonError {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "error creating person")
        }
    }

    struct Person(&'static str);
    struct Company(Svc<Person>);

    struct Succeed(bool);

    fn new_person(succeed: Svc<Succeed>) -> Result<Person, PersonError> {
        if succeed.0 {
            Ok(Person("Bob"))
        } else {
            Err(PersonError)
        }
    }

    /// A value is returned if the constructor succeeds.
    #[test]
    fn fallible_constructor_success() {
        let mut cronos = Cronos::new();
        cronos.register(new_person.fallible()).unwrap();
        cronos.register_instance(Succeed(true));

        let person: Svc<Person> = cronos.get().unwrap();
        assert_eq!("Bob", person.0);
    }

    /// The error is surfaced and nothing is cached if the constructor fails.
    #[test]
    fn fallible_constructor_failure() {
        let mut cronos = Cronos::new();
        cronos.register(new_person.fallible()).unwrap();
        cronos.register(Company).unwrap();
        cronos.register_instance(Succeed(false));

        match cronos.get::<Svc<Company>>() {
            Err(CronosError::ConstructionFailed { type_key, inner })
                if type_key == TypeKey::of::<Person>() =>
            {
                assert_eq!("error creating person", inner.to_string());
            }
            Err(error) => Err(error).unwrap(),
            Ok(_) => unreachable!("construction should have failed"),
        }

        assert!(!cronos.is_cached(TypeKey::of::<Person>()));
        assert!(!cronos.is_cached(TypeKey::of::<Company>()));
    }
}
