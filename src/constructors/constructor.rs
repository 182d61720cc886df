use crate::{Arguments, CronosError, CronosResult, Dependency, TypeKey};
use std::any::Any;

/// A function that builds a component from its dependencies. All functions
/// of arity 12 or less are constructors if each of their parameters is a
/// [`Dependency`]. Parameters are resolved by position, left to right.
///
/// ## Type parameters
/// * `D` - Tuple of this constructor's parameters.
///
/// ## Example
///
/// ```
/// use cronos::{Cronos, Svc};
///
/// struct Person { name: &'static str }
/// struct Company { person: Svc<Person> }
///
/// fn new_company(person: Svc<Person>) -> Company {
///     Company { person }
/// }
///
/// let mut cronos = Cronos::new();
/// cronos.register(new_company).unwrap();
/// cronos.register(|| Person { name: "Bob" }).unwrap();
///
/// let company: Svc<Company> = cronos.get().unwrap();
/// assert_eq!("Bob", company.person.name);
/// ```
///
/// Values that are not callable cannot be registered:
///
/// ```compile_fail
/// use cronos::Cronos;
///
/// struct Person;
///
/// let mut cronos = Cronos::new();
/// cronos.register(Person).unwrap();
/// ```
pub trait Constructor<D> {
    /// The component produced by this constructor.
    type Output: Any;

    /// The type keys of this constructor's parameters, in declared order.
    fn dependencies(&self) -> Vec<TypeKey>;

    /// Resolves this constructor's parameters and invokes it.
    fn construct(&self, arguments: &mut Arguments<'_>) -> CronosResult<Self::Output>;
}

macro_rules! impl_constructor_function {
    () => {
        impl_constructor_function!(@impl ());
    };
    ($first:ident $(, $rest:ident)*) => {
        impl_constructor_function!(@impl ($first $(, $rest)*));
        impl_constructor_function!($($rest),*);
    };
    (@impl ($($type_name:ident),*)) => {
        impl<F, R $(, $type_name)*> Constructor<($($type_name,)*)> for F
        where
            F: Fn($($type_name),*) -> R,
            R: Any,
            $($type_name: Dependency,)*
        {
            type Output = R;

            fn dependencies(&self) -> Vec<TypeKey> {
                vec![$(<$type_name as Dependency>::type_key()),*]
            }

            #[allow(unused_variables)]
            fn construct(&self, arguments: &mut Arguments<'_>) -> CronosResult<R> {
                let result = self($(
                    match <$type_name as Dependency>::resolve(arguments) {
                        Ok(dependency) => dependency,
                        Err(CronosError::MissingBinding { type_key }) => {
                            return Err(match arguments.requester() {
                                Some(requester) => CronosError::MissingDependency {
                                    type_key: requester,
                                    dependency: type_key,
                                },
                                None => CronosError::MissingBinding { type_key },
                            });
                        }
                        Err(error) => return Err(error),
                    }
                ),*);
                Ok(result)
            }
        }
    };
}

impl_constructor_function!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
