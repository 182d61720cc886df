use crate::{
    erase, validate_output, Arguments, Binding, Constructor, ConstructorBinding,
    CronosError, CronosResult, Dependency, DynSvc, Options, QualifiedBinding,
    RegisterError, Service, Svc, TypeKey,
};
use std::collections::{HashMap, HashSet};

pub(crate) type BindingMap = HashMap<TypeKey, Option<Box<dyn Binding>>>;

struct BoundOption {
    type_key: TypeKey,
    option: Options,
}

/// A dependency injection container. This holds the constructor bound to
/// each type, the components that have already been built, and the options
/// that have yet to be applied.
///
/// Components are singletons unless registered with
/// [`singleton(false)`](crate::singleton): each is built the first time it
/// is requested and shared by everything that depends on it.
///
/// ```
/// use cronos::{Cronos, Svc};
///
/// struct Id(u32);
/// struct Employer(Svc<Id>);
/// struct Worker(Svc<Id>);
///
/// let mut cronos = Cronos::new();
/// cronos.register(|| Id(7)).unwrap();
/// cronos.register(Employer).unwrap();
/// cronos.register(Worker).unwrap();
///
/// cronos
///     .init(|employer: Svc<Employer>, worker: Svc<Worker>| {
///         assert!(Svc::ptr_eq(&employer.0, &worker.0));
///     })
///     .unwrap();
/// ```
#[derive(Default)]
pub struct Cronos {
    bindings: BindingMap,
    components: HashMap<TypeKey, DynSvc>,
    not_singletons: HashSet<TypeKey>,
    options: Vec<BoundOption>,
}

impl Cronos {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Cronos::default()
    }

    /// Binds a constructor to the type it produces. Any constructor already
    /// bound to that type is replaced along with its cached component and
    /// its lifetime setting. Nothing is constructed until the component is
    /// requested.
    pub fn register<D, C>(&mut self, constructor: C) -> Result<(), RegisterError>
    where
        D: 'static,
        C: Constructor<D> + 'static,
        C::Output: Service,
    {
        self.register_with(constructor, [])
    }

    /// Binds a constructor to the type it produces and queues `options` to
    /// run against that type before the first component is resolved.
    pub fn register_with<D, C, O>(
        &mut self,
        constructor: C,
        options: O,
    ) -> Result<(), RegisterError>
    where
        D: 'static,
        C: Constructor<D> + 'static,
        C::Output: Service,
        O: IntoIterator<Item = Options>,
    {
        let type_key = TypeKey::of::<C::Output>();
        validate_output(type_key).map_err(|error| {
            tracing::error!("Rejected constructor for {}: {}", type_key, error);
            error
        })?;

        let binding: Box<dyn Binding> = Box::new(ConstructorBinding::new(constructor));
        if self.bindings.insert(type_key, Some(binding)).is_some() {
            tracing::warn!("Replacing the constructor registered for {}", type_key);
            self.components.remove(&type_key);
            self.not_singletons.remove(&type_key);
        } else {
            tracing::debug!("Registered constructor for {}", type_key);
        }

        self.options.extend(
            options
                .into_iter()
                .map(|option| BoundOption { type_key, option }),
        );
        Ok(())
    }

    /// Binds an already built component to its type. The same instance is
    /// supplied for every request, and it takes precedence over any
    /// constructor registered for the type.
    pub fn register_instance<T: Service>(&mut self, component: T) {
        let type_key = TypeKey::of::<T>();
        tracing::debug!("Registered instance of {}", type_key);
        self.components.insert(type_key, erase(Svc::new(component)));
    }

    /// Checks whether a constructor or instance is bound to a type.
    #[must_use]
    pub fn contains(&self, type_key: TypeKey) -> bool {
        self.bindings.contains_key(&type_key) || self.components.contains_key(&type_key)
    }

    /// Checks whether a built component is cached for a type.
    #[must_use]
    pub fn is_cached(&self, type_key: TypeKey) -> bool {
        self.components.contains_key(&type_key)
    }

    /// Resolves the root function's parameters, then calls it. Pending
    /// options are applied first. Whatever the root function returns is
    /// discarded.
    pub fn init<D, F>(&mut self, root: F) -> CronosResult<()>
    where
        F: Constructor<D>,
    {
        self.apply_options()?;

        tracing::debug!("Resolving {} root dependencies", root.dependencies().len());
        let mut arguments = Arguments::new(self, None);
        root.construct(&mut arguments)?;
        Ok(())
    }

    /// Requests a component from the container, applying pending options
    /// first.
    ///
    /// ```
    /// use cronos::{Cronos, Svc};
    ///
    /// struct Project(&'static str);
    ///
    /// let mut cronos = Cronos::new();
    /// cronos.register(|| Project("cronos")).unwrap();
    ///
    /// let project: Svc<Project> = cronos.get().unwrap();
    /// assert_eq!("cronos", project.0);
    /// assert!(cronos.get::<Svc<String>>().is_err());
    /// ```
    pub fn get<R: Dependency>(&mut self) -> CronosResult<R> {
        self.apply_options()?;

        let mut arguments = Arguments::new(self, None);
        R::resolve(&mut arguments)
    }

    /// Fetches the component bound to a type, building it and its
    /// dependencies if needed. This does not apply pending options.
    pub fn fetch(&mut self, type_key: TypeKey) -> CronosResult<DynSvc> {
        if let Some(component) = self.components.get(&type_key) {
            tracing::trace!("Reusing cached {}", type_key);
            return Ok(component.clone());
        }

        let slot = self
            .bindings
            .get_mut(&type_key)
            .ok_or(CronosError::MissingBinding { type_key })?;

        // An empty slot means the binding is currently being invoked
        let binding = slot.take().ok_or_else(|| CronosError::CycleDetected {
            type_key,
            cycle: vec![type_key],
        })?;

        tracing::debug!("Constructing {}", type_key);
        let result = {
            let mut arguments = Arguments::new(self, Some(type_key));
            binding.construct(&mut arguments)
        };

        // Constructors can't register, so the slot is still present
        if let Some(slot) = self.bindings.get_mut(&type_key) {
            *slot = Some(binding);
        }

        let component = match result {
            Ok(component) => component,
            Err(CronosError::CycleDetected { mut cycle, .. }) => {
                cycle.push(type_key);
                return Err(CronosError::CycleDetected { type_key, cycle });
            }
            Err(error) => return Err(error),
        };

        if self.not_singletons.contains(&type_key) {
            tracing::trace!("Not caching {}", type_key);
        } else {
            self.components.insert(type_key, component.clone());
        }

        Ok(component)
    }

    /// Runs every pending option in ascending priority order. Options with
    /// equal priority run in the order they were registered.
    pub(crate) fn apply_options(&mut self) -> CronosResult<()> {
        let mut pending = std::mem::take(&mut self.options);
        if pending.is_empty() {
            return Ok(());
        }

        pending.sort_by_key(|bound| bound.option.priority());
        tracing::debug!("Applying {} options", pending.len());
        let mut pending = pending.into_iter();
        while let Some(bound) = pending.next() {
            if let Err(error) = bound.option.clone().apply(bound.type_key, self) {
                // The failed option and everything after it stay queued
                let mut remaining = vec![bound];
                remaining.extend(pending);
                remaining.append(&mut self.options);
                self.options = remaining;
                return Err(error);
            }
        }

        Ok(())
    }

    pub(crate) fn mark_not_singleton(&mut self, type_key: TypeKey) {
        self.not_singletons.insert(type_key);
        self.components.remove(&type_key);
    }

    pub(crate) fn alias(&mut self, interface: TypeKey, component: DynSvc) {
        self.components.entry(interface).or_insert(component);
    }

    pub(crate) fn qualify(&mut self, type_key: TypeKey, interface: TypeKey, component: DynSvc) {
        let Some(slot) = self.bindings.get_mut(&type_key) else {
            tracing::warn!("No constructor registered for {} to qualify", type_key);
            return;
        };

        let Some(inner) = slot.take() else {
            return;
        };

        if self.components.contains_key(&type_key) {
            tracing::warn!(
                "{} was already built, qualifying {} has no effect on it",
                type_key,
                interface
            );
        }

        if inner.dependencies().contains(&interface) {
            *slot = Some(Box::new(QualifiedBinding::new(inner, interface, component)));
        } else {
            tracing::warn!("{} has no parameter of type {} to qualify", type_key, interface);
            *slot = Some(inner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bind_as, qualifier, singleton};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    struct Person;
    struct Company(Svc<Person>);

    #[test]
    fn missing_binding_is_reported() {
        let mut cronos = Cronos::new();
        match cronos.fetch(TypeKey::of::<Person>()) {
            Err(CronosError::MissingBinding { type_key })
                if type_key == TypeKey::of::<Person>() => {}
            Err(error) => Err(error).unwrap(),
            Ok(_) => unreachable!("nothing is registered"),
        }
    }

    #[test]
    fn missing_dependency_names_the_dependent() {
        let mut cronos = Cronos::new();
        cronos.register(Company).unwrap();

        match cronos.get::<Svc<Company>>() {
            Err(CronosError::MissingDependency {
                type_key,
                dependency,
            }) if type_key == TypeKey::of::<Company>()
                && dependency == TypeKey::of::<Person>() => {}
            Err(error) => Err(error).unwrap(),
            Ok(_) => unreachable!("person is not registered"),
        }
    }

    #[test]
    fn fetch_populates_the_cache() {
        let mut cronos = Cronos::new();
        cronos.register(|| Person).unwrap();
        assert!(!cronos.is_cached(TypeKey::of::<Person>()));

        cronos.fetch(TypeKey::of::<Person>()).unwrap();
        assert!(cronos.is_cached(TypeKey::of::<Person>()));
    }

    #[test]
    fn registration_does_not_construct() {
        let calls = Svc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut cronos = Cronos::new();
        cronos
            .register(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Person
            })
            .unwrap();

        assert_eq!(0, calls.load(Ordering::SeqCst));
        assert!(cronos.contains(TypeKey::of::<Person>()));
    }

    #[test]
    fn reregistering_replaces_the_binding() {
        struct Name(&'static str);

        let mut cronos = Cronos::new();
        cronos.register(|| Name("Alice")).unwrap();
        let first: Svc<Name> = cronos.get().unwrap();
        cronos.register(|| Name("Bob")).unwrap();
        let second: Svc<Name> = cronos.get().unwrap();

        assert_eq!("Alice", first.0);
        assert_eq!("Bob", second.0);
    }

    #[test]
    fn options_run_in_priority_order_once() {
        trait Named: Service {}
        crate::interface!(Named = [Person]);
        impl Named for Person {}

        let calls = Svc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut cronos = Cronos::new();
        // As is listed first but runs after Singleton, so the aliased
        // instance is never cached under Person itself
        cronos
            .register_with(
                move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Person
                },
                [bind_as::<dyn Named>(), singleton(false)],
            )
            .unwrap();

        cronos.init(|| ()).unwrap();
        assert_eq!(1, calls.load(Ordering::SeqCst));
        assert!(!cronos.is_cached(TypeKey::of::<Person>()));
        assert!(cronos.is_cached(TypeKey::of::<dyn Named>()));

        cronos.init(|| ()).unwrap();
        assert_eq!(1, calls.load(Ordering::SeqCst));
    }

    #[test]
    fn reregistering_resets_the_lifetime() {
        let mut cronos = Cronos::new();
        cronos.register_with(|| Person, [singleton(false)]).unwrap();
        cronos.fetch(TypeKey::of::<Person>()).unwrap();
        assert!(!cronos.is_cached(TypeKey::of::<Person>()));

        cronos.register(|| Person).unwrap();
        let first: Svc<Person> = cronos.get().unwrap();
        let second: Svc<Person> = cronos.get().unwrap();
        assert!(Svc::ptr_eq(&first, &second));
    }

    #[test]
    fn qualifier_after_construction_keeps_cached_component() {
        trait Named: Service {
            fn name(&self) -> &'static str;
        }
        struct Alice;
        struct Bob;
        struct Greeter(Svc<dyn Named>);
        impl Named for Alice {
            fn name(&self) -> &'static str {
                "alice"
            }
        }
        impl Named for Bob {
            fn name(&self) -> &'static str {
                "bob"
            }
        }
        crate::interface!(Named = [Alice, Bob]);

        let mut cronos = Cronos::new();
        cronos
            .register_with(|| Alice, [bind_as::<dyn Named>()])
            .unwrap();
        cronos.register(|| Bob).unwrap();
        // Binding Greeter to itself builds it before the qualifier runs
        cronos
            .register_with(
                Greeter,
                [qualifier::<Bob, dyn Named>(), bind_as::<Greeter>()],
            )
            .unwrap();

        cronos.init(|| ()).unwrap();
        let greeter: Svc<Greeter> = cronos.get().unwrap();
        assert_eq!("alice", greeter.0.name());
    }

    #[test]
    fn qualifier_without_matching_parameter_is_ignored() {
        struct Other;

        let mut cronos = Cronos::new();
        cronos.register(|| Person).unwrap();
        cronos.register(|| Other).unwrap();
        cronos
            .register_with(Company, [qualifier::<Other, Other>()])
            .unwrap();

        let company: Svc<Company> = cronos.get().unwrap();
        let person: Svc<Person> = cronos.get().unwrap();
        assert!(Svc::ptr_eq(&company.0, &person));
    }

    #[test]
    fn cycle_is_detected() {
        struct Chicken(Svc<Egg>);
        struct Egg(Svc<Chicken>);

        let mut cronos = Cronos::new();
        cronos.register(Chicken).unwrap();
        cronos.register(Egg).unwrap();

        match cronos.get::<Svc<Chicken>>() {
            Err(CronosError::CycleDetected { type_key, cycle }) => {
                assert_eq!(TypeKey::of::<Chicken>(), type_key);
                assert_eq!(
                    vec![
                        TypeKey::of::<Chicken>(),
                        TypeKey::of::<Egg>(),
                        TypeKey::of::<Chicken>()
                    ],
                    cycle
                );
            }
            Err(error) => Err(error).unwrap(),
            Ok(_) => unreachable!("cycle should have been detected"),
        }

        // Bindings are restored after the failure, so the full cycle is
        // walked again
        assert!(matches!(
            cronos.fetch(TypeKey::of::<Egg>()),
            Err(CronosError::CycleDetected { cycle, .. }) if cycle.len() == 3
        ));
    }

    #[test]
    fn instances_are_shared() {
        let mut cronos = Cronos::new();
        cronos.register_instance(Mutex::new(0));
        cronos
            .register(|counter: Svc<Mutex<i32>>| {
                *counter.lock().unwrap() += 1;
                Person
            })
            .unwrap();

        cronos.init(|_: Svc<Person>| {}).unwrap();
        let counter: Svc<Mutex<i32>> = cronos.get().unwrap();
        assert_eq!(1, *counter.lock().unwrap());
    }
}
