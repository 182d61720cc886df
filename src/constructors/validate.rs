use crate::{RegisterError, TypeKey};

/// Checks the output type of a constructor before it is registered. Callers
/// that aren't functions and error values that aren't errors are already
/// rejected by the trait bounds on [`Constructor`](crate::Constructor) and
/// [`IntoFallible`](crate::IntoFallible); this catches the shapes the type
/// system allows but which can't be bound.
pub(crate) fn validate_output(output: TypeKey) -> Result<(), RegisterError> {
    if output == TypeKey::of::<()>() {
        return Err(RegisterError::NoOutput);
    }

    let name = output.name();
    if name.starts_with('(') {
        return Err(RegisterError::TupleOutput { output });
    }

    if name.starts_with("core::result::Result<") || name.starts_with("std::result::Result<") {
        return Err(RegisterError::UnwrappedResult { output });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct Person;
    struct Dog;

    #[test]
    fn single_components_are_accepted() {
        assert_eq!(Ok(()), validate_output(TypeKey::of::<Person>()));
        assert_eq!(Ok(()), validate_output(TypeKey::of::<Vec<(Person, Dog)>>()));
        assert_eq!(Ok(()), validate_output(TypeKey::of::<[u8; 4]>()));
    }

    #[test]
    fn unit_is_rejected() {
        assert_eq!(Err(RegisterError::NoOutput), validate_output(TypeKey::of::<()>()));
    }

    #[test]
    fn tuples_are_rejected() {
        let output = TypeKey::of::<(Person, Dog, io::Error)>();
        assert_eq!(
            Err(RegisterError::TupleOutput { output }),
            validate_output(output)
        );
    }

    #[test]
    fn unwrapped_results_are_rejected() {
        let output = TypeKey::of::<Result<Person, io::Error>>();
        assert_eq!(
            Err(RegisterError::UnwrappedResult { output }),
            validate_output(output)
        );
    }
}
