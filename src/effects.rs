//! Error-accumulating validation on top of stillwater's `Validation`.
//!
//! Record and configuration checks collect ALL problems before failing, so a
//! user sees the complete list in one pass instead of fixing issues one at a
//! time.
//!
//! ```rust
//! use peersense::effects::{
//!     combine_validations, run_validation, validation_failure, validation_success,
//! };
//!
//! let checks = vec![
//!     validation_success(1),
//!     validation_failure("first"),
//!     validation_failure("second"),
//! ];
//! let errors = run_validation(combine_validations(checks)).unwrap_err();
//! assert_eq!(errors, vec!["first", "second"]);
//! ```

use stillwater::{NonEmptyVec, Validation};

/// Validation result accumulating errors of type `E`.
pub type Accumulated<T, E> = Validation<T, NonEmptyVec<E>>;

/// Create a successful validation result.
pub fn validation_success<T, E>(value: T) -> Accumulated<T, E> {
    Validation::Success(value)
}

/// Create a failed validation result with a single error.
pub fn validation_failure<T, E>(error: E) -> Accumulated<T, E> {
    Validation::Failure(NonEmptyVec::new(error, Vec::new()))
}

/// Combine multiple validations, accumulating all errors.
///
/// If any validation fails, every error is kept in input order. If all
/// succeed, the values are collected.
pub fn combine_validations<T, E>(validations: Vec<Accumulated<T, E>>) -> Accumulated<Vec<T>, E> {
    let mut successes = Vec::new();
    let mut failures: Vec<E> = Vec::new();

    for v in validations {
        match v {
            Validation::Success(value) => successes.push(value),
            Validation::Failure(errors) => failures.extend(errors.into_vec()),
        }
    }

    match NonEmptyVec::from_vec(failures) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(successes),
    }
}

/// Convert an accumulated validation into a plain `Result`.
pub fn run_validation<T, E>(validation: Accumulated<T, E>) -> Result<T, Vec<E>> {
    match validation {
        Validation::Success(value) => Ok(value),
        Validation::Failure(errors) => Err(errors.into_vec()),
    }
}
