//! Field selection for result unions.

use crate::types::{FieldSpec, ResultUnion};
use std::error::Error;

/// The success field of `R`, or `None` for void methods.
pub fn success_field<R: ResultUnion>() -> Option<&'static FieldSpec> {
    R::SPEC.first().and_then(Option::as_ref)
}

/// The first declared exception field whose type matches `error`.
///
/// Declaration order decides when several fields match.
pub fn select_exception<R: ResultUnion>(error: &(dyn Error + 'static)) -> Option<&'static FieldSpec> {
    R::SPEC
        .iter()
        .skip(1)
        .flatten()
        .find(|field| field.exception.is_some_and(|ty| ty.matches(error)))
}
