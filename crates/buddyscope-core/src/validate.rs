//! Pre-submission input validation.
//!
//! Pure predicates with no side effects. Callers are responsible for
//! surfacing a rejection to the user and aborting the operation without
//! contacting the remote service. Each predicate has a boolean form and
//! a reason-carrying form ([`check_total`] etc.) so the session can
//! report *why* a request was rejected.

use crate::error::ValidationError;
use crate::units::{to_base_kb, SizeUnit};

/// Whether `n` is a positive power of two (exactly one set bit).
///
/// # Examples
///
/// ```
/// use buddyscope_core::is_power_of_two;
///
/// assert!(is_power_of_two(1));
/// assert!(is_power_of_two(1024));
/// assert!(!is_power_of_two(0));
/// assert!(!is_power_of_two(1023));
/// ```
pub fn is_power_of_two(n: u64) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

/// Validate a total-memory request, with the rejection reason.
///
/// The power-of-two constraint applies to the numeric magnitude in
/// whatever unit the user entered it; the unit plays no part in the
/// check.
pub fn check_total(value: u64, _unit: SizeUnit) -> Result<(), ValidationError> {
    if is_power_of_two(value) {
        Ok(())
    } else {
        Err(ValidationError::TotalNotPowerOfTwo { value })
    }
}

/// Boolean form of [`check_total`].
pub fn validate_total(value: u64, unit: SizeUnit) -> bool {
    check_total(value, unit).is_ok()
}

/// Validate an add-process request against the current total, with the
/// rejection reason.
///
/// Requires a non-empty identifier, a size of at least one unit, and a
/// normalized size no larger than the normalized total. There is no
/// power-of-two constraint on process sizes: the allocator rounds
/// internally.
pub fn check_process_request(
    id: &str,
    value: u64,
    unit: SizeUnit,
    total: u64,
    total_unit: SizeUnit,
) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyProcessId);
    }
    if value < 1 {
        return Err(ValidationError::ProcessSizeTooSmall);
    }
    let requested_kb = to_base_kb(value, unit);
    let total_kb = to_base_kb(total, total_unit);
    if requested_kb > total_kb {
        return Err(ValidationError::ExceedsTotal {
            requested_kb,
            total_kb,
        });
    }
    Ok(())
}

/// Boolean form of [`check_process_request`].
pub fn validate_process_request(
    id: &str,
    value: u64,
    unit: SizeUnit,
    total: u64,
    total_unit: SizeUnit,
) -> bool {
    check_process_request(id, value, unit, total, total_unit).is_ok()
}

/// Validate a remove-process request, with the rejection reason.
pub fn check_remove_request(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        Err(ValidationError::EmptyProcessId)
    } else {
        Ok(())
    }
}

/// Boolean form of [`check_remove_request`].
pub fn validate_remove_request(id: &str) -> bool {
    check_remove_request(id).is_ok()
}
