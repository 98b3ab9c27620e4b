//! Cart admission policy.
//!
//! Adding a course to the cart is gated by a fixed sequence of checks,
//! evaluated in strict order with the first failing check winning:
//! duplicate identity, duplicate course code, credit ceiling, time conflict.
//! Removal is never gated.
//!
//! The cart is treated as an immutable snapshot: admission never mutates the
//! input, and a successful add produces a new cart value. Rejections
//! therefore leave the existing cart trivially untouched.

use crate::api::{Course, CourseId};
use crate::schedule::{check_conflict, ConflictDetail, ConflictOutcome};

/// Fixed maximum total credit load enforced at admission time.
pub const DEFAULT_CREDIT_CEILING: u32 = 22;

/// Why a candidate course was refused admission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdmissionError {
    /// The candidate's identity is already present in the cart.
    #[error("course is already in the cart")]
    DuplicateEntry,

    /// A cart entry already carries the candidate's course code (same
    /// course, different section).
    #[error("another section of {code} is already in the cart")]
    DuplicateCode { code: String },

    /// Admitting the candidate would push total credits above the ceiling.
    #[error("total credits would reach {attempted}, above the ceiling of {ceiling}")]
    CreditCeilingExceeded { attempted: u32, ceiling: u32 },

    /// The candidate's sessions overlap an existing selection.
    #[error("{}", .0.message())]
    TimeConflict(ConflictDetail),
}

impl AdmissionError {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            AdmissionError::DuplicateEntry => "DUPLICATE_ENTRY",
            AdmissionError::DuplicateCode { .. } => "DUPLICATE_CODE",
            AdmissionError::CreditCeilingExceeded { .. } => "CREDIT_CEILING",
            AdmissionError::TimeConflict(_) => "TIME_CONFLICT",
        }
    }
}

/// Admission policy for cart mutations.
///
/// The credit ceiling is injected rather than hard-wired so callers and
/// tests can vary it; [`CartPolicy::default`] uses
/// [`DEFAULT_CREDIT_CEILING`].
#[derive(Debug, Clone, Copy)]
pub struct CartPolicy {
    credit_ceiling: u32,
}

impl Default for CartPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CREDIT_CEILING)
    }
}

impl CartPolicy {
    pub fn new(credit_ceiling: u32) -> Self {
        Self { credit_ceiling }
    }

    pub fn credit_ceiling(&self) -> u32 {
        self.credit_ceiling
    }

    /// Validate a candidate against the cart without mutating anything.
    ///
    /// Checks run in strict order; the first failure is returned.
    pub fn admit(&self, candidate: &Course, cart: &[Course]) -> Result<(), AdmissionError> {
        if candidate.id.is_some() && cart.iter().any(|entry| entry.id == candidate.id) {
            return Err(AdmissionError::DuplicateEntry);
        }

        if cart.iter().any(|entry| entry.code == candidate.code) {
            return Err(AdmissionError::DuplicateCode {
                code: candidate.code.clone(),
            });
        }

        // Credits come from client payloads; saturate instead of overflowing.
        let total = cart
            .iter()
            .fold(0u32, |acc, entry| acc.saturating_add(entry.credit));
        let attempted = total.saturating_add(candidate.credit);
        if attempted > self.credit_ceiling {
            return Err(AdmissionError::CreditCeilingExceeded {
                attempted,
                ceiling: self.credit_ceiling,
            });
        }

        if let ConflictOutcome::Conflict(detail) = check_conflict(candidate, cart) {
            return Err(AdmissionError::TimeConflict(detail));
        }

        Ok(())
    }

    /// Return a new cart with the candidate appended, if admission succeeds.
    pub fn add(&self, candidate: &Course, cart: &[Course]) -> Result<Vec<Course>, AdmissionError> {
        self.admit(candidate, cart)?;
        let mut next = cart.to_vec();
        next.push(candidate.clone());
        Ok(next)
    }

    /// Return a new cart with the given identity filtered out.
    ///
    /// Removal is unconditional; an absent identity yields an unchanged copy.
    pub fn remove(&self, cart: &[Course], id: CourseId) -> Vec<Course> {
        cart.iter()
            .filter(|entry| entry.id != Some(id))
            .cloned()
            .collect()
    }
}
