//! Domain models for AirOnboard.
//!
//! # Core Concepts
//!
//! ## Reference Data
//!
//! Loaded once from the JSON fixtures and never mutated afterwards:
//!
//! - [`Role`]: A job function. Drives which tasks, courses, policies and people are surfaced.
//! - [`Employee`]: A directory record for a (new) hire, with manager and buddy references.
//! - [`Task`]: One onboarding checklist item, bucketed into a [`TaskTimeline`] phase.
//! - [`Course`] and [`LearningPath`]: Required and recommended training per role.
//! - [`Policy`]: An HR policy made of [`PolicySection`]s with role/location filters.
//! - [`Person`] and [`RecommendationRule`]: The people directory and who a new hire should meet.
//!
//! ## Derived Views
//!
//! Built at read time by joining reference data with caller-supplied progress
//! (completed task and course IDs):
//!
//! - [`TaskProgress`], [`LearningProgress`]: Completion arithmetic.
//! - [`RecommendedPerson`], [`LearningItemWithCourse`]: Rules joined with their targets.
//! - [`Dashboard`]: Everything the dashboard page renders for one role.

mod chat;
mod dashboard;
mod employee;
mod learning;
mod people;
mod policy;
mod role;
mod task;

pub use chat::*;
pub use dashboard::*;
pub use employee::*;
pub use learning::*;
pub use people::*;
pub use policy::*;
pub use role::*;
pub use task::*;

/// `Math.round` semantics for non-negative ratios: `round(100 * part / whole)`, or 0 when
/// `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::percentage;

    #[test]
    fn percentage_is_zero_for_empty_total() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(3, 0), 0);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(12, 12), 100);
    }
}
