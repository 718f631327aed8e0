//! Step policy: how role, domain and step decide the next status.
//!
//! Everything here is pure and total: every (role, domain, step, passed)
//! combination maps to a status, and nothing performs I/O.

use veriskill_types::{Domain, Role, Step, VerificationStatus};

/// Number of quiz steps a user must pass to become verified.
///
/// Domain does not change the count: EV and BS6 technicians both take two steps.
pub fn required_steps(role: Role, _domain: Option<Domain>) -> u8 {
    if role.is_single_step() {
        1
    } else {
        2
    }
}

/// The status a user moves to after an attempt at `step`.
///
/// Rules, in order:
/// 1. a failed attempt is `Failed` at any step, discarding earlier progress;
/// 2. single-step roles are `Verified` on their one pass;
/// 3. BS6 technicians complete step 1, then step 2 verifies;
/// 4. EV and domain-less technicians follow the same two steps.
pub fn next_status(
    role: Role,
    domain: Option<Domain>,
    step: Step,
    passed: bool,
) -> VerificationStatus {
    if !passed {
        return VerificationStatus::Failed;
    }
    if role.is_single_step() {
        if step == Step::Two {
            tracing::warn!(
                role = %role,
                domain = ?domain,
                "step 2 evaluated for a single-step role; treating as single-step pass"
            );
        }
        return VerificationStatus::Verified;
    }
    match (domain, step) {
        (Some(Domain::Bs6), Step::One) => VerificationStatus::Step1Completed,
        (Some(Domain::Bs6), Step::Two) => VerificationStatus::Verified,
        (Some(Domain::Ev) | None, Step::One) => VerificationStatus::Step1Completed,
        (Some(Domain::Ev) | None, Step::Two) => VerificationStatus::Verified,
    }
}

/// Whether the caller should be offered another step after reaching `status`.
pub fn has_next_step(role: Role, status: VerificationStatus) -> bool {
    !role.is_single_step() && status == VerificationStatus::Step1Completed
}

/// The step a user with this status should take next, if any.
///
/// Pending and failed users start over at step 1; verified users have nothing left.
pub fn next_step(role: Role, domain: Option<Domain>, status: VerificationStatus) -> Option<Step> {
    match status {
        VerificationStatus::Pending | VerificationStatus::Failed => Some(Step::One),
        VerificationStatus::Step1Completed | VerificationStatus::Step2Pending => {
            (required_steps(role, domain) >= 2).then_some(Step::Two)
        }
        VerificationStatus::Verified => None,
    }
}

/// Whether a user may begin `requested` from `status`.
///
/// Step 1 is always open. Step 2 is open only to technicians who have
/// completed step 1 (or are already verified and retaking it).
pub fn may_begin(role: Role, status: VerificationStatus, requested: Step) -> bool {
    match requested {
        Step::One => true,
        Step::Two => !role.is_single_step() && status.qualifies_for_step_two(),
    }
}
