//! Application services for roster orchestration.

mod membership;

pub use membership::{MembershipError, MembershipResult, MembershipService};
