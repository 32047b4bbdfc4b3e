//! Role-based access rules for API operations.
//!
//! The mapping is static and non-hierarchical: an operation names the exact
//! roles allowed to perform it. Handlers call [`authorize`] after resolving
//! the caller's identity, before touching any service.

use super::error::Error;
use super::identity::Role;

/// Every role-gated operation the API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListLeads,
    GetLead,
    CreateLead,
    UpdateLead,
    DeleteLead,
    ListContacts,
    GetContact,
    CreateContact,
    UpdateContact,
    DeleteContact,
    ListDeals,
    GetDeal,
    CreateDeal,
    UpdateDeal,
    DeleteDeal,
    ListActivities,
    GetActivity,
    CreateActivity,
    UpdateActivity,
    DeleteActivity,
}

const ALL_ROLES: &[Role] = &[Role::Admin, Role::Manager, Role::User];
const ADMIN_AND_MANAGER: &[Role] = &[Role::Admin, Role::Manager];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Roles permitted to perform the given operation.
pub fn required_roles(operation: Operation) -> &'static [Role] {
    use Operation::*;
    match operation {
        ListLeads | GetLead | CreateLead | UpdateLead | DeleteLead => ADMIN_AND_MANAGER,
        CreateDeal | UpdateDeal => ADMIN_AND_MANAGER,
        DeleteDeal => ADMIN_ONLY,
        ListContacts | GetContact | CreateContact | UpdateContact | DeleteContact => ALL_ROLES,
        ListDeals | GetDeal => ALL_ROLES,
        ListActivities | GetActivity | CreateActivity | UpdateActivity | DeleteActivity => {
            ALL_ROLES
        }
    }
}

/// Check whether `role` may perform `operation`.
///
/// Returns a `forbidden` error when the role is not in the operation's
/// allowed set. The caller is already authenticated at this point, so the
/// distinction from `unauthorized` is deliberate.
pub fn authorize(role: Role, operation: Operation) -> Result<(), Error> {
    if required_roles(operation).contains(&role) {
        Ok(())
    } else {
        Err(Error::forbidden("insufficient role for this operation"))
    }
}
