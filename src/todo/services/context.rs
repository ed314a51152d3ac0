//! Caller identity passed explicitly into every service operation.

use super::TodoServiceError;
use crate::todo::domain::{OwnerScope, Role, TaskList, UserId};

/// Identity and role of the caller of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestContext {
    actor: UserId,
    role: Role,
}

impl RequestContext {
    /// Creates a context for `actor` acting with `role`.
    #[must_use]
    pub const fn new(actor: UserId, role: Role) -> Self {
        Self { actor, role }
    }

    /// Creates a context for a regular user.
    #[must_use]
    pub const fn user(actor: UserId) -> Self {
        Self::new(actor, Role::User)
    }

    /// Creates a context for an administrator.
    #[must_use]
    pub const fn admin(actor: UserId) -> Self {
        Self::new(actor, Role::Admin)
    }

    /// Returns the calling user.
    #[must_use]
    pub const fn actor(&self) -> UserId {
        self.actor
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns `true` when the caller holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Returns the scope of the regular user endpoints: only the caller's
    /// own lists, with new lists owned by the caller.
    #[must_use]
    pub const fn user_scope(&self) -> AccessScope {
        AccessScope {
            actor: self.actor,
            visibility: OwnerScope::Owner(self.actor),
            new_list_owner: Some(self.actor),
        }
    }

    /// Returns the scope of the admin endpoints: every list, with new lists
    /// left unowned.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Forbidden`] when the caller is not an
    /// admin.
    pub fn admin_scope(&self) -> Result<AccessScope, TodoServiceError> {
        if !self.is_admin() {
            return Err(TodoServiceError::Forbidden(self.actor));
        }
        Ok(AccessScope {
            actor: self.actor,
            visibility: OwnerScope::All,
            new_list_owner: None,
        })
    }
}

/// What a caller may see and how new lists are stamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessScope {
    actor: UserId,
    visibility: OwnerScope,
    new_list_owner: Option<UserId>,
}

impl AccessScope {
    /// Returns the calling user.
    #[must_use]
    pub const fn actor(&self) -> UserId {
        self.actor
    }

    /// Returns the owner visibility applied to reads.
    #[must_use]
    pub const fn visibility(&self) -> OwnerScope {
        self.visibility
    }

    /// Returns the owner stamped on lists created in this scope.
    #[must_use]
    pub const fn new_list_owner(&self) -> Option<UserId> {
        self.new_list_owner
    }

    /// Returns `true` when the list is visible in this scope.
    #[must_use]
    pub fn admits(&self, list: &TaskList) -> bool {
        self.visibility.admits(list.owner_id())
    }
}
