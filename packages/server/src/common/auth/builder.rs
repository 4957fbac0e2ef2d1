use super::{AuthError, Capability};
use crate::common::entity_ids::MemberId;

/// Entry point for authorization checks
pub struct Actor {
    actor_id: MemberId,
    is_admin: bool,
}

impl Actor {
    /// Create a new actor for authorization checks
    ///
    /// `is_admin` comes from the verified token claims.
    pub fn new(actor_id: MemberId, is_admin: bool) -> Self {
        Self { actor_id, is_admin }
    }

    pub fn id(&self) -> MemberId {
        self.actor_id
    }

    /// Specify what capability the actor needs
    pub fn can(&self, capability: Capability) -> CapabilityBuilder {
        CapabilityBuilder {
            actor_id: self.actor_id,
            is_admin: self.is_admin,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    actor_id: MemberId,
    is_admin: bool,
    capability: Capability,
}

impl CapabilityBuilder {
    /// Perform the authorization check
    pub fn check(self) -> Result<(), AuthError> {
        if self.capability.requires_admin() && !self.is_admin {
            tracing::debug!(
                actor_id = %self.actor_id,
                capability = %self.capability,
                "Capability denied"
            );
            return Err(AuthError::AdminRequired(self.capability.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_check() {
        let result = Actor::new(MemberId::new(), true)
            .can(Capability::ManageInstallers)
            .check();

        assert!(result.is_ok());
    }

    #[test]
    fn test_non_admin_rejected() {
        let result = Actor::new(MemberId::new(), false)
            .can(Capability::SubmitCustomers)
            .check();

        assert_eq!(
            result,
            Err(AuthError::AdminRequired("submit_customers".to_string()))
        );
    }
}
