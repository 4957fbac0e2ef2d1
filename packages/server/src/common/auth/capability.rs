/// Capabilities checked by `Actor` before an action runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Submit new customers through the intake endpoint
    SubmitCustomers,

    /// List and inspect customer records
    ManageCustomers,

    /// Add, edit and designate installers
    ManageInstallers,
}

impl Capability {
    /// Check if this capability requires admin access
    pub fn requires_admin(&self) -> bool {
        // All back-office routes sit behind the admin role
        true
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::SubmitCustomers => write!(f, "submit_customers"),
            Capability::ManageCustomers => write!(f, "manage_customers"),
            Capability::ManageInstallers => write!(f, "manage_installers"),
        }
    }
}
