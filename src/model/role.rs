use fake::Dummy;
use serde::{Deserialize, Serialize};

use crate::text_enum;

/// The four fixed subjects of authorization checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Dummy)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Hr,
    Employee,
}

text_enum!(Role, "role" {
    Admin => "admin",
    Manager => "manager",
    Hr => "hr",
    Employee => "employee",
});

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::Hr, Role::Employee];

    /// Admin holds every permission by definition, not by stored grants.
    pub fn is_superuser(&self) -> bool {
        matches!(self, Role::Admin)
    }
}
