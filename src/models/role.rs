use serde::{Deserialize, Serialize};

/// A job function a new hire can onboard into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub title: String,
    pub category: RoleCategory,
    /// Name of the assistant skill that carries role-specific context.
    pub skill_name: String,
    pub description: String,
    pub department: String,
    pub common_teams: Vec<String>,
    /// Course IDs every hire in this role must complete.
    pub required_training: Vec<String>,
    pub typical_level: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum RoleCategory {
    Engineering,
    Product,
    Operations,
    Design,
    Data,
}

impl RoleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engineering => "engineering",
            Self::Product => "product",
            Self::Operations => "operations",
            Self::Design => "design",
            Self::Data => "data",
        }
    }
}

/// Role rendered as a dropdown option for the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Compact role header for cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDisplay {
    pub title: String,
    pub department: String,
    pub description: String,
    pub category: RoleCategory,
}

impl From<&Role> for RoleDisplay {
    fn from(role: &Role) -> Self {
        Self {
            title: role.title.clone(),
            department: role.department.clone(),
            description: role.description.clone(),
            category: role.category,
        }
    }
}

impl From<&Role> for SelectOption {
    fn from(role: &Role) -> Self {
        Self {
            value: role.id.clone(),
            label: role.title.clone(),
            description: Some(role.description.clone()),
        }
    }
}
