//! Organization models: headquarters and their branches.

use serde::{Deserialize, Serialize};

use octocat_supply_core::{BranchId, HeadquartersId};

/// A company headquarters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Headquarters {
    pub headquarters_id: HeadquartersId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHeadquarters {
    pub name: String,
    pub description: String,
    pub address: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHeadquarters {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A branch office belonging to a headquarters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub branch_id: BranchId,
    pub headquarters_id: HeadquartersId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranch {
    pub headquarters_id: HeadquartersId,
    pub name: String,
    pub description: String,
    pub address: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranch {
    pub headquarters_id: Option<HeadquartersId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_wire_format() {
        let branch = Branch {
            branch_id: BranchId::new(1),
            headquarters_id: HeadquartersId::new(1),
            name: "Main Branch".into(),
            description: "Main branch location".into(),
            address: "123 Main St".into(),
            contact_person: "Alice Johnson".into(),
            email: "alice@branch.com".into(),
            phone: "555-0400".into(),
        };

        let json = serde_json::to_value(&branch).unwrap();
        assert_eq!(json["branchId"], 1);
        assert_eq!(json["headquartersId"], 1);
        assert_eq!(json["address"], "123 Main St");
    }
}
