//! Supplier models.

use serde::{Deserialize, Serialize};

use octocat_supply_core::SupplierId;

/// A supplier of products and deliveries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub supplier_id: SupplierId,
    pub name: String,
    pub description: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
}

/// Payload for creating a supplier.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplier {
    pub name: String,
    pub description: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
}

/// Payload for partially updating a supplier. Absent fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplier {
    pub name: Option<String>,
    pub description: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_supplier_serializes_camel_case() {
        let supplier = Supplier {
            supplier_id: SupplierId::new(1),
            name: "Acme Corp".into(),
            description: "Office supplies supplier".into(),
            contact_person: "John Doe".into(),
            email: "john@acme.com".into(),
            phone: "555-0100".into(),
        };

        let json = serde_json::to_value(&supplier).unwrap();
        assert_eq!(json["supplierId"], 1);
        assert_eq!(json["contactPerson"], "John Doe");
    }

    #[test]
    fn test_update_payload_partial() {
        let update: UpdateSupplier = serde_json::from_str(r#"{"name":"New Name"}"#).unwrap();
        assert_eq!(update.name.as_deref(), Some("New Name"));
        assert!(update.email.is_none());
    }
}
