//! Activity log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Activity log row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub metadata: serde_json::Value,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Activity entry waiting to be recorded
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: Option<Uuid>,
    pub action: &'static str,
    pub entity_type: Option<&'static str>,
    pub entity_id: Option<Uuid>,
    pub metadata: serde_json::Value,
    pub ip_address: Option<String>,
}

impl NewActivity {
    pub fn new(user_id: Option<Uuid>, action: &'static str) -> Self {
        Self {
            user_id,
            action,
            entity_type: None,
            entity_id: None,
            metadata: serde_json::Value::Object(Default::default()),
            ip_address: None,
        }
    }

    pub fn entity(mut self, entity_type: &'static str, entity_id: Uuid) -> Self {
        self.entity_type = Some(entity_type);
        self.entity_id = Some(entity_id);
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn ip(mut self, ip_address: Option<String>) -> Self {
        self.ip_address = ip_address;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{actions, entity_types};

    #[test]
    fn test_builder_defaults_and_entity() {
        let id = Uuid::new_v4();
        let entry = NewActivity::new(None, actions::INQUIRY_CREATE)
            .entity(entity_types::INQUIRY, id);

        assert_eq!(entry.action, "inquiry.create");
        assert_eq!(entry.entity_type, Some("inquiry"));
        assert_eq!(entry.entity_id, Some(id));
        assert_eq!(entry.metadata, serde_json::json!({}));
    }
}
