use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub class_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Student {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: None,
            class_name: None,
            created_at: Utc::now(),
        }
    }
}
