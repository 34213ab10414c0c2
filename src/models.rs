use serde::{Deserialize, Serialize};

/// A named workflow record. The id is assigned by the database and never
/// changes once issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workflow {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateWorkflowRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateWorkflowRequest {
    pub name: Option<String>,
}

impl CreateWorkflowRequest {
    pub fn validated_name(&self) -> Option<String> {
        validated_name(self.name.as_deref())
    }
}

impl UpdateWorkflowRequest {
    pub fn validated_name(&self) -> Option<String> {
        validated_name(self.name.as_deref())
    }
}

// A name is accepted only if something is left after trimming.
fn validated_name(raw: Option<&str>) -> Option<String> {
    let name = raw?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
