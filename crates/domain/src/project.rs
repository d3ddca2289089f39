use crate::shared::entity::{Entity, ID};

/// Minimal view of a project, only what reminder emails need.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: ID,
    pub name: String,
}

impl Entity for Project {
    fn id(&self) -> &ID {
        &self.id
    }
}
