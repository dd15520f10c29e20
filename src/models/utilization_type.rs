use serde::Serialize;

/// A named kind of work an employee can be assigned to.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UtilizationType {
    pub id: i64,
    pub name: String,
}

impl UtilizationType {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
