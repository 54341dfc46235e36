use serde::{Deserialize, Serialize};

/// A registered customer account.
///
/// Orders only need to know that an account exists; nothing else about it is read
/// during order composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
