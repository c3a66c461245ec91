use serde::{Deserialize, Serialize};

/// Label shown for a category id missing from the catalog
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// Reference to a category as it appears on the wire.
///
/// Different endpoints embed categories as bare ids, bare names
/// or full objects, sometimes within the same payload.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(u64),
    Name(String),
    Full(Category),
}

impl From<Category> for CategoryRef {
    fn from(category: Category) -> Self {
        Self::Full(category)
    }
}

/// Category list supplied wholesale by the backend, immutable for a session
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn by_id(&self, id: u64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Name of the referenced category, None if the id is not in the catalog
    pub fn resolve<'a>(&'a self, category: &'a CategoryRef) -> Option<&'a str> {
        match category {
            CategoryRef::Id(id) => self.by_id(*id).map(|c| c.name.as_str()),
            CategoryRef::Name(name) => Some(name.as_str()),
            CategoryRef::Full(c) => Some(c.name.as_str()),
        }
    }

    pub fn display_name<'a>(&'a self, category: &'a CategoryRef) -> &'a str {
        self.resolve(category).unwrap_or(UNKNOWN_CATEGORY)
    }
}
