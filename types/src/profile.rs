use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::category::{CategoryCatalog, CategoryRef};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileData {
    /// Categories the user follows
    #[serde(default)]
    pub ctg_following: Vec<CategoryRef>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub profile_data: ProfileData,
}

impl UserProfile {
    /// Names of followed categories. Ids missing from the catalog are dropped.
    pub fn followed_category_names(&self, catalog: &CategoryCatalog) -> BTreeSet<String> {
        self.profile_data
            .ctg_following
            .iter()
            .filter_map(|c| catalog.resolve(c))
            .map(str::to_owned)
            .collect()
    }
}
