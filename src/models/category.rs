use serde::{Deserialize, Serialize};

use super::string_or_number;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(deserialize_with = "string_or_number")]
    pub category_id: String,
    pub name: String,
}

impl Category {
    /// "tECH" -> "Tech", as shown in listings.
    pub fn display_name(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => {
                let rest = chars.as_str().to_lowercase();
                first.to_uppercase().collect::<String>() + &rest
            }
            None => String::new(),
        }
    }
}

/// Join row of the post <-> category association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCategory {
    #[serde(deserialize_with = "string_or_number")]
    pub post_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub category_id: String,
}
