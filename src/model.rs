use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned category identifier. Never minted on the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

/// Server-assigned food identifier. Never minted on the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FoodId(pub i64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Food {
    pub id: FoodId,
    pub name: String,
    pub cost: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub foods: Vec<Food>,
}

impl Category {
    pub fn food(&self, id: FoodId) -> Option<&Food> {
        self.foods.iter().find(|f| f.id == id)
    }
}

/// Body for creating or renaming a category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryName {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewFood {
    pub name: String,
    pub cost: f64,
}

/// Partial food update; absent fields are left untouched by the server.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FoodPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_without_foods_field_decodes_empty() {
        let cat: Category = serde_json::from_str(r#"{"id": 3, "name": "Drinks"}"#).unwrap();
        assert_eq!(cat.id, CategoryId(3));
        assert!(cat.foods.is_empty());
    }

    #[test]
    fn patch_omits_missing_fields() {
        let patch = FoodPatch {
            name: None,
            cost: Some(25000.0),
        };
        assert_eq!(serde_json::to_string(&patch).unwrap(), r#"{"cost":25000.0}"#);
        assert_eq!(serde_json::to_string(&FoodPatch::default()).unwrap(), "{}");
    }
}
