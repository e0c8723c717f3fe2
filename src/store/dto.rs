use serde::{Deserialize, Serialize};

/// Catalog snapshot entry. Stock is authoritative on the server; the client
/// never decrements it, it only estimates effective remaining stock against
/// the last fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Stock")]
    pub stock: u32,
    #[serde(rename = "Category_id")]
    pub category_id: i64,
    #[serde(rename = "Created_at", default)]
    pub created_at: String,
    #[serde(rename = "Updated_at", default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Created_at", default)]
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryList {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn product(id: i64, name: &str, price: f64, stock: u32) -> Product {
        Product {
            id,
            name: name.into(),
            description: String::new(),
            price,
            stock,
            category_id: 1,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    pub fn category(id: i64, name: &str) -> Category {
        Category {
            id,
            name: name.into(),
            created_at: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_uses_the_capitalized_wire_convention() {
        let raw = r#"{
            "Id": 3,
            "Name": "Spring Roll",
            "Description": "Crispy",
            "Price": 4.5,
            "Stock": 12,
            "Category_id": 2,
            "Created_at": "2026-01-10T09:00:00Z",
            "Updated_at": "2026-01-11T09:00:00Z"
        }"#;
        let product: Product = serde_json::from_str(raw).unwrap();
        assert_eq!(product.id, 3);
        assert_eq!(product.category_id, 2);
        assert_eq!(product.stock, 12);

        let back = serde_json::to_value(&product).unwrap();
        assert_eq!(back["Category_id"], 2);
        assert!(back.get("category_id").is_none());
    }

    #[test]
    fn list_envelopes_tolerate_missing_collections() {
        let list: ProductList = serde_json::from_str("{}").unwrap();
        assert!(list.products.is_empty());
        let list: CategoryList = serde_json::from_str(r#"{"categories":[]}"#).unwrap();
        assert!(list.categories.is_empty());
    }
}
