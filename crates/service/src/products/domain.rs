use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::errors::ServiceError;
use crate::storage::Record;

fn default_status() -> bool { true }

/// Product record as persisted in the products collection.
///
/// Every field but `id` and `status` is nullable: an update that omits a
/// field clears it. Keys this type does not know are carried in `extra`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<Number>,
    #[serde(default = "default_status")]
    pub status: bool,
    pub stock: Option<Number>,
    pub category: Option<String>,
    pub thumbnails: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Product {
    fn id(&self) -> &str { &self.id }
}

/// How a required creation field is judged missing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredFieldPolicy {
    /// Absent, null, empty text and numeric zero all count as missing.
    #[default]
    Truthy,
    /// Only absent or null counts as missing.
    Present,
}

impl RequiredFieldPolicy {
    fn text_given(self, v: &Option<String>) -> bool {
        match self {
            Self::Truthy => v.as_deref().is_some_and(|s| !s.is_empty()),
            Self::Present => v.is_some(),
        }
    }

    fn number_given(self, v: &Option<Number>) -> bool {
        match self {
            Self::Truthy => v.as_ref().and_then(Number::as_f64).is_some_and(|n| n != 0.0),
            Self::Present => v.is_some(),
        }
    }
}

/// Creation payload. Every field is optional so that missing ones can be
/// reported as a validation error instead of a decode failure.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<Number>,
    pub stock: Option<Number>,
    pub category: Option<String>,
    pub status: Option<bool>,
    pub thumbnails: Option<Vec<String>>,
}

impl NewProduct {
    /// Names of required fields the policy considers missing, in declaration order.
    pub fn missing_fields(&self, policy: RequiredFieldPolicy) -> Vec<&'static str> {
        let checks = [
            ("title", policy.text_given(&self.title)),
            ("description", policy.text_given(&self.description)),
            ("code", policy.text_given(&self.code)),
            ("price", policy.number_given(&self.price)),
            ("stock", policy.number_given(&self.stock)),
            ("category", policy.text_given(&self.category)),
        ];
        checks.into_iter().filter(|(_, ok)| !ok).map(|(name, _)| name).collect()
    }

    /// Validate and build the record under the given id.
    pub fn into_product(self, id: String, policy: RequiredFieldPolicy) -> Result<Product, ServiceError> {
        let missing = self.missing_fields(policy);
        if !missing.is_empty() {
            return Err(ServiceError::Validation(format!("missing: {}", missing.join(", "))));
        }
        Ok(Product {
            id,
            title: self.title,
            description: self.description,
            code: self.code,
            price: self.price,
            status: self.status.unwrap_or(true),
            stock: self.stock,
            category: self.category,
            thumbnails: Some(self.thumbnails.unwrap_or_default()),
            extra: Map::new(),
        })
    }
}

/// Update payload. Applying it overwrites every listed field, so a field
/// missing from the body becomes `null`. `id` and `status` are not part of it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    pub price: Option<Number>,
    pub stock: Option<Number>,
    pub category: Option<String>,
    pub thumbnails: Option<Vec<String>>,
}

impl ProductPatch {
    /// Overwrite the fields on a JSON object; other keys are left as they are.
    pub fn apply(self, record: &mut Map<String, Value>) {
        record.insert("title".into(), Value::from(self.title));
        record.insert("description".into(), Value::from(self.description));
        record.insert("code".into(), Value::from(self.code));
        record.insert("price".into(), Value::from(self.price));
        record.insert("stock".into(), Value::from(self.stock));
        record.insert("category".into(), Value::from(self.category));
        record.insert("thumbnails".into(), Value::from(self.thumbnails));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full() -> NewProduct {
        NewProduct {
            title: Some("A".into()),
            description: Some("d".into()),
            code: Some("c1".into()),
            price: Some(10.into()),
            stock: Some(5.into()),
            category: Some("x".into()),
            ..Default::default()
        }
    }

    #[test]
    fn truthy_policy_rejects_zero_and_empty() {
        let mut p = full();
        p.price = Some(0.into());
        p.title = Some(String::new());
        assert_eq!(p.missing_fields(RequiredFieldPolicy::Truthy), vec!["title", "price"]);
        assert!(p.missing_fields(RequiredFieldPolicy::Present).is_empty());
    }

    #[test]
    fn truthy_policy_accepts_fractional_stock() {
        let mut p = full();
        p.stock = Number::from_f64(2.5);
        assert!(p.missing_fields(RequiredFieldPolicy::Truthy).is_empty());

        p.stock = Number::from_f64(0.0);
        assert_eq!(p.missing_fields(RequiredFieldPolicy::Truthy), vec!["stock"]);
    }

    #[test]
    fn present_policy_still_rejects_absent() {
        let mut p = full();
        p.stock = None;
        assert_eq!(p.missing_fields(RequiredFieldPolicy::Present), vec!["stock"]);
    }

    #[test]
    fn defaults_fill_status_and_thumbnails() -> Result<(), ServiceError> {
        let prod = full().into_product("id-1".into(), RequiredFieldPolicy::Truthy)?;
        assert!(prod.status);
        assert_eq!(prod.thumbnails, Some(vec![]));
        assert_eq!(prod.id, "id-1");
        Ok(())
    }

    #[test]
    fn patch_overwrites_listed_fields_only() {
        let mut record = json!({"id": "id-1", "title": "A", "code": "c1", "status": false, "color": "red"});
        let patch = ProductPatch { title: Some("T".into()), ..Default::default() };
        if let Some(obj) = record.as_object_mut() {
            patch.apply(obj);
        }
        assert_eq!(
            record,
            json!({
                "id": "id-1", "title": "T", "description": null, "code": null, "price": null,
                "stock": null, "category": null, "thumbnails": null, "status": false, "color": "red"
            })
        );
    }

    #[test]
    fn numbers_keep_their_json_form() -> Result<(), serde_json::Error> {
        let input: NewProduct = serde_json::from_value(json!({
            "title": "A", "description": "d", "code": "c1", "price": 10, "stock": 2.5, "category": "x"
        }))?;
        let prod = input.into_product("id-1".into(), RequiredFieldPolicy::Truthy).expect("valid");
        let text = serde_json::to_string(&prod)?;
        assert!(text.starts_with(r#"{"id":"id-1","title":"A","description":"d","code":"c1","price":10,"status":true,"stock":2.5"#));
        Ok(())
    }

    #[test]
    fn unknown_keys_round_trip() -> Result<(), serde_json::Error> {
        let stored = json!({"id": "p", "title": "A", "price": 1, "stock": 1, "brand": "acme"});
        let prod: Product = serde_json::from_value(stored)?;
        assert!(prod.status);
        assert_eq!(prod.extra.get("brand"), Some(&json!("acme")));
        assert_eq!(serde_json::to_value(&prod)?["brand"], "acme");
        Ok(())
    }
}
