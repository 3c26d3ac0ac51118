use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

/// Represents a product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,

    #[validate(
        custom(function = "finite_price", message = "price must be a number"),
        range(min = 0.0, max = 10000.0, message = "price must be between 0 and 10000")
    )]
    pub price: f64,

    pub description: Option<String>,

    #[validate(custom(function = "web_url", message = "imageUrl must be a URL address"))]
    pub image_url: Option<String>,
}

/// Payload for updating an existing product. Absent fields are left as they are.
///
/// Carries no `id`: a product keeps the id it was created with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,

    #[validate(
        custom(function = "finite_price", message = "price must be a number"),
        range(min = 0.0, max = 10000.0, message = "price must be between 0 and 10000")
    )]
    pub price: Option<f64>,

    pub description: Option<String>,

    pub discounted_price: Option<f64>,

    #[validate(custom(function = "web_url", message = "imageUrl must be a URL address"))]
    pub image_url: Option<String>,
}

/// Acknowledgment returned by a successful removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub deleted: bool,
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
            discounted_price: None,
            image_url: None,
        }
    }
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
            ..Default::default()
        }
    }
}

const WEB_URL_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

/// Rejects NaN and the infinities, which `range` lets through.
fn finite_price(price: f64) -> Result<(), ValidationError> {
    if price.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

/// An absolute http, https or ftp URL with a non-empty host.
fn web_url(value: &str) -> Result<(), ValidationError> {
    let url = Url::parse(value).map_err(|_| ValidationError::new("url"))?;
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    if WEB_URL_SCHEMES.contains(&url.scheme()) && has_host {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

/// The fixed catalog every fresh store starts with.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new(1, "Toaster", "2-slot toaster with 6 browning levels", 299.0),
        Product::new(2, "Electric Kettle", "1.7 litre kettle with automatic shut-off", 150.0),
        Product::new(3, "Pedestal Fan", "16 inch pedestal fan with 3 oscillation settings", 918.0),
        Product::new(4, "Steam Iron", "1500W steam iron with vertical steaming", 549.0),
        Product::new(5, "Vacuum Cleaner", "Bagless vacuum cleaner with strong suction", 1590.0),
        Product::new(6, "Microwave Oven", "20 litre microwave oven with defrost function", 1490.0),
        Product::new(7, "Air Purifier", "PM 2.5 air purifier covering 30 square metres", 2590.0),
        Product::new(8, "Rice Cooker", "1.8 litre rice cooker with automatic keep-warm", 289.0),
        Product::new(9, "Air Conditioner", "9,000 BTU inverter air conditioner", 11290.0),
        Product::new(10, "Smart TV", "55 inch 4K UHD smart TV", 9900.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_ten_sequential_ids() {
        let seed = seed_products();
        let ids: Vec<u64> = seed.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u64>>());
        assert!(seed.iter().all(|p| !p.name.is_empty()));
    }

    #[test]
    fn test_create_payload_rules() {
        assert!(ProductCreate::new("Lamp", 100.0).validate().is_ok());
        assert!(ProductCreate::new("Free sample", 0.0).validate().is_ok());
        assert!(ProductCreate::new("Top shelf", 10000.0).validate().is_ok());

        assert!(ProductCreate::new("", 100.0).validate().is_err());
        assert!(ProductCreate::new("Lamp", -1.0).validate().is_err());
        assert!(ProductCreate::new("Lamp", 10000.5).validate().is_err());
        assert!(ProductCreate::new("x", f64::NAN).validate().is_err());
        assert!(ProductCreate::new("x", f64::INFINITY).validate().is_err());

        let bad_url = ProductCreate {
            image_url: Some("not a url".to_string()),
            ..ProductCreate::new("Lamp", 100.0)
        };
        let errors = bad_url.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("image_url"));

        let good_url = ProductCreate {
            image_url: Some("https://cdn.example.com/lamp.png".to_string()),
            ..ProductCreate::new("Lamp", 100.0)
        };
        assert!(good_url.validate().is_ok());

        for scheme_only in ["javascript:alert(1)", "foo:bar", "file:///tmp/lamp.png"] {
            let payload = ProductCreate {
                image_url: Some(scheme_only.to_string()),
                ..ProductCreate::new("Lamp", 100.0)
            };
            let errors = payload.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("image_url"), "accepted {scheme_only}");
        }

        let ftp = ProductCreate {
            image_url: Some("ftp://files.example.com/lamp.png".to_string()),
            ..ProductCreate::new("Lamp", 100.0)
        };
        assert!(ftp.validate().is_ok());
    }

    #[test]
    fn test_patch_rules_only_apply_to_present_fields() {
        assert!(ProductPatch::default().validate().is_ok());
        assert!(ProductPatch { price: Some(500.0), ..Default::default() }.validate().is_ok());
        assert!(ProductPatch { price: Some(20000.0), ..Default::default() }.validate().is_err());
        assert!(ProductPatch { name: Some(String::new()), ..Default::default() }.validate().is_err());
        assert!(ProductPatch { price: Some(f64::NAN), ..Default::default() }.validate().is_err());
    }

    #[test]
    fn test_patch_image_url_needs_web_scheme_and_host() {
        let patch = |url: &str| ProductPatch { image_url: Some(url.to_string()), ..Default::default() };

        assert!(patch("https://cdn.example.com/toaster.png").validate().is_ok());
        assert!(patch("javascript:alert(1)").validate().is_err());
        assert!(patch("foo:bar").validate().is_err());
        assert!(patch("http://").validate().is_err());
    }

    #[test]
    fn test_product_json_shape() {
        let product = Product::new(11, "Lamp", "", 100.0);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 11, "name": "Lamp", "price": 100.0, "description": "" })
        );

        let with_image = Product {
            image_url: Some("https://cdn.example.com/lamp.png".to_string()),
            ..product
        };
        let json = serde_json::to_value(&with_image).unwrap();
        assert_eq!(json["imageUrl"], "https://cdn.example.com/lamp.png");
    }

    #[test]
    fn test_create_payload_from_json_defaults_optionals() {
        let payload: ProductCreate =
            serde_json::from_str(r#"{ "name": "Lamp", "price": 100 }"#).unwrap();
        assert_eq!(payload, ProductCreate::new("Lamp", 100.0));
    }

    #[test]
    fn test_deleted_json_shape() {
        let json = serde_json::to_string(&Deleted { deleted: true }).unwrap();
        assert_eq!(json, r#"{"deleted":true}"#);
    }
}
