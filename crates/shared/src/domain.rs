use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Upper bound on secondary image URLs a product may carry.
pub const MAX_PRODUCT_IMAGES: usize = 5;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(ProductId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin_price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(
        default,
        deserialize_with = "flag_from_wire",
        serialize_with = "flag_to_wire"
    )]
    pub is_enabled: bool,
    #[serde(default, rename = "imageUrl", deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(default, rename = "imagesUrl", deserialize_with = "null_as_default")]
    pub images_url: Vec<String>,
}

/// Reads an explicit `null` the same as a missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The catalog API reports the enabled flag as `0`/`1`, older records as booleans.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireFlag {
    Bool(bool),
    Int(i64),
}

fn flag_from_wire<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<WireFlag>::deserialize(deserializer)? {
        Some(WireFlag::Bool(value)) => value,
        Some(WireFlag::Int(value)) => value != 0,
        None => false,
    })
}

fn flag_to_wire<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(u8::from(*value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_enabled_flag_from_integer_or_bool() {
        let from_int: Product =
            serde_json::from_str(r#"{"id":"p1","is_enabled":1}"#).expect("int flag");
        let from_bool: Product =
            serde_json::from_str(r#"{"id":"p2","is_enabled":false}"#).expect("bool flag");
        assert!(from_int.is_enabled);
        assert!(!from_bool.is_enabled);
    }

    #[test]
    fn missing_optional_fields_fall_back_to_blank() {
        let product: Product = serde_json::from_str(r#"{"id":"p1","title":"Tea"}"#).expect("decode");
        assert_eq!(product.title, "Tea");
        assert_eq!(product.price, 0.0);
        assert!(product.images_url.is_empty());
        assert!(product.image_url.is_empty());
    }

    #[test]
    fn null_fields_fall_back_to_blank() {
        let product: Product = serde_json::from_str(
            r#"{"id":"p1","title":null,"price":null,"is_enabled":null,"imageUrl":null,"imagesUrl":null}"#,
        )
        .expect("decode");
        assert_eq!(product.title, "");
        assert_eq!(product.price, 0.0);
        assert!(!product.is_enabled);
        assert!(product.image_url.is_empty());
        assert!(product.images_url.is_empty());
    }

    #[test]
    fn encodes_image_fields_with_api_names() {
        let product = Product {
            id: ProductId::new("p1"),
            title: "Tea".into(),
            category: "drinks".into(),
            unit: "cup".into(),
            description: String::new(),
            content: String::new(),
            origin_price: 100.0,
            price: 80.0,
            is_enabled: true,
            image_url: "https://img/main.png".into(),
            images_url: vec!["https://img/1.png".into()],
        };
        let value = serde_json::to_value(&product).expect("encode");
        assert_eq!(value["imageUrl"], "https://img/main.png");
        assert_eq!(value["imagesUrl"][0], "https://img/1.png");
        assert_eq!(value["is_enabled"], 1);
    }
}
