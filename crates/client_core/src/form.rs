//! Draft state for the product modal.
//!
//! Scalar fields keep their textual input representation until submission;
//! [`FormDraft::to_payload`] performs the coercion the catalog API expects.

use std::str::FromStr;

use shared::{
    domain::{Product, ProductId, MAX_PRODUCT_IMAGES},
    protocol::ProductPayload,
};
use thiserror::Error;
use tracing::warn;

use crate::error::{ClientError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Category,
    Unit,
    Description,
    Content,
    OriginPrice,
    Price,
    ImageUrl,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::Title,
        FormField::Category,
        FormField::Unit,
        FormField::Description,
        FormField::Content,
        FormField::OriginPrice,
        FormField::Price,
        FormField::ImageUrl,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Category => "category",
            Self::Unit => "unit",
            Self::Description => "description",
            Self::Content => "content",
            Self::OriginPrice => "origin_price",
            Self::Price => "price",
            Self::ImageUrl => "image_url",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Category => "Category",
            Self::Unit => "Unit",
            Self::Description => "Description",
            Self::Content => "Content",
            Self::OriginPrice => "Original price",
            Self::Price => "Price",
            Self::ImageUrl => "Main image URL",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "title" => Ok(Self::Title),
            "category" => Ok(Self::Category),
            "unit" => Ok(Self::Unit),
            "description" => Ok(Self::Description),
            "content" => Ok(Self::Content),
            "origin_price" => Ok(Self::OriginPrice),
            "price" => Ok(Self::Price),
            "image_url" | "imageUrl" => Ok(Self::ImageUrl),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDraft {
    id: Option<ProductId>,
    title: String,
    category: String,
    unit: String,
    description: String,
    content: String,
    origin_price: String,
    price: String,
    is_enabled: bool,
    image_url: String,
    images_url: Vec<String>,
}

impl FormDraft {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_product(product: &Product) -> Self {
        let mut images_url = product.images_url.clone();
        if images_url.len() > MAX_PRODUCT_IMAGES {
            warn!(
                product_id = %product.id,
                count = images_url.len(),
                "product carries more images than the form allows; truncating"
            );
            images_url.truncate(MAX_PRODUCT_IMAGES);
        }
        Self {
            id: Some(product.id.clone()),
            title: product.title.clone(),
            category: product.category.clone(),
            unit: product.unit.clone(),
            description: product.description.clone(),
            content: product.content.clone(),
            origin_price: product.origin_price.to_string(),
            price: product.price.to_string(),
            is_enabled: product.is_enabled,
            image_url: product.image_url.clone(),
            images_url,
        }
    }

    pub fn id(&self) -> Option<&ProductId> {
        self.id.as_ref()
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Category => &self.category,
            FormField::Unit => &self.unit,
            FormField::Description => &self.description,
            FormField::Content => &self.content,
            FormField::OriginPrice => &self.origin_price,
            FormField::Price => &self.price,
            FormField::ImageUrl => &self.image_url,
        }
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::Category => self.category = value,
            FormField::Unit => self.unit = value,
            FormField::Description => self.description = value,
            FormField::Content => self.content = value,
            FormField::OriginPrice => self.origin_price = value,
            FormField::Price => self.price = value,
            FormField::ImageUrl => self.image_url = value,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.is_enabled = enabled;
    }

    pub fn images(&self) -> &[String] {
        &self.images_url
    }

    pub fn can_add_image(&self) -> bool {
        self.images_url.len() < MAX_PRODUCT_IMAGES
    }

    /// Appends a blank image entry. No-op once the bound is reached.
    pub fn add_image(&mut self) -> bool {
        if !self.can_add_image() {
            return false;
        }
        self.images_url.push(String::new());
        true
    }

    pub fn remove_image(&mut self, index: usize) -> bool {
        if index >= self.images_url.len() {
            return false;
        }
        self.images_url.remove(index);
        true
    }

    pub fn set_image(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.images_url.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Coerces the draft into the submission body. The id is included only when
    /// the draft was seeded from an existing product.
    pub fn to_payload(&self) -> Result<ProductPayload> {
        Ok(ProductPayload {
            id: self.id.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            unit: self.unit.clone(),
            description: self.description.clone(),
            content: self.content.clone(),
            origin_price: coerce_number(FormField::OriginPrice, &self.origin_price)?,
            price: coerce_number(FormField::Price, &self.price)?,
            is_enabled: u8::from(self.is_enabled),
            image_url: self.image_url.clone(),
            images_url: self.images_url.clone(),
        })
    }
}

/// Blank numeric inputs submit as `0`, like an empty number input does.
fn coerce_number(field: FormField, raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ClientError::Validation(format!("{} must be a number", field.key())))
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
