use serde::Deserialize;
use uuid::Uuid;

use crate::repos::product_repo::ProductFields;

use super::FieldError;

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub series: String,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub technical_overview: String,
    #[serde(default)]
    pub typical_application: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub datasheet_url: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ProductRequest {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.name.trim().is_empty() {
            return Err(FieldError::new("NAME_REQUIRED", "name is required"));
        }
        Ok(())
    }

    pub fn fields(&self) -> ProductFields<'_> {
        ProductFields {
            name: self.name.trim(),
            brand: &self.brand,
            series: &self.series,
            category_id: self.category_id,
            technical_overview: &self.technical_overview,
            typical_application: &self.typical_application,
            images: &self.images,
            datasheet_url: &self.datasheet_url,
            is_active: self.is_active,
        }
    }
}
