//! Product create/update validation.
//!
//! Loose multipart fields map into a [`ProductDraft`]; validation turns the
//! draft into a typed success value or the first violated rule. Rules are
//! checked in a fixed order (name, description, price, category, quantity,
//! shipping, photo) and no data-layer call happens before they all pass.

use crate::error::StorefrontError;
use crate::model::Photo;
use crate::query::MAX_PHOTO_BYTES;
use uuid::Uuid;

/// Untyped product fields as received from a create/update request.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
    pub category: Option<Uuid>,
    pub quantity: Option<i32>,
    pub shipping: Option<bool>,
    pub photo: Option<Photo>,
}

/// A draft that passed create validation: every field present and in range.
#[derive(Debug, Clone)]
pub struct ValidatedProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub quantity: i32,
    pub shipping: bool,
    pub photo: Photo,
}

/// A draft that passed update validation; shipping and photo stay optional
/// (absent means "keep the stored value").
#[derive(Debug, Clone)]
pub struct ValidatedUpdate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub quantity: i32,
    pub shipping: Option<bool>,
    pub photo: Option<Photo>,
}

impl ProductDraft {
    /// Validates the draft for product creation.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Validation` with the first violated rule.
    pub fn validate_create(self) -> Result<ValidatedProduct, StorefrontError> {
        let (name, description, price, category_id, quantity) = self.validate_shared()?;
        let Some(shipping) = self.shipping else {
            return Err(validation("Shipping is Required"));
        };
        let Some(photo) = self.photo else {
            return Err(validation("Photo is Required"));
        };
        check_photo_size(&photo)?;
        Ok(ValidatedProduct {
            name,
            description,
            price,
            category_id,
            quantity,
            shipping,
            photo,
        })
    }

    /// Validates the draft for a product update. Shipping and photo are
    /// optional here; a supplied photo is still size-checked.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Validation` with the first violated rule.
    pub fn validate_update(self) -> Result<ValidatedUpdate, StorefrontError> {
        let (name, description, price, category_id, quantity) = self.validate_shared()?;
        if let Some(photo) = &self.photo {
            check_photo_size(photo)?;
        }
        Ok(ValidatedUpdate {
            name,
            description,
            price,
            category_id,
            quantity,
            shipping: self.shipping,
            photo: self.photo,
        })
    }

    fn validate_shared(&self) -> Result<(String, String, f64, Uuid, i32), StorefrontError> {
        if self.name.trim().is_empty() {
            return Err(validation("Name is Required"));
        }
        if self.description.trim().is_empty() {
            return Err(validation("Description is Required"));
        }
        let Some(price) = self.price else {
            return Err(validation("Price is Required"));
        };
        if !(price > 0.0) {
            return Err(validation("Price must be greater than 0"));
        }
        let Some(category_id) = self.category else {
            return Err(validation("Category is Required"));
        };
        let Some(quantity) = self.quantity else {
            return Err(validation("Quantity is Required"));
        };
        if quantity <= 0 {
            return Err(validation("Quantity must be greater than 0"));
        }
        Ok((
            self.name.clone(),
            self.description.clone(),
            price,
            category_id,
            quantity,
        ))
    }
}

fn check_photo_size(photo: &Photo) -> Result<(), StorefrontError> {
    if photo.data.len() > MAX_PHOTO_BYTES {
        return Err(validation("photo is Required and should be less then 1mb"));
    }
    Ok(())
}

fn validation(message: &str) -> StorefrontError {
    StorefrontError::Validation(message.to_owned())
}
