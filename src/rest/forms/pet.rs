//! Typed form behind `POST /pets` and `PUT /pets/:id`.
//!
//! Multipart text fields arrive as raw strings; the consumption methods
//! parse and validate them, collecting every broken field into one
//! validation answer instead of failing on the first.

use chrono::Utc;
use uuid::Uuid;

use crate::{
    consts,
    errors::ApiError,
    models::pet::{AdoptionStatus, Gender, Pet, Species},
    rest::forms::ImageUpload,
};

#[derive(Debug, Default)]
pub struct PetForm {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub weight: Option<String>,
    pub gender: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    /// JSON-encoded string array
    pub characteristics: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub adoption_status: Option<String>,
    /// JSON-encoded URL array; the kept subset of the current images on edit
    pub existing_images: Option<String>,
    pub images: Vec<ImageUpload>,
}

fn parse_enum_field<T: serde::de::DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_str::<T>(&format!("\"{}\"", raw.trim())).ok()
}

fn default_short_description(description: &str) -> String {
    let prefix: String = description
        .chars()
        .take(consts::SHORT_DESCRIPTION_MAX_CHARS)
        .collect();

    format!("{prefix}...")
}

impl PetForm {
    /// Builds the new listing; every field of the validation contract is
    /// required here. `images` starts empty so the caller can validate
    /// before paying for uploads, then attach the public URLs.
    pub fn into_new_pet(self, shelter_id: Uuid) -> Result<Pet, ApiError> {
        let mut errors = vec![];

        let name = self.name.unwrap_or_default().trim().to_string();
        if name.is_empty() {
            errors.push("Pet name is required".to_string());
        }

        let breed = self.breed.unwrap_or_default().trim().to_string();
        if breed.is_empty() {
            errors.push("Breed is required".to_string());
        }

        let species = self.species.as_deref().and_then(parse_enum_field::<Species>);
        if species.is_none() {
            errors.push("Species must be dog, cat, or other".to_string());
        }

        let age = self
            .age
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u8>().ok())
            .filter(|age| *age <= consts::MAX_PET_AGE_YEARS);
        if age.is_none() {
            errors.push("Valid age is required".to_string());
        }

        let weight = self
            .weight
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|weight| *weight > 0.0);
        if weight.is_none() {
            errors.push("Valid weight is required".to_string());
        }

        let gender = self.gender.as_deref().and_then(parse_enum_field::<Gender>);
        if gender.is_none() {
            errors.push("Gender must be male or female".to_string());
        }

        let description = self.description.unwrap_or_default().trim().to_string();
        if description.is_empty() {
            errors.push("Description is required".to_string());
        }

        let city = self.city.unwrap_or_default().trim().to_string();
        if city.is_empty() {
            errors.push("City is required".to_string());
        }

        let state = self.state.unwrap_or_default().trim().to_string();
        if state.is_empty() {
            errors.push("State is required".to_string());
        }

        let characteristics = match self.characteristics.as_deref() {
            None | Some("") => Some(vec![]),
            Some(raw) => serde_json::from_str::<Vec<String>>(raw).ok(),
        };
        if characteristics.is_none() {
            errors.push("Characteristics must be a JSON array of strings".to_string());
        }

        match (species, age, weight, gender, characteristics) {
            (Some(species), Some(age), Some(weight), Some(gender), Some(characteristics))
                if errors.is_empty() =>
            {
                let short_description = self
                    .short_description
                    .filter(|short| !short.trim().is_empty())
                    .unwrap_or_else(|| default_short_description(&description));
                let now = Utc::now();

                Ok(Pet {
                    id: Uuid::new_v4(),
                    shelter_id,
                    name,
                    species,
                    breed,
                    age,
                    weight,
                    gender,
                    description,
                    short_description,
                    images: vec![],
                    characteristics,
                    city,
                    state,
                    adoption_status: AdoptionStatus::Available,
                    adopted_by: None,
                    created_at: now,
                    updated_at: now,
                })
            }
            _ => Err(ApiError::Validation(errors)),
        }
    }

    /// Edits an existing listing; only supplied fields change and
    /// `species` never does. Image handling mirrors the submit contract:
    /// new uploads replace the image list (appended to `existingImages`
    /// when that was sent), a bare non-empty `existingImages` prunes the
    /// list, neither leaves it alone.
    pub fn apply_to(self, pet: &mut Pet, new_image_urls: Vec<String>) -> Result<(), ApiError> {
        let mut errors = vec![];

        if let Some(raw) = self.age.as_deref() {
            match raw
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|age| *age <= consts::MAX_PET_AGE_YEARS)
            {
                Some(age) => pet.age = age,
                None => errors.push("Valid age is required".to_string()),
            }
        }

        if let Some(raw) = self.weight.as_deref() {
            match raw.trim().parse::<f64>().ok().filter(|weight| *weight > 0.0) {
                Some(weight) => pet.weight = weight,
                None => errors.push("Valid weight is required".to_string()),
            }
        }

        if let Some(raw) = self.gender.as_deref() {
            match parse_enum_field::<Gender>(raw) {
                Some(gender) => pet.gender = gender,
                None => errors.push("Gender must be male or female".to_string()),
            }
        }

        if let Some(raw) = self.adoption_status.as_deref() {
            match parse_enum_field::<AdoptionStatus>(raw) {
                Some(status) => pet.adoption_status = status,
                None => errors.push("Status must be available, pending, or adopted".to_string()),
            }
        }

        if let Some(raw) = self.characteristics.as_deref() {
            match serde_json::from_str::<Vec<String>>(raw) {
                Ok(characteristics) => pet.characteristics = characteristics,
                Err(_) => {
                    errors.push("Characteristics must be a JSON array of strings".to_string())
                }
            }
        }

        let existing_images = match self.existing_images.as_deref() {
            Some(raw) => match serde_json::from_str::<Vec<String>>(raw) {
                Ok(urls) => Some(urls),
                Err(_) => {
                    errors.push("existingImages must be a JSON array of URLs".to_string());
                    None
                }
            },
            None => None,
        };

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        if let Some(name) = self.name {
            pet.name = name;
        }
        if let Some(breed) = self.breed {
            pet.breed = breed;
        }
        if let Some(description) = self.description {
            pet.description = description;
        }
        if let Some(short_description) = self.short_description {
            pet.short_description = short_description;
        }
        if let Some(city) = self.city {
            pet.city = city;
        }
        if let Some(state) = self.state {
            pet.state = state;
        }

        if !new_image_urls.is_empty() {
            let mut images = existing_images.unwrap_or_default();
            images.extend(new_image_urls);
            pet.images = images;
        } else if let Some(existing) = existing_images.filter(|urls| !urls.is_empty()) {
            pet.images = existing;
        }

        pet.updated_at = Utc::now();

        Ok(())
    }
}
