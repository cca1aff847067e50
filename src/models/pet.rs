use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, Default)]
pub enum Species {
    #[default]
    #[serde(rename = "dog")]
    #[display("dog")]
    Dog,
    #[serde(rename = "cat")]
    #[display("cat")]
    Cat,
    #[serde(rename = "other")]
    #[display("other")]
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, Default)]
pub enum Gender {
    #[default]
    #[serde(rename = "male")]
    #[display("male")]
    Male,
    #[serde(rename = "female")]
    #[display("female")]
    Female,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, Default)]
pub enum AdoptionStatus {
    #[default]
    #[serde(rename = "available")]
    #[display("available")]
    Available,
    #[serde(rename = "pending")]
    #[display("pending")]
    Pending,
    #[serde(rename = "adopted")]
    #[display("adopted")]
    Adopted,
}

/// Discretization of pet weight (lbs) used by the size filter.
/// The boundary table is fixed: small ≤ 20, medium 21–60, large 61–100,
/// extra-large ≥ 101; fractional weights fall into the bucket whose upper
/// bound they do not exceed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
pub enum SizeBucket {
    #[serde(rename = "small")]
    #[display("small")]
    Small,
    #[serde(rename = "medium")]
    #[display("medium")]
    Medium,
    #[serde(rename = "large")]
    #[display("large")]
    Large,
    #[serde(rename = "extra-large")]
    #[display("extra-large")]
    ExtraLarge,
}

impl SizeBucket {
    pub fn from_weight(weight: f64) -> Self {
        if weight <= 20.0 {
            return SizeBucket::Small;
        }
        if weight <= 60.0 {
            return SizeBucket::Medium;
        }
        if weight <= 100.0 {
            return SizeBucket::Large;
        }

        SizeBucket::ExtraLarge
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Pet {
    pub id: Uuid,
    pub shelter_id: Uuid,
    pub name: String,
    pub species: Species,
    pub breed: String,
    /// Age in years
    pub age: u8,
    /// Weight in lbs
    pub weight: f64,
    pub gender: Gender,
    pub description: String,
    pub short_description: String,
    /// Public object-store URLs, at least one after creation
    pub images: Vec<String>,
    pub characteristics: Vec<String>,
    pub city: String,
    pub state: String,
    pub adoption_status: AdoptionStatus,
    pub adopted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    pub fn size_bucket(&self) -> SizeBucket {
        SizeBucket::from_weight(self.weight)
    }

    /// Summary embedded in application views
    pub fn to_summary(&self) -> PetSummary {
        PetSummary {
            id: self.id,
            name: self.name.clone(),
            species: self.species,
            breed: self.breed.clone(),
            images: self.images.clone(),
            adoption_status: self.adoption_status,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetSummary {
    pub id: Uuid,
    pub name: String,
    pub species: Species,
    pub breed: String,
    pub images: Vec<String>,
    pub adoption_status: AdoptionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_bucket_boundaries() {
        assert_eq!(SizeBucket::from_weight(20.0), SizeBucket::Small);
        assert_eq!(SizeBucket::from_weight(21.0), SizeBucket::Medium);
        assert_eq!(SizeBucket::from_weight(60.0), SizeBucket::Medium);
        assert_eq!(SizeBucket::from_weight(61.0), SizeBucket::Large);
        assert_eq!(SizeBucket::from_weight(100.0), SizeBucket::Large);
        assert_eq!(SizeBucket::from_weight(101.0), SizeBucket::ExtraLarge);
    }

    #[test]
    fn fractional_weight_lands_in_the_enclosing_bucket() {
        assert_eq!(SizeBucket::from_weight(20.5), SizeBucket::Medium);
        assert_eq!(SizeBucket::from_weight(100.5), SizeBucket::ExtraLarge);
    }
}
