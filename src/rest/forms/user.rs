//! Typed form behind `PUT /users/profile`.

use crate::{api::user::ProfileUpdateRequest, errors::ApiError, rest::forms::ImageUpload};

/// Raw multipart capture; text values stay strings until [`into_parts`]
/// parses the typed ones.
///
/// [`into_parts`]: ProfileForm::into_parts
#[derive(Debug, Default)]
pub struct ProfileForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub profile_image: Option<String>,
    pub living_type: Option<String>,
    pub has_yard: Option<String>,
    pub household_members: Option<String>,
    pub shelter_name: Option<String>,
    pub shelter_description: Option<String>,
    pub website: Option<String>,
    pub avatar: Option<ImageUpload>,
}

impl ProfileForm {
    pub fn into_parts(self) -> Result<(ProfileUpdateRequest, Option<ImageUpload>), ApiError> {
        let household_members = match self.household_members.as_deref() {
            None => None,
            Some(raw) => match raw.trim().parse::<u32>().ok().filter(|count| *count >= 1) {
                Some(count) => Some(count),
                None => {
                    return Err(ApiError::validation(
                        "Valid household members count required",
                    ));
                }
            },
        };

        let request = ProfileUpdateRequest {
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            address: self.address,
            city: self.city,
            state: self.state,
            zip: self.zip,
            profile_image: self.profile_image,
            living_type: self.living_type,
            has_yard: self
                .has_yard
                .map(|raw| matches!(raw.trim(), "true" | "on" | "1")),
            household_members,
            shelter_name: self.shelter_name,
            shelter_description: self.shelter_description,
            website: self.website,
        };

        Ok((request, self.avatar))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_parts_parses_typed_fields() {
        let form = ProfileForm {
            first_name: Some("Jamie".to_string()),
            has_yard: Some("true".to_string()),
            household_members: Some("3".to_string()),
            ..Default::default()
        };

        let (request, avatar) = form.into_parts().unwrap();

        assert_eq!(request.first_name.as_deref(), Some("Jamie"));
        assert_eq!(request.has_yard, Some(true));
        assert_eq!(request.household_members, Some(3));
        assert!(avatar.is_none());
    }

    #[test]
    fn test_into_parts_rejects_bad_household_count() {
        let form = ProfileForm {
            household_members: Some("0".to_string()),
            ..Default::default()
        };

        assert!(form.into_parts().is_err());
    }

    #[test]
    fn test_untouched_fields_stay_none() {
        let (request, _) = ProfileForm::default().into_parts().unwrap();

        assert!(request.has_yard.is_none());
        assert!(request.household_members.is_none());
        assert!(request.profile_image.is_none());
    }
}
