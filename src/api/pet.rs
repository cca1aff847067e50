//! # Pet API Module
//!
//! This module contains all pet-related business logic: the catalog
//! search/filter engine, featured and similar-pet listings, and the
//! create/update/delete flows shelters use to manage their animals.

use crate::errors::ApiError;
use crate::models::pet::{AdoptionStatus, Gender, Pet, SizeBucket, Species};
use crate::{consts, repo, services, utils};
use log::warn;
use serde::Deserialize;
use uuid::Uuid;

/// Sort keys accepted by the catalog search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CreatedAt,
    Name,
    Age,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Raw query-string parameters of `GET /pets`.
///
/// Every field arrives as an optional string; [`SearchQuery::to_filters`]
/// turns them into typed filters. Enum-valued fields reject unknown values
/// with a validation error, numeric fields fall back to their defaults when
/// unparsable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQuery {
    pub species: Option<String>,
    pub gender: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub size: Option<String>,
    pub query: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl SearchQuery {
    pub fn to_filters(&self) -> Result<SearchFilters, ApiError> {
        let mut errors: Vec<String> = Vec::new();

        let species = self.parse_enum_param::<Species>(
            &self.species,
            "Species must be dog, cat, or other",
            &mut errors,
        );
        let gender = self.parse_enum_param::<Gender>(
            &self.gender,
            "Gender must be male or female",
            &mut errors,
        );
        let size = self.parse_enum_param::<SizeBucket>(
            &self.size,
            "Size must be small, medium, large, or extra-large",
            &mut errors,
        );
        let status = self
            .parse_enum_param::<AdoptionStatus>(
                &self.status,
                "Status must be available, pending, or adopted",
                &mut errors,
            )
            .unwrap_or_default();

        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        Ok(SearchFilters {
            species,
            gender,
            min_age: parse_lenient::<u8>(&self.min_age),
            max_age: parse_lenient::<u8>(&self.max_age),
            city: self.city.clone().filter(|value| !value.is_empty()),
            state: self.state.clone().filter(|value| !value.is_empty()),
            size,
            query: self.query.clone().filter(|value| !value.is_empty()),
            status,
            sort_by: match self.sort_by.as_deref() {
                Some("name") => SortKey::Name,
                Some("age") => SortKey::Age,
                _ => SortKey::CreatedAt,
            },
            sort_order: match self.sort_order.as_deref() {
                Some("asc") => SortOrder::Asc,
                _ => SortOrder::Desc,
            },
            limit: parse_lenient::<usize>(&self.limit)
                .filter(|limit| *limit > 0)
                .unwrap_or(consts::DEFAULT_SEARCH_LIMIT)
                .min(consts::MAX_SEARCH_LIMIT),
            offset: parse_lenient::<usize>(&self.offset).unwrap_or(0),
        })
    }

    /// Enum params are parsed through their serde names so the accepted
    /// spellings stay identical to the stored values.
    fn parse_enum_param<T: serde::de::DeserializeOwned>(
        &self,
        raw: &Option<String>,
        message: &str,
        errors: &mut Vec<String>,
    ) -> Option<T> {
        let raw = raw.as_deref().filter(|value| !value.is_empty())?;
        match serde_json::from_str::<T>(&format!("\"{raw}\"")) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                errors.push(message.to_string());
                None
            }
        }
    }
}

fn parse_lenient<T: std::str::FromStr>(raw: &Option<String>) -> Option<T> {
    raw.as_deref().and_then(|value| value.parse::<T>().ok())
}

/// Typed filter set applied to the candidate list as an AND-conjunction.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub species: Option<Species>,
    pub gender: Option<Gender>,
    pub min_age: Option<u8>,
    pub max_age: Option<u8>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub size: Option<SizeBucket>,
    pub query: Option<String>,
    pub status: AdoptionStatus,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub limit: usize,
    pub offset: usize,
}

impl SearchFilters {
    fn matches(&self, pet: &Pet) -> bool {
        if self.species.is_some_and(|species| pet.species != species) {
            return false;
        }
        if self.gender.is_some_and(|gender| pet.gender != gender) {
            return false;
        }
        if self.min_age.is_some_and(|min_age| pet.age < min_age) {
            return false;
        }
        if self.max_age.is_some_and(|max_age| pet.age > max_age) {
            return false;
        }
        if self
            .city
            .as_deref()
            .is_some_and(|city| !pet.city.eq_ignore_ascii_case(city))
        {
            return false;
        }
        if self
            .state
            .as_deref()
            .is_some_and(|state| !pet.state.eq_ignore_ascii_case(state))
        {
            return false;
        }
        if self.size.is_some_and(|size| pet.size_bucket() != size) {
            return false;
        }
        if let Some(query) = self.query.as_deref() {
            if !matches_text(pet, &query.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

/// Case-insensitive substring match over name OR breed.
fn matches_text(pet: &Pet, needle: &str) -> bool {
    pet.name.to_lowercase().contains(needle) || pet.breed.to_lowercase().contains(needle)
}

fn sort_pets(pets: &mut [Pet], key: SortKey, order: SortOrder) {
    pets.sort_by(|a, b| {
        let ordering = match key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Age => a.age.cmp(&b.age),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// One page of catalog search results.
#[derive(Debug)]
pub struct SearchResult {
    pub items: Vec<Pet>,
    /// Count of matching pets before the page slice
    pub total: usize,
    pub has_more: bool,
    pub limit: usize,
    pub offset: usize,
}

/// Runs the catalog search over the status-matching candidate set.
///
/// # Process
/// 1. Pull every pet in the requested adoption status (default available)
/// 2. Drop candidates failing any supplied structural filter
/// 3. Drop candidates failing the free-text name/breed match
/// 4. Stable-sort by the requested key and slice the page
///
/// `total` counts matches before slicing so an out-of-range offset still
/// reports how many pets matched.
pub async fn search_pets(
    query: &SearchQuery,
    repo: &repo::ImplAppRepo,
) -> Result<SearchResult, ApiError> {
    let filters = query.to_filters()?;

    let candidates = repo.get_pets_by_status(filters.status).await?;
    let mut matches: Vec<Pet> = candidates
        .into_iter()
        .filter(|pet| filters.matches(pet))
        .collect();

    sort_pets(&mut matches, filters.sort_by, filters.sort_order);

    let total = matches.len();
    let items: Vec<Pet> = matches
        .into_iter()
        .skip(filters.offset)
        .take(filters.limit)
        .collect();

    Ok(SearchResult {
        items,
        total,
        has_more: filters.offset + filters.limit < total,
        limit: filters.limit,
        offset: filters.offset,
    })
}

/// Quick name/breed lookup used by the search box.
pub async fn quick_search(
    query: Option<String>,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<Pet>, ApiError> {
    let Some(query) = query.filter(|value| !value.trim().is_empty()) else {
        return Err(ApiError::Conflict("Search query is required".to_string()));
    };

    let needle = query.to_lowercase();
    let mut matches: Vec<Pet> = repo
        .get_pets_by_status(AdoptionStatus::Available)
        .await?
        .into_iter()
        .filter(|pet| matches_text(pet, &needle))
        .collect();
    matches.truncate(consts::QUICK_SEARCH_LIMIT);

    Ok(matches)
}

/// Newest available pets for the landing page.
pub async fn featured_pets(
    limit: Option<usize>,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<Pet>, ApiError> {
    let limit = limit.unwrap_or(consts::DEFAULT_FEATURED_LIMIT);
    let mut pets = repo.get_pets_by_status(AdoptionStatus::Available).await?;
    pets.truncate(limit);

    Ok(pets)
}

/// Available pets of the same species ranked by location affinity.
///
/// Score = 2 per shared city + 1 per shared state, descending; ties keep
/// the candidate order. An unknown `pet_id` yields an empty list rather
/// than an error so the detail page can always render the section.
pub async fn similar_pets(pet_id: Uuid, repo: &repo::ImplAppRepo) -> Result<Vec<Pet>, ApiError> {
    let Some(pet) = repo.get_pet_by_id(pet_id).await? else {
        return Ok(Vec::new());
    };

    let mut candidates: Vec<Pet> = repo
        .get_pets_by_status(AdoptionStatus::Available)
        .await?
        .into_iter()
        .filter(|candidate| candidate.species == pet.species && candidate.id != pet.id)
        .collect();

    candidates.sort_by_key(|candidate| std::cmp::Reverse(similarity_score(candidate, &pet)));
    candidates.truncate(consts::DEFAULT_SIMILAR_LIMIT);

    Ok(candidates)
}

fn similarity_score(candidate: &Pet, target: &Pet) -> u8 {
    let mut score = 0;
    if candidate.city.eq_ignore_ascii_case(&target.city) {
        score += 2;
    }
    if candidate.state.eq_ignore_ascii_case(&target.state) {
        score += 1;
    }

    score
}

pub async fn get_pet(pet_id: Uuid, repo: &repo::ImplAppRepo) -> Result<Pet, ApiError> {
    repo.get_pet_by_id(pet_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Pet not found".to_string()))
}

pub async fn create_pet(pet: Pet, repo: &repo::ImplAppRepo) -> Result<Pet, ApiError> {
    repo.insert_pet(&pet).await?;

    Ok(pet)
}

pub async fn update_pet(pet: Pet, repo: &repo::ImplAppRepo) -> Result<Pet, ApiError> {
    repo.update_pet(&pet).await?;

    Ok(pet)
}

/// Deletes a pet and then its stored images.
///
/// Image deletion is best-effort: a storage failure is logged and the
/// pet stays deleted.
pub async fn delete_pet(
    pet: &Pet,
    repo: &repo::ImplAppRepo,
    storage_service: &services::ImplStorageService,
) -> Result<(), ApiError> {
    repo.delete_pet(pet.id).await?;

    let deletions = pet
        .images
        .iter()
        .filter_map(|url| utils::storage_key_from_url(url))
        .map(|key| async move {
            let outcome = storage_service.delete_image(&key).await;
            (key, outcome)
        });
    for (key, outcome) in futures::future::join_all(deletions).await {
        if let Err(err) = outcome {
            warn!("could not delete stored image {key}: {err:#}");
        }
    }

    Ok(())
}

pub async fn pets_by_shelter(
    shelter_id: Uuid,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<Pet>, ApiError> {
    Ok(repo.get_pets_by_shelter(shelter_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockAppRepo;
    use crate::services::MockStorageService;
    use chrono::{Duration, Utc};
    use mockall::predicate::eq;

    /// Pets get increasing `created_at` values by `order`; the repo mock
    /// reverses them to mimic the newest-first store ordering.
    fn create_test_pet(order: i64, name: &str, breed: &str) -> Pet {
        Pet {
            id: Uuid::new_v4(),
            shelter_id: Uuid::new_v4(),
            name: name.to_string(),
            species: Species::Dog,
            breed: breed.to_string(),
            age: 3,
            weight: 40.0,
            gender: Gender::Male,
            description: "a very good pet".to_string(),
            short_description: "a very good pet".to_string(),
            images: vec!["https://bucket.s3.us-east-2.amazonaws.com/pets/x/0.png".to_string()],
            characteristics: vec!["friendly".to_string()],
            city: "Austin".to_string(),
            state: "TX".to_string(),
            adoption_status: AdoptionStatus::Available,
            adopted_by: None,
            created_at: Utc::now() + Duration::seconds(order),
            updated_at: Utc::now() + Duration::seconds(order),
        }
    }

    fn newest_first(mut pets: Vec<Pet>) -> Vec<Pet> {
        pets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        pets
    }

    fn mock_repo_with_pets(status: AdoptionStatus, pets: Vec<Pet>) -> repo::ImplAppRepo {
        let mut mock_repo = MockAppRepo::new();
        let pets = newest_first(pets);
        mock_repo
            .expect_get_pets_by_status()
            .with(eq(status))
            .returning(move |_| {
                let pets = pets.clone();
                Box::pin(async move { Ok(pets) })
            });

        Box::new(mock_repo)
    }

    fn query_from(pairs: &[(&str, &str)]) -> SearchQuery {
        let mut query = SearchQuery::default();
        for (key, value) in pairs {
            let value = Some(value.to_string());
            match *key {
                "species" => query.species = value,
                "gender" => query.gender = value,
                "minAge" => query.min_age = value,
                "maxAge" => query.max_age = value,
                "city" => query.city = value,
                "state" => query.state = value,
                "size" => query.size = value,
                "query" => query.query = value,
                "status" => query.status = value,
                "sortBy" => query.sort_by = value,
                "sortOrder" => query.sort_order = value,
                "limit" => query.limit = value,
                "offset" => query.offset = value,
                other => panic!("unknown search param {other}"),
            }
        }

        query
    }

    #[ntex::test]
    async fn test_search_empty_filters_returns_all_available() {
        let pets = vec![
            create_test_pet(1, "Abby", "Labrador"),
            create_test_pet(2, "Rex", "Beagle"),
            create_test_pet(3, "Milo", "Poodle"),
        ];
        let repo = mock_repo_with_pets(AdoptionStatus::Available, pets);

        let result = search_pets(&SearchQuery::default(), &repo).await.unwrap();

        assert_eq!(result.total, 3);
        assert_eq!(result.items.len(), 3);
        assert!(!result.has_more);
        assert_eq!(result.limit, consts::DEFAULT_SEARCH_LIMIT);
        // default sort: newest first
        assert_eq!(result.items[0].name, "Milo");
        assert_eq!(result.items[2].name, "Abby");
    }

    #[ntex::test]
    async fn test_search_explicit_status_is_honored() {
        let mut adopted = create_test_pet(1, "Abby", "Labrador");
        adopted.adoption_status = AdoptionStatus::Adopted;
        let repo = mock_repo_with_pets(AdoptionStatus::Adopted, vec![adopted]);

        let result = search_pets(&query_from(&[("status", "adopted")]), &repo)
            .await
            .unwrap();

        assert_eq!(result.total, 1);
        assert!(
            result
                .items
                .iter()
                .all(|pet| pet.adoption_status == AdoptionStatus::Adopted)
        );
    }

    #[ntex::test]
    async fn test_search_rejects_unknown_enum_values() {
        let repo: repo::ImplAppRepo = Box::new(MockAppRepo::new());

        let result = search_pets(
            &query_from(&[("species", "hamster"), ("gender", "unknown")]),
            &repo,
        )
        .await;

        assert!(result.is_err_and(|err| match err {
            ApiError::Validation(errors) => {
                errors.contains(&"Species must be dog, cat, or other".to_string())
                    && errors.contains(&"Gender must be male or female".to_string())
            }
            _ => false,
        }));
    }

    #[ntex::test]
    async fn test_search_structural_filters_are_an_and_conjunction() {
        let mut in_city = create_test_pet(1, "Abby", "Labrador");
        in_city.city = "Austin".to_string();
        let mut wrong_city = create_test_pet(2, "Rex", "Labrador");
        wrong_city.city = "Dallas".to_string();
        let mut wrong_species = create_test_pet(3, "Luna", "Siamese");
        wrong_species.species = Species::Cat;
        wrong_species.city = "Austin".to_string();

        let repo = mock_repo_with_pets(
            AdoptionStatus::Available,
            vec![in_city, wrong_city, wrong_species],
        );

        let result = search_pets(
            &query_from(&[("species", "dog"), ("city", "Austin")]),
            &repo,
        )
        .await
        .unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].name, "Abby");
    }

    #[ntex::test]
    async fn test_search_city_and_state_ignore_case() {
        let mut austin = create_test_pet(1, "Abby", "Labrador");
        austin.city = "Austin".to_string();
        austin.state = "TX".to_string();
        let mut dallas = create_test_pet(2, "Rex", "Beagle");
        dallas.city = "Dallas".to_string();
        dallas.state = "TX".to_string();

        let repo = mock_repo_with_pets(AdoptionStatus::Available, vec![austin, dallas]);

        let result = search_pets(&query_from(&[("city", "AUSTIN"), ("state", "tx")]), &repo)
            .await
            .unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].name, "Abby");
    }

    #[ntex::test]
    async fn test_search_age_range_filter() {
        let mut puppy = create_test_pet(1, "Abby", "Labrador");
        puppy.age = 1;
        let mut adult = create_test_pet(2, "Rex", "Beagle");
        adult.age = 5;
        let mut senior = create_test_pet(3, "Gus", "Poodle");
        senior.age = 12;

        let repo = mock_repo_with_pets(AdoptionStatus::Available, vec![puppy, adult, senior]);

        let result = search_pets(&query_from(&[("minAge", "2"), ("maxAge", "10")]), &repo)
            .await
            .unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].name, "Rex");
    }

    #[ntex::test]
    async fn test_search_size_bucket_edges() {
        let weights = [20.0, 21.0, 60.0, 61.0, 100.0, 101.0];
        let pets: Vec<Pet> = weights
            .iter()
            .enumerate()
            .map(|(idx, weight)| {
                let mut pet = create_test_pet(idx as i64, &format!("pet-{weight}"), "Mixed");
                pet.weight = *weight;
                pet
            })
            .collect();

        for (size, expected) in [
            ("small", vec![20.0]),
            ("medium", vec![21.0, 60.0]),
            ("large", vec![61.0, 100.0]),
            ("extra-large", vec![101.0]),
        ] {
            let repo = mock_repo_with_pets(AdoptionStatus::Available, pets.clone());
            let result = search_pets(&query_from(&[("size", size)]), &repo)
                .await
                .unwrap();

            let mut found: Vec<f64> = result.items.iter().map(|pet| pet.weight).collect();
            found.sort_by(|a, b| a.partial_cmp(b).unwrap());
            assert_eq!(found, expected, "size bucket {size}");
        }
    }

    #[ntex::test]
    async fn test_search_text_query_matches_name_or_breed_case_insensitive() {
        let by_name = create_test_pet(1, "Abby", "Beagle");
        let by_breed = create_test_pet(2, "Rex", "Labrador");
        let neither = create_test_pet(3, "Milo", "Poodle");

        let repo =
            mock_repo_with_pets(AdoptionStatus::Available, vec![by_name, by_breed, neither]);

        let result = search_pets(&query_from(&[("query", "AB")]), &repo)
            .await
            .unwrap();

        let names: Vec<&str> = result.items.iter().map(|pet| pet.name.as_str()).collect();
        assert_eq!(result.total, 2);
        assert!(names.contains(&"Abby"));
        assert!(names.contains(&"Rex"));
    }

    #[ntex::test]
    async fn test_search_sorts_by_name_ignoring_case() {
        let pets = vec![
            create_test_pet(1, "zeus", "Mixed"),
            create_test_pet(2, "Abby", "Mixed"),
            create_test_pet(3, "milo", "Mixed"),
        ];
        let repo = mock_repo_with_pets(AdoptionStatus::Available, pets);

        let result = search_pets(
            &query_from(&[("sortBy", "name"), ("sortOrder", "asc")]),
            &repo,
        )
        .await
        .unwrap();

        let names: Vec<&str> = result.items.iter().map(|pet| pet.name.as_str()).collect();
        assert_eq!(names, vec!["Abby", "milo", "zeus"]);
    }

    #[ntex::test]
    async fn test_search_sorts_by_age_desc() {
        let mut young = create_test_pet(1, "Abby", "Mixed");
        young.age = 2;
        let mut old = create_test_pet(2, "Rex", "Mixed");
        old.age = 9;

        let repo = mock_repo_with_pets(AdoptionStatus::Available, vec![young, old]);

        let result = search_pets(
            &query_from(&[("sortBy", "age"), ("sortOrder", "desc")]),
            &repo,
        )
        .await
        .unwrap();

        let ages: Vec<u8> = result.items.iter().map(|pet| pet.age).collect();
        assert_eq!(ages, vec![9, 2]);
    }

    #[ntex::test]
    async fn test_search_pagination_total_and_has_more() {
        let pets: Vec<Pet> = (0..5)
            .map(|idx| create_test_pet(idx, &format!("pet-{idx}"), "Mixed"))
            .collect();

        for (offset, expected_len, expected_has_more) in
            [("0", 2, true), ("2", 2, true), ("4", 1, false), ("9", 0, false)]
        {
            let repo = mock_repo_with_pets(AdoptionStatus::Available, pets.clone());
            let result = search_pets(&query_from(&[("limit", "2"), ("offset", offset)]), &repo)
                .await
                .unwrap();

            assert_eq!(result.total, 5, "offset {offset}");
            assert_eq!(result.items.len(), expected_len, "offset {offset}");
            assert_eq!(result.has_more, expected_has_more, "offset {offset}");
        }
    }

    #[ntex::test]
    async fn test_search_limit_is_lenient_and_capped() {
        let pets: Vec<Pet> = (0..3)
            .map(|idx| create_test_pet(idx, &format!("pet-{idx}"), "Mixed"))
            .collect();

        let repo = mock_repo_with_pets(AdoptionStatus::Available, pets.clone());
        let result = search_pets(&query_from(&[("limit", "not-a-number")]), &repo)
            .await
            .unwrap();
        assert_eq!(result.limit, consts::DEFAULT_SEARCH_LIMIT);

        let repo = mock_repo_with_pets(AdoptionStatus::Available, pets);
        let result = search_pets(&query_from(&[("limit", "5000")]), &repo)
            .await
            .unwrap();
        assert_eq!(result.limit, consts::MAX_SEARCH_LIMIT);
    }

    #[ntex::test]
    async fn test_quick_search_requires_a_query() {
        let repo: repo::ImplAppRepo = Box::new(MockAppRepo::new());

        let result = quick_search(Some("   ".to_string()), &repo).await;

        assert!(result.is_err_and(
            |err| matches!(err, ApiError::Conflict(message) if message == "Search query is required")
        ));
    }

    #[ntex::test]
    async fn test_quick_search_matches_name_or_breed() {
        let pets = vec![
            create_test_pet(1, "Abby", "Beagle"),
            create_test_pet(2, "Rex", "Labrador"),
            create_test_pet(3, "Milo", "Poodle"),
        ];
        let repo = mock_repo_with_pets(AdoptionStatus::Available, pets);

        let result = quick_search(Some("ab".to_string()), &repo).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[ntex::test]
    async fn test_featured_pets_takes_newest_available() {
        let pets: Vec<Pet> = (0..8)
            .map(|idx| create_test_pet(idx, &format!("pet-{idx}"), "Mixed"))
            .collect();
        let repo = mock_repo_with_pets(AdoptionStatus::Available, pets);

        let result = featured_pets(None, &repo).await.unwrap();

        assert_eq!(result.len(), consts::DEFAULT_FEATURED_LIMIT);
        assert_eq!(result[0].name, "pet-7");
    }

    #[ntex::test]
    async fn test_similar_pets_ranked_by_location() {
        let mut target = create_test_pet(0, "Abby", "Labrador");
        target.city = "Austin".to_string();
        target.state = "TX".to_string();

        let mut same_city = create_test_pet(1, "CityMatch", "Mixed");
        same_city.city = "Austin".to_string();
        same_city.state = "TX".to_string();
        let mut same_state = create_test_pet(2, "StateMatch", "Mixed");
        same_state.city = "Dallas".to_string();
        same_state.state = "TX".to_string();
        let mut elsewhere = create_test_pet(3, "Elsewhere", "Mixed");
        elsewhere.city = "Denver".to_string();
        elsewhere.state = "CO".to_string();
        let mut wrong_species = create_test_pet(4, "Luna", "Siamese");
        wrong_species.species = Species::Cat;
        wrong_species.city = "Austin".to_string();
        wrong_species.state = "TX".to_string();

        let mut mock_repo = MockAppRepo::new();
        let target_clone = target.clone();
        mock_repo
            .expect_get_pet_by_id()
            .with(eq(target.id))
            .returning(move |_| {
                let pet = target_clone.clone();
                Box::pin(async move { Ok(Some(pet)) })
            });
        let candidates = newest_first(vec![
            target.clone(),
            same_city,
            same_state,
            elsewhere,
            wrong_species,
        ]);
        mock_repo
            .expect_get_pets_by_status()
            .with(eq(AdoptionStatus::Available))
            .returning(move |_| {
                let pets = candidates.clone();
                Box::pin(async move { Ok(pets) })
            });
        let repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = similar_pets(target.id, &repo).await.unwrap();

        let names: Vec<&str> = result.iter().map(|pet| pet.name.as_str()).collect();
        assert_eq!(names, vec!["CityMatch", "StateMatch", "Elsewhere"]);
    }

    #[ntex::test]
    async fn test_similar_pets_unknown_pet_yields_empty_list() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet_by_id()
            .returning(|_| Box::pin(async move { Ok(None) }));
        let repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = similar_pets(Uuid::new_v4(), &repo).await.unwrap();

        assert!(result.is_empty());
    }

    #[ntex::test]
    async fn test_get_pet_not_found() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet_by_id()
            .returning(|_| Box::pin(async move { Ok(None) }));
        let repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = get_pet(Uuid::new_v4(), &repo).await;

        assert!(result.is_err_and(
            |err| matches!(err, ApiError::NotFound(message) if message == "Pet not found")
        ));
    }

    #[ntex::test]
    async fn test_delete_pet_survives_storage_failures() {
        let pet = create_test_pet(1, "Abby", "Labrador");

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_delete_pet()
            .with(eq(pet.id))
            .times(1)
            .returning(|_| Box::pin(async move { Ok(()) }));
        let repo: repo::ImplAppRepo = Box::new(mock_repo);

        let mut mock_storage = MockStorageService::new();
        mock_storage
            .expect_delete_image()
            .with(eq("pets/x/0.png"))
            .times(1)
            .returning(|_| Box::pin(async move { Err(anyhow::anyhow!("bucket unreachable")) }));
        let storage_service: services::ImplStorageService = Box::new(mock_storage);

        let result = delete_pet(&pet, &repo, &storage_service).await;

        assert!(result.is_ok());
    }

    #[ntex::test]
    async fn test_pets_by_shelter_passes_through() {
        let shelter_id = Uuid::new_v4();
        let pets = vec![create_test_pet(1, "Abby", "Labrador")];

        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pets_by_shelter()
            .with(eq(shelter_id))
            .times(1)
            .returning(move |_| {
                let pets = pets.clone();
                Box::pin(async move { Ok(pets) })
            });
        let repo: repo::ImplAppRepo = Box::new(mock_repo);

        let result = pets_by_shelter(shelter_id, &repo).await;

        assert!(result.is_ok_and(|pets| pets.len() == 1));
    }
}
