pub const QUERY_INSERT_USER: &str = r#"
INSERT INTO app_user (
    id,role,email,password_hash,first_name,last_name,phone,date_of_birth,
    address,city,state,zip,profile_image,
    living_type,has_yard,household_members,
    shelter_name,shelter_description,website,verified,
    created_at,updated_at
) VALUES(
    $1,$2,$3,$4,$5,$6,$7,$8,
    $9,$10,$11,$12,$13,
    $14,$15,$16,
    $17,$18,$19,$20,
    $21,$22
);
"#;

pub const QUERY_GET_USER_BY_ID: &str = r#"
SELECT
    id,role,email,password_hash,first_name,last_name,phone,date_of_birth,
    address,city,state,zip,profile_image,
    living_type,has_yard,household_members,
    shelter_name,shelter_description,website,verified,
    created_at,updated_at
FROM app_user
WHERE id=$1;
"#;

pub const QUERY_GET_USER_BY_EMAIL: &str = r#"
SELECT
    id,role,email,password_hash,first_name,last_name,phone,date_of_birth,
    address,city,state,zip,profile_image,
    living_type,has_yard,household_members,
    shelter_name,shelter_description,website,verified,
    created_at,updated_at
FROM app_user
WHERE email=$1;
"#;

pub const QUERY_UPDATE_USER: &str = r#"
UPDATE app_user
    SET first_name = $2,
    last_name = $3,
    phone = $4,
    date_of_birth = $5,
    address = $6,
    city = $7,
    state = $8,
    zip = $9,
    profile_image = $10,
    living_type = $11,
    has_yard = $12,
    household_members = $13,
    shelter_name = $14,
    shelter_description = $15,
    website = $16,
    updated_at = $17
WHERE id = $1;
"#;

pub const QUERY_GET_SHELTERS: &str = r#"
SELECT
    id,role,email,password_hash,first_name,last_name,phone,date_of_birth,
    address,city,state,zip,profile_image,
    living_type,has_yard,household_members,
    shelter_name,shelter_description,website,verified,
    created_at,updated_at
FROM app_user
WHERE role='shelter'
ORDER BY created_at DESC;
"#;

pub const QUERY_INSERT_PET: &str = r#"
INSERT INTO pet (
    id,shelter_id,name,species,breed,age,weight,gender,
    description,short_description,images,characteristics,
    city,state,adoption_status,adopted_by,
    created_at,updated_at
) VALUES(
    $1,$2,$3,$4,$5,$6,$7,$8,
    $9,$10,$11,$12,
    $13,$14,$15,$16,
    $17,$18
);
"#;

pub const QUERY_GET_PET_BY_ID: &str = r#"
SELECT
    id,shelter_id,name,species,breed,age,weight,gender,
    description,short_description,images,characteristics,
    city,state,adoption_status,adopted_by,created_at,updated_at
FROM pet
WHERE id=$1;
"#;

pub const QUERY_UPDATE_PET: &str = r#"
UPDATE pet
    SET name = $2,
    breed = $3,
    age = $4,
    weight = $5,
    gender = $6,
    description = $7,
    short_description = $8,
    images = $9,
    characteristics = $10,
    city = $11,
    state = $12,
    adoption_status = $13,
    adopted_by = $14,
    updated_at = $15
WHERE id = $1;
"#;

pub const QUERY_DELETE_PET: &str = r#"DELETE FROM pet WHERE id=$1;"#;

pub const QUERY_GET_PETS_BY_STATUS: &str = r#"
SELECT
    id,shelter_id,name,species,breed,age,weight,gender,
    description,short_description,images,characteristics,
    city,state,adoption_status,adopted_by,created_at,updated_at
FROM pet
WHERE adoption_status=$1
ORDER BY created_at DESC;
"#;

pub const QUERY_GET_PETS_BY_SHELTER: &str = r#"
SELECT
    id,shelter_id,name,species,breed,age,weight,gender,
    description,short_description,images,characteristics,
    city,state,adoption_status,adopted_by,created_at,updated_at
FROM pet
WHERE shelter_id=$1
ORDER BY created_at DESC;
"#;

pub const QUERY_SET_PET_ADOPTION_STATUS: &str = r#"
UPDATE pet SET adoption_status=$2, adopted_by=$3, updated_at=$4 WHERE id=$1;
"#;

pub const QUERY_INSERT_APPLICATION: &str = r#"
INSERT INTO adoption_application (
    id,user_id,pet_id,shelter_id,status,
    personal_info,living_info,pet_experience,reference_list,
    home_visit_required,home_visit_completed,home_visit_date,
    approval_date,rejection_reason,
    created_at,updated_at
) VALUES(
    $1,$2,$3,$4,$5,
    $6,$7,$8,$9,
    $10,$11,$12,
    $13,$14,
    $15,$16
);
"#;

pub const QUERY_GET_APPLICATION_BY_ID: &str = r#"
SELECT
    id,user_id,pet_id,shelter_id,status,
    personal_info,living_info,pet_experience,reference_list,
    home_visit_required,home_visit_completed,home_visit_date,
    approval_date,rejection_reason,created_at,updated_at
FROM adoption_application
WHERE id=$1;
"#;

pub const QUERY_UPDATE_APPLICATION: &str = r#"
UPDATE adoption_application
    SET status = $2,
    personal_info = $3,
    living_info = $4,
    pet_experience = $5,
    reference_list = $6,
    home_visit_required = $7,
    home_visit_completed = $8,
    home_visit_date = $9,
    approval_date = $10,
    rejection_reason = $11,
    updated_at = $12
WHERE id = $1;
"#;

pub const QUERY_DELETE_APPLICATION: &str = r#"DELETE FROM adoption_application WHERE id=$1;"#;

pub const QUERY_GET_APPLICATIONS_BY_USER: &str = r#"
SELECT
    id,user_id,pet_id,shelter_id,status,
    personal_info,living_info,pet_experience,reference_list,
    home_visit_required,home_visit_completed,home_visit_date,
    approval_date,rejection_reason,created_at,updated_at
FROM adoption_application
WHERE user_id=$1
ORDER BY created_at DESC;
"#;

pub const QUERY_GET_APPLICATIONS_BY_PET: &str = r#"
SELECT
    id,user_id,pet_id,shelter_id,status,
    personal_info,living_info,pet_experience,reference_list,
    home_visit_required,home_visit_completed,home_visit_date,
    approval_date,rejection_reason,created_at,updated_at
FROM adoption_application
WHERE pet_id=$1
ORDER BY created_at DESC;
"#;

pub const QUERY_GET_APPLICATIONS_BY_SHELTER: &str = r#"
SELECT
    id,user_id,pet_id,shelter_id,status,
    personal_info,living_info,pet_experience,reference_list,
    home_visit_required,home_visit_completed,home_visit_date,
    approval_date,rejection_reason,created_at,updated_at
FROM adoption_application
WHERE shelter_id=$1
ORDER BY created_at DESC;
"#;

pub const QUERY_HAS_USER_APPLIED: &str = r#"
SELECT EXISTS(
    SELECT 1 FROM adoption_application WHERE user_id=$1 AND pet_id=$2
);
"#;

pub const QUERY_INSERT_FAVORITE: &str = r#"
INSERT INTO favorite (user_id,pet_id,created_at) VALUES($1,$2,$3)
ON CONFLICT(user_id,pet_id) DO NOTHING;
"#;

pub const QUERY_DELETE_FAVORITE: &str = r#"
DELETE FROM favorite WHERE user_id=$1 AND pet_id=$2;
"#;

pub const QUERY_GET_FAVORITES_BY_USER: &str = r#"
SELECT user_id,pet_id,created_at
FROM favorite
WHERE user_id=$1
ORDER BY created_at DESC;
"#;

pub const QUERY_IS_PET_FAVORITED: &str = r#"
SELECT EXISTS(
    SELECT 1 FROM favorite WHERE user_id=$1 AND pet_id=$2
);
"#;
