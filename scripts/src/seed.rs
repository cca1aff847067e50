//! Demo data for a fresh database: one verified shelter account plus a
//! small adoptable catalog, shaped exactly like rows the api writes.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;
use uuid::Uuid;

const DEMO_SHELTER_EMAIL: &str = "shelter@pawadopt.com";
const DEMO_SHELTER_PASSWORD: &str = "shelter123";

const QUERY_ANY_PET_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM pet);";

const QUERY_FIRST_SHELTER_ID: &str = r#"
SELECT id FROM app_user WHERE role='shelter' ORDER BY created_at LIMIT 1;
"#;

const QUERY_INSERT_SHELTER: &str = r#"
INSERT INTO app_user (
    id,role,email,password_hash,first_name,last_name,phone,date_of_birth,
    address,city,state,zip,profile_image,
    living_type,has_yard,household_members,
    shelter_name,shelter_description,website,verified,
    created_at,updated_at
) VALUES(
    $1,'shelter',$2,$3,'Shelter','Admin','555-0100','',
    '123 Pet Street','San Francisco','California','94102',$4,
    NULL,NULL,NULL,
    $5,$6,$7,1,
    $8,$8
);
"#;

const QUERY_INSERT_PET: &str = r#"
INSERT INTO pet (
    id,shelter_id,name,species,breed,age,weight,gender,
    description,short_description,images,characteristics,
    city,state,adoption_status,adopted_by,
    created_at,updated_at
) VALUES(
    $1,$2,$3,$4,$5,$6,$7,$8,
    $9,$10,$11,$12,
    $13,$14,'available',NULL,
    $15,$15
);
"#;

struct SeedPet {
    name: &'static str,
    species: &'static str,
    breed: &'static str,
    age: u8,
    weight: f64,
    gender: &'static str,
    description: &'static str,
    short_description: &'static str,
    characteristics: &'static [&'static str],
    city: &'static str,
    state: &'static str,
    image: &'static str,
}

const SEED_PETS: [SeedPet; 8] = [
    SeedPet {
        name: "Max",
        species: "dog",
        breed: "Golden Retriever",
        age: 3,
        weight: 65.0,
        gender: "male",
        description: "Max is a friendly and energetic Golden Retriever who loves to play fetch and go on long walks. He is great with children and other dogs, house-trained and knows basic commands. He would thrive in an active family environment.",
        short_description: "Friendly and energetic Golden Retriever who loves to play and is great with children.",
        characteristics: &["Friendly", "Energetic", "Good with kids", "House-trained"],
        city: "San Francisco",
        state: "California",
        image: "https://images.unsplash.com/photo-1633722715463-d30f4f325e24?w=800",
    },
    SeedPet {
        name: "Bella",
        species: "dog",
        breed: "Labrador Retriever",
        age: 2,
        weight: 55.0,
        gender: "female",
        description: "Bella is a sweet and gentle Labrador who loves cuddles and treats. She is well-behaved, calm and perfect for families. Bella enjoys swimming and playing in the yard, is spayed and up to date on all vaccinations.",
        short_description: "Sweet and gentle Labrador who loves cuddles and is perfect for families.",
        characteristics: &["Gentle", "Calm", "Good with kids", "Loves water"],
        city: "Los Angeles",
        state: "California",
        image: "https://images.unsplash.com/photo-1628407992839-5e89e5257e8d?w=800",
    },
    SeedPet {
        name: "Rocky",
        species: "dog",
        breed: "German Shepherd",
        age: 4,
        weight: 75.0,
        gender: "male",
        description: "Rocky is a loyal and protective German Shepherd looking for an experienced owner. He is well-trained and responds to commands. Rocky needs daily exercise and mental stimulation and would do best as the only pet in the household.",
        short_description: "Loyal and protective German Shepherd looking for an experienced owner.",
        characteristics: &["Loyal", "Protective", "Well-trained", "Active"],
        city: "Austin",
        state: "Texas",
        image: "https://images.unsplash.com/photo-1568572933382-74d440642117?w=800",
    },
    SeedPet {
        name: "Luna",
        species: "dog",
        breed: "Husky",
        age: 1,
        weight: 45.0,
        gender: "female",
        description: "Luna is a playful and energetic Husky puppy with beautiful blue eyes. She loves to run and needs an active family. Luna is still learning commands and would benefit from training classes. She gets along well with other dogs.",
        short_description: "Playful Husky puppy with beautiful blue eyes, needs an active family.",
        characteristics: &["Playful", "Energetic", "Loves to run", "Good with dogs"],
        city: "Seattle",
        state: "Washington",
        image: "https://images.unsplash.com/photo-1605568427561-40dd23c2acea?w=800",
    },
    SeedPet {
        name: "Whiskers",
        species: "cat",
        breed: "Tabby",
        age: 2,
        weight: 10.0,
        gender: "male",
        description: "Whiskers is a playful tabby cat who loves to chase toys and climb cat trees. He is friendly and curious, always exploring his surroundings. Whiskers is litter-trained and gets along well with other cats.",
        short_description: "Playful tabby cat who loves toys and climbing.",
        characteristics: &["Playful", "Curious", "Litter-trained", "Good with cats"],
        city: "Portland",
        state: "Oregon",
        image: "https://images.unsplash.com/photo-1574158622682-e40e69881006?w=800",
    },
    SeedPet {
        name: "Mittens",
        species: "cat",
        breed: "Siamese",
        age: 4,
        weight: 8.0,
        gender: "female",
        description: "Mittens is a beautiful Siamese cat with striking blue eyes. She is vocal and loves to talk to her humans. Mittens enjoys sitting in sunny spots and being petted. She prefers to be the only cat and would thrive in a quiet home.",
        short_description: "Beautiful vocal Siamese with striking blue eyes.",
        characteristics: &["Vocal", "Affectionate", "Indoor cat", "Loves attention"],
        city: "Chicago",
        state: "Illinois",
        image: "https://images.unsplash.com/photo-1513360371669-4adf3dd7dff8?w=800",
    },
    SeedPet {
        name: "Oliver",
        species: "cat",
        breed: "Orange Tabby",
        age: 1,
        weight: 9.0,
        gender: "male",
        description: "Oliver is a young, playful orange tabby with tons of energy. He loves to play with anything that moves and will keep you entertained for hours. Oliver is friendly with other pets and children, litter-trained and ready for a loving home.",
        short_description: "Young playful orange tabby with tons of energy.",
        characteristics: &["Playful", "Energetic", "Good with kids", "Good with pets"],
        city: "Phoenix",
        state: "Arizona",
        image: "https://images.unsplash.com/photo-1615789591457-74a63395c990?w=800",
    },
    SeedPet {
        name: "Thumper",
        species: "other",
        breed: "Holland Lop",
        age: 2,
        weight: 4.0,
        gender: "male",
        description: "Thumper is an adorable Holland Lop rabbit with soft floppy ears. He is litter-trained and loves fresh vegetables. Thumper is gentle and would be perfect for a family with children. He needs a spacious enclosure and time to hop around.",
        short_description: "Adorable litter-trained rabbit with floppy ears.",
        characteristics: &["Gentle", "Litter-trained", "Good with kids", "Needs space"],
        city: "Atlanta",
        state: "Georgia",
        image: "https://images.unsplash.com/photo-1585110396000-c9ffd4e4b308?w=800",
    },
];

pub async fn run(db_pool: &SqlitePool) -> anyhow::Result<()> {
    let pets_exist: bool = sqlx::query_scalar(QUERY_ANY_PET_EXISTS)
        .fetch_one(db_pool)
        .await?;
    if pets_exist {
        println!("pets already present, nothing to seed");
        return Ok(());
    }

    // Reuse the first shelter account if one was registered already
    let shelter_id = match sqlx::query_scalar::<_, String>(QUERY_FIRST_SHELTER_ID)
        .fetch_optional(db_pool)
        .await?
    {
        Some(id) => id,
        None => insert_demo_shelter(db_pool).await?,
    };

    for pet in &SEED_PETS {
        insert_seed_pet(db_pool, &shelter_id, pet).await?;
        println!(
            "added {} ({}) - {}, {}",
            pet.name, pet.species, pet.city, pet.state
        );
    }
    println!("seeded {} pets for shelter {shelter_id}", SEED_PETS.len());

    Ok(())
}

async fn insert_demo_shelter(db_pool: &SqlitePool) -> anyhow::Result<String> {
    let shelter_id = Uuid::new_v4().to_string();

    sqlx::query(QUERY_INSERT_SHELTER)
        .bind(&shelter_id)
        .bind(DEMO_SHELTER_EMAIL)
        .bind(hash_password(DEMO_SHELTER_PASSWORD)?)
        .bind("https://images.unsplash.com/photo-1450778869180-41d0601e046e?w=400")
        .bind("Paw Adopt Animal Shelter")
        .bind("Paw Adopt Animal Shelter is dedicated to finding loving homes for all animals. We provide care, shelter and hope to pets in need.")
        .bind("https://pawadopt.com")
        .bind(chrono::Utc::now())
        .execute(db_pool)
        .await?;

    println!("created demo shelter {DEMO_SHELTER_EMAIL}");

    Ok(shelter_id)
}

async fn insert_seed_pet(
    db_pool: &SqlitePool,
    shelter_id: &str,
    pet: &SeedPet,
) -> anyhow::Result<()> {
    sqlx::query(QUERY_INSERT_PET)
        .bind(Uuid::new_v4().to_string())
        .bind(shelter_id)
        .bind(pet.name)
        .bind(pet.species)
        .bind(pet.breed)
        .bind(pet.age)
        .bind(pet.weight)
        .bind(pet.gender)
        .bind(pet.description)
        .bind(pet.short_description)
        .bind(serde_json::to_string(&[pet.image])?)
        .bind(serde_json::to_string(pet.characteristics)?)
        .bind(pet.city)
        .bind(pet.state)
        .bind(chrono::Utc::now())
        .execute(db_pool)
        .await?;

    Ok(())
}

fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow::anyhow!("failed to hash password: {err}"))
}
