pub const S3_MAIN_BUCKET_NAME: &str = "paw-adopt-app-storage";
pub const S3_PET_IMAGES_FOLDER: &str = "pets";
pub const S3_USER_AVATARS_FOLDER: &str = "users";

pub const IMAGE_MAX_SIZE_BYTES: usize = 5_000_000;
pub const PET_IMAGES_MAX_COUNT: usize = 10;
pub const ACCEPTED_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpeg", "jpg", "webp", "gif"];

pub const SHORT_DESCRIPTION_MAX_CHARS: usize = 150;

pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const MAX_SEARCH_LIMIT: usize = 100;
pub const QUICK_SEARCH_LIMIT: usize = 50;
pub const DEFAULT_FEATURED_LIMIT: usize = 6;
pub const DEFAULT_SIMILAR_LIMIT: usize = 3;

pub const MIN_PASSWORD_CHARS: usize = 6;
pub const MAX_PET_AGE_YEARS: u8 = 30;

pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 24 * 60 * 60;
pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;
