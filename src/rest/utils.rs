//! Multipart plumbing shared by the pet and profile forms.

use std::path::Path;

use futures::StreamExt;
use uuid::Uuid;

use crate::{config, errors::ApiError, rest::forms::ImageUpload, services};

/// Concats all the [bytes](ntex::util::Bytes) extracted from a multipart field
pub async fn get_bytes_value(field: ntex_multipart::Field) -> Vec<u8> {
    field
        .filter_map(|x| async move { if let Ok(b) = x { Some(b) } else { None } })
        .collect::<Vec<ntex::util::Bytes>>()
        .await
        .concat()
}

async fn get_bytes_as_str(
    x: Result<ntex::util::Bytes, ntex_multipart::MultipartError>,
) -> Option<String> {
    if let Ok(Ok(v)) = x.map(|b| std::str::from_utf8(&b).map(|value| value.to_string())) {
        return Some(v);
    }

    None
}

/// Concats all the utf8 string values extracted from a multipart field
pub async fn get_field_value(field: ntex_multipart::Field) -> String {
    field
        .filter_map(get_bytes_as_str)
        .collect::<Vec<String>>()
        .await
        .join("")
}

pub fn get_header_str_value(headers: &ntex::http::HeaderMap, key: &str) -> String {
    let default_header_value = ntex::http::header::HeaderValue::from_static("");

    headers
        .get(key)
        .unwrap_or(&default_header_value)
        .to_str()
        .unwrap_or_default()
        .to_string()
}

/// Form field name from a `content-disposition` header value. Exact
/// extraction, not substring matching: `name="images"` must not be
/// confused with `name="age"` or with a `filename=` section.
pub fn get_field_name(content_disposition: &str) -> String {
    content_disposition
        .split(';')
        .map(str::trim)
        .find(|section| section.starts_with("name="))
        .map(|section| section["name=".len()..].trim_matches('"').to_string())
        .unwrap_or_default()
}

/// Lowercased filename extension from a `content-disposition` header value
pub fn get_filename_extension(content_disposition: &str) -> Option<String> {
    let filename = content_disposition
        .split(';')
        .map(str::trim)
        .find(|section| section.starts_with("filename="))
        .map(|section| section["filename=".len()..].trim_matches('"'))?;

    Path::new(filename)
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.trim().to_lowercase())
}

/// Uploads each image under `<folder>/<uuid>.<ext>` in parallel and
/// returns the public URLs in input order. One failed upload fails the
/// whole batch.
pub async fn upload_images(
    storage_service: &services::ImplStorageService,
    folder: &str,
    images: Vec<ImageUpload>,
) -> Result<Vec<String>, ApiError> {
    let base_url = config::APP_CONFIG.storage_public_base_url();

    let uploads = images.into_iter().map(|image| {
        let key = format!("{folder}/{}.{}", Uuid::new_v4(), image.filename_extension);
        let url = format!("{base_url}/{key}");

        async move {
            storage_service.save_image(&key, image.body).await?;

            Ok::<_, anyhow::Error>(url)
        }
    });

    Ok(futures::future::try_join_all(uploads).await?)
}

/// Path-segment id validation; the message mirrors the parameter name,
/// e.g. "Valid petId is required"
pub fn parse_uuid_param(value: &str, param: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| ApiError::validation(&format!("Valid {param} is required")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_field_name_is_exact() {
        assert_eq!(
            get_field_name(r#"form-data; name="images"; filename="dog.png""#),
            "images"
        );
        assert_eq!(get_field_name(r#"form-data; name="age""#), "age");
        assert_eq!(get_field_name("form-data"), "");
    }

    #[test]
    fn test_get_filename_extension() {
        assert_eq!(
            get_filename_extension(r#"form-data; name="images"; filename="Buddy Photo.JPG""#),
            Some("jpg".to_string())
        );
        assert_eq!(
            get_filename_extension(r#"form-data; name="images"; filename="noextension""#),
            None
        );
        assert_eq!(get_filename_extension(r#"form-data; name="name""#), None);
    }

    #[test]
    fn test_parse_uuid_param() {
        assert!(parse_uuid_param("0193a1fc-9292-7bb3-9159-d25b0d473171", "petId").is_ok());

        let err = parse_uuid_param("not-a-uuid", "petId").unwrap_err();
        match err {
            ApiError::Validation(messages) => {
                assert_eq!(messages, vec!["Valid petId is required".to_string()])
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
