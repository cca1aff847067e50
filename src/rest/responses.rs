//! Success envelope builders shared by every handler.
//!
//! The wire format is `{success, message, data}` with an extra
//! `pagination` block on paged listings; error envelopes are produced by
//! [ApiError](crate::errors::ApiError) so both sides stay symmetric.

use ntex::web;
use serde::Serialize;

use crate::api::pet::SearchResult;

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    success: bool,
    message: &'a str,
    data: Option<&'a T>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    total: usize,
    limit: usize,
    offset: usize,
    has_more: bool,
}

#[derive(Serialize)]
struct PaginatedEnvelope<'a, T: Serialize> {
    success: bool,
    message: &'a str,
    data: &'a T,
    pagination: Pagination,
}

pub fn ok<T: Serialize>(data: &T, message: &str) -> web::HttpResponse {
    web::HttpResponse::Ok().json(&Envelope {
        success: true,
        message,
        data: Some(data),
    })
}

pub fn created<T: Serialize>(data: &T, message: &str) -> web::HttpResponse {
    web::HttpResponse::Created().json(&Envelope {
        success: true,
        message,
        data: Some(data),
    })
}

/// Success with `data: null`, used by deletes and logout
pub fn ok_empty(message: &str) -> web::HttpResponse {
    web::HttpResponse::Ok().json(&Envelope::<()> {
        success: true,
        message,
        data: None,
    })
}

pub fn paginated(result: &SearchResult, message: &str) -> web::HttpResponse {
    web::HttpResponse::Ok().json(&PaginatedEnvelope {
        success: true,
        message,
        data: &result.items,
        pagination: Pagination {
            total: result.total,
            limit: result.limit,
            offset: result.offset,
            has_more: result.has_more,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_envelope_keeps_the_data_key() {
        let body = serde_json::to_string(&Envelope::<()> {
            success: true,
            message: "Pet deleted successfully",
            data: None,
        })
        .unwrap();

        assert_eq!(
            body,
            r#"{"success":true,"message":"Pet deleted successfully","data":null}"#
        );
    }

    #[test]
    fn test_pagination_keys_are_camel_case() {
        let body = serde_json::to_string(&Pagination {
            total: 12,
            limit: 20,
            offset: 0,
            has_more: false,
        })
        .unwrap();

        assert_eq!(body, r#"{"total":12,"limit":20,"offset":0,"hasMore":false}"#);
    }
}
