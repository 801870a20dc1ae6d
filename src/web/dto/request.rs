//! Request DTOs for the web API.

use serde::Deserialize;
use validator::Validate;

use crate::thumbnail::THUMBNAIL_SIZES;

/// User registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    /// Password.
    pub password: String,
}

/// File upload request.
///
/// `data` carries the content bytes base64-encoded; it is required for
/// non-folder kinds and ignored for folders.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Display name.
    pub name: String,
    /// Entity kind: "folder", "file" or "image".
    #[serde(rename = "type")]
    pub kind: String,
    /// Parent folder ID; defaults to the root.
    #[serde(default)]
    pub parent_id: i64,
    /// Initial visibility; defaults to private.
    #[serde(default)]
    pub is_public: bool,
    /// Base64-encoded content bytes.
    #[serde(default)]
    pub data: Option<String>,
}

/// Query parameters for child listings.
///
/// Both parameters arrive as raw strings so that non-numeric input coerces
/// to the documented defaults instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Parent folder ID; default root.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Zero-based page number; default 0.
    #[serde(default)]
    pub page: Option<String>,
}

impl ListQuery {
    /// Parent ID with invalid or missing input coerced to the root.
    pub fn parent_id(&self) -> i64 {
        parse_non_negative(self.parent_id.as_deref()).unwrap_or(0)
    }

    /// Page number with invalid, missing or negative input coerced to 0.
    pub fn page(&self) -> u32 {
        parse_non_negative(self.page.as_deref())
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0)
    }
}

fn parse_non_negative(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|v| *v >= 0)
}

/// Query parameters for content fetching.
#[derive(Debug, Default, Deserialize)]
pub struct DataQuery {
    /// Requested thumbnail width. Anything outside the fixed set serves the
    /// original.
    #[serde(default)]
    pub size: Option<String>,
}

impl DataQuery {
    /// The requested size, if it names a generated variant.
    pub fn thumbnail_size(&self) -> Option<u32> {
        self.size
            .as_deref()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|s| THUMBNAIL_SIZES.contains(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_query(parent_id: Option<&str>, page: Option<&str>) -> ListQuery {
        ListQuery {
            parent_id: parent_id.map(String::from),
            page: page.map(String::from),
        }
    }

    #[test]
    fn test_list_query_defaults() {
        let q = list_query(None, None);
        assert_eq!(q.parent_id(), 0);
        assert_eq!(q.page(), 0);
    }

    #[test]
    fn test_list_query_numeric() {
        let q = list_query(Some("12"), Some("3"));
        assert_eq!(q.parent_id(), 12);
        assert_eq!(q.page(), 3);
    }

    #[test]
    fn test_list_query_non_numeric_coerces_to_zero() {
        let q = list_query(Some("abc"), Some("xyz"));
        assert_eq!(q.parent_id(), 0);
        assert_eq!(q.page(), 0);
    }

    #[test]
    fn test_list_query_negative_coerces_to_zero() {
        let q = list_query(Some("-5"), Some("-1"));
        assert_eq!(q.parent_id(), 0);
        assert_eq!(q.page(), 0);
    }

    #[test]
    fn test_data_query_known_sizes() {
        for size in ["500", "250", "100"] {
            let q = DataQuery {
                size: Some(size.to_string()),
            };
            assert_eq!(q.thumbnail_size(), Some(size.parse().unwrap()));
        }
    }

    #[test]
    fn test_data_query_unknown_sizes_serve_original() {
        for size in ["300", "0", "abc", "", "100.5", "-100"] {
            let q = DataQuery {
                size: Some(size.to_string()),
            };
            assert_eq!(q.thumbnail_size(), None, "size {size:?}");
        }
        assert_eq!(DataQuery::default().thumbnail_size(), None);
    }

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            email: "alice@example.com".to_string(),
            password: "secret_pass".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "secret_pass".to_string(),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_upload_request_deserializes_camel_case() {
        let req: UploadRequest = serde_json::from_str(
            r#"{"name":"pic.png","type":"image","parentId":4,"isPublic":true,"data":"aGk="}"#,
        )
        .unwrap();

        assert_eq!(req.name, "pic.png");
        assert_eq!(req.kind, "image");
        assert_eq!(req.parent_id, 4);
        assert!(req.is_public);
        assert_eq!(req.data.as_deref(), Some("aGk="));
    }

    #[test]
    fn test_upload_request_defaults() {
        let req: UploadRequest =
            serde_json::from_str(r#"{"name":"docs","type":"folder"}"#).unwrap();

        assert_eq!(req.parent_id, 0);
        assert!(!req.is_public);
        assert!(req.data.is_none());
    }
}
