use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

// Query-string numbers arrive as strings; empty strings mean "not provided".
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = (total as f64 / limit as f64).ceil() as i64;
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            limit: Some(10),
        }
    }
}

impl PaginationParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).max(1).min(100)
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_default() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset_from_page() {
        let params = PaginationParams {
            page: Some(2),
            limit: Some(10),
        };
        assert_eq!(params.offset(), 10);

        let params = PaginationParams {
            page: Some(3),
            limit: Some(25),
        };
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_limit_clamped() {
        let test_cases = vec![
            (Some(1), 1),
            (Some(50), 50),
            (Some(100), 100),
            (Some(150), 100),
            (Some(0), 1),
            (Some(-1), 1),
            (None, 10),
        ];

        for (input, expected) in test_cases {
            let params = PaginationParams {
                page: Some(1),
                limit: input,
            };
            assert_eq!(params.limit(), expected);
        }
    }

    #[test]
    fn test_page_clamped_to_one() {
        let params = PaginationParams {
            page: Some(-3),
            limit: Some(10),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_deserialize_from_query_strings() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"page":"2","limit":"25"}"#).unwrap();
        assert_eq!(params.page(), 2);
        assert_eq!(params.limit(), 25);
    }

    #[test]
    fn test_deserialize_empty_strings() {
        let params: PaginationParams = serde_json::from_str(r#"{"page":"","limit":""}"#).unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let params: PaginationParams = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_meta_total_pages() {
        let meta = PaginationMeta::new(1, 10, 15);
        assert_eq!(meta.total_pages, 2);

        let meta = PaginationMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);

        let meta = PaginationMeta::new(1, 10, 100);
        assert_eq!(meta.total_pages, 10);
    }

    #[test]
    fn test_meta_serialize() {
        let meta = PaginationMeta::new(3, 20, 100);
        let serialized = serde_json::to_string(&meta).unwrap();
        assert!(serialized.contains(r#""page":3"#));
        assert!(serialized.contains(r#""limit":20"#));
        assert!(serialized.contains(r#""total":100"#));
        assert!(serialized.contains(r#""total_pages":5"#));
    }
}
