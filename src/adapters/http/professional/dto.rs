//! HTTP DTOs for professional profile, directory, service and portfolio endpoints.

use serde::Deserialize;

use crate::domain::professional::{DirectoryFilter, PortfolioInput, ServiceInput};

/// `GET /api/professionals?city=&specialty=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryQuery {
    pub city: Option<String>,
    pub specialty: Option<String>,
}

impl From<DirectoryQuery> for DirectoryFilter {
    fn from(q: DirectoryQuery) -> Self {
        DirectoryFilter {
            city: q.city,
            specialty: q.specialty,
        }
    }
}

/// Service body; `id` is present on update.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: ServiceInput,
}

/// Portfolio body; `id` is present on update.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(flatten)]
    pub fields: PortfolioInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdQuery {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_request_without_id_is_a_create() {
        let req: ServiceRequest =
            serde_json::from_str(r#"{"name":"Skin fade","price_min":25,"price_max":40}"#).unwrap();
        assert!(req.id.is_none());
        assert_eq!(req.fields.name, "Skin fade");
        assert_eq!(req.fields.price_max, Some(40.0));
    }

    #[test]
    fn portfolio_request_keeps_id() {
        let req: PortfolioRequest =
            serde_json::from_str(r#"{"id":"abc","image_url":"https://x/y.png"}"#).unwrap();
        assert_eq!(req.id.as_deref(), Some("abc"));
        assert_eq!(req.fields.image_url, "https://x/y.png");
    }
}
