use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use brewops_auth::{AccessToken, Password};
use brewops_core::{BatchId, IdentityId, Page};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: Password,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateBreweryRequest {
    pub name: String,
    pub location: Option<String>,
    pub establishment_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBeerTypeRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub style: Option<String>,
    pub alcohol_content: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateBatchRequest {
    pub beer_type_id: i64,
    pub production_date: NaiveDate,
    pub volume: f64,
}

#[derive(Debug, Deserialize)]
pub struct CreateSaleRequest {
    pub batch_id: i64,
    pub sale_date: NaiveDate,
    pub quantity: f64,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct RemainingVolumeQuery {
    pub batch_id: i64,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: AccessToken,
    pub token_type: &'static str,
}

impl From<AccessToken> for TokenResponse {
    fn from(access_token: AccessToken) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: IdentityId,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct RemainingVolumeResponse {
    pub batch_id: BatchId,
    pub remaining_volume: f64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Parse a raw path/body id into its typed form.
pub fn parse_id<T>(raw: i64) -> Result<T, axum::response::Response>
where
    T: TryFrom<i64, Error = brewops_core::DomainError>,
{
    T::try_from(raw).map_err(crate::app::errors::domain_error_to_response)
}
