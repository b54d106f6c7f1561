//! Places API (v1) wire types.
//!
//! Only the fields requested through the field mask are modelled. Every
//! provider field is optional on the wire; absence is represented as `None`
//! (or an empty list) rather than a sentinel value.

use serde::{Deserialize, Serialize};

/// Body of `POST /places:searchText`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTextRequest<'a> {
    pub text_query: &'a str,
    pub page_size: u32,
    pub language_code: &'a str,
}

/// Response of `POST /places:searchText`.
///
/// The provider omits `places` entirely when nothing matched.
#[derive(Debug, Default, Deserialize)]
pub struct SearchTextResponse {
    #[serde(default)]
    pub places: Vec<Place>,
}

/// A search hit, restricted to `id`, `displayName` and `formattedAddress`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default)]
    pub id: String,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
}

/// `{ "text": "...", "languageCode": "en" }`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    #[serde(default)]
    pub text: String,
    pub language_code: Option<String>,
}

/// Response of `GET /places/{id}`.
///
/// `reviews` stays untyped so one malformed entry is skipped on its own
/// instead of failing the whole payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub google_maps_uri: Option<String>,
    pub formatted_address: Option<String>,
    pub reviews: Option<Vec<serde_json::Value>>,
}

/// A single review as returned inside [`PlaceDetails::reviews`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    pub author_attribution: Option<AuthorAttribution>,
    pub rating: Option<i32>,
    pub relative_publish_time_description: Option<String>,
    pub original_text: Option<LocalizedText>,
    pub text: Option<LocalizedText>,
    pub publish_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorAttribution {
    pub display_name: Option<String>,
    pub uri: Option<String>,
    pub photo_uri: Option<String>,
}
