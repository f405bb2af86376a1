use serde::{Deserialize, Serialize};

// result
//  ├── type ("PropertyListing")
//  └── listing
//       ├── id
//       ├── listingType
//       ├── headline
//       ├── priceDetails
//       │    └── displayPrice
//       ├── propertyDetails
//       │    ├── state / suburb / postcode / street ...
//       │    ├── bedrooms / bathrooms / carspaces
//       │    └── latitude / longitude
//       ├── advertiser
//       └── media[]

/// Body of `POST /v1/listings/residential/_search`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentialSearchRequest {
    pub listing_type: String,
    pub locations: Vec<LocationFilter>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFilter {
    pub state: String,
    pub area: String,
    pub region: String,
    pub suburb: String,
    pub post_code: String,
    pub include_surrounding_suburbs: bool,
}

/// One entry of the search response array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub listing: PropertyListing,
}

// Everything below mirrors the API payload. Every field is optional —
// the API drops fields freely depending on the listing.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    pub id: Option<i64>,
    pub listing_type: Option<String>,
    pub headline: Option<String>,
    pub summary_description: Option<String>,
    pub price_details: Option<PriceDetails>,
    pub property_details: Option<PropertyDetails>,
    pub advertiser: Option<Advertiser>,
    pub media: Option<Vec<Media>>,
    pub has_floorplan: Option<bool>,
    pub has_video: Option<bool>,
    pub date_listed: Option<String>,
    pub listing_slug: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceDetails {
    pub display_price: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub state: Option<String>,
    pub features: Option<Vec<String>>,
    pub property_type: Option<String>,
    // bedrooms/bathrooms come back fractional ("1.5 baths")
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub carspaces: Option<i64>,
    pub unit_number: Option<String>,
    pub street_number: Option<String>,
    pub street: Option<String>,
    pub area: Option<String>,
    pub region: Option<String>,
    pub suburb: Option<String>,
    pub postcode: Option<String>,
    pub displayable_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertiser {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub category: Option<String>,
    pub url: Option<String>,
}
