use serde::Serialize;

/// One column of a BigQuery table schema, nested records included.
/// Serializes to the REST API's `TableFieldSchema` shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub mode: FieldMode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    Timestamp,
    Record,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldMode {
    Nullable,
    Required,
    Repeated,
}

impl Field {
    fn new(name: &str, kind: FieldKind, mode: FieldMode) -> Field {
        Field {
            name: name.to_string(),
            kind,
            mode,
            fields: Vec::new(),
        }
    }

    // Scalar fields start out REQUIRED, matching what schema inference
    // would produce; relax() widens them before upload.
    pub fn string(name: &str) -> Field {
        Field::new(name, FieldKind::String, FieldMode::Required)
    }

    pub fn integer(name: &str) -> Field {
        Field::new(name, FieldKind::Integer, FieldMode::Required)
    }

    pub fn float(name: &str) -> Field {
        Field::new(name, FieldKind::Float, FieldMode::Required)
    }

    pub fn boolean(name: &str) -> Field {
        Field::new(name, FieldKind::Boolean, FieldMode::Required)
    }

    pub fn timestamp(name: &str) -> Field {
        Field::new(name, FieldKind::Timestamp, FieldMode::Required)
    }

    pub fn record(name: &str, fields: Vec<Field>) -> Field {
        Field {
            name: name.to_string(),
            kind: FieldKind::Record,
            mode: FieldMode::Required,
            fields,
        }
    }

    pub fn repeated(mut self) -> Field {
        self.mode = FieldMode::Repeated;
        self
    }
}

/// Widens every field to NULLABLE, recursively. REPEATED fields keep
/// their mode (an empty array already covers absence).
pub fn relax(fields: Vec<Field>) -> Vec<Field> {
    fields
        .into_iter()
        .map(|mut f| {
            if f.mode == FieldMode::Required {
                f.mode = FieldMode::Nullable;
            }
            f.fields = relax(f.fields);
            f
        })
        .collect()
}

/// Destination schema for one fetched listing row: the shared fetch
/// timestamp plus the listing payload as a nested record.
///
/// The record layout mirrors `domain_api::models` — a field added to the
/// model gets one line here and shows up in the table on the next run.
pub fn row_schema() -> Vec<Field> {
    vec![
        Field::timestamp("fetch_time"),
        Field::record("listing", listing_fields()),
    ]
}

fn listing_fields() -> Vec<Field> {
    vec![
        Field::integer("id"),
        Field::string("listingType"),
        Field::string("headline"),
        Field::string("summaryDescription"),
        Field::record("priceDetails", vec![Field::string("displayPrice")]),
        Field::record("propertyDetails", property_details_fields()),
        Field::record("advertiser", advertiser_fields()),
        Field::record("media", media_fields()).repeated(),
        Field::boolean("hasFloorplan"),
        Field::boolean("hasVideo"),
        Field::string("dateListed"),
        Field::string("listingSlug"),
    ]
}

fn property_details_fields() -> Vec<Field> {
    vec![
        Field::string("state"),
        Field::string("features").repeated(),
        Field::string("propertyType"),
        Field::float("bedrooms"),
        Field::float("bathrooms"),
        Field::integer("carspaces"),
        Field::string("unitNumber"),
        Field::string("streetNumber"),
        Field::string("street"),
        Field::string("area"),
        Field::string("region"),
        Field::string("suburb"),
        Field::string("postcode"),
        Field::string("displayableAddress"),
        Field::float("latitude"),
        Field::float("longitude"),
    ]
}

fn advertiser_fields() -> Vec<Field> {
    vec![
        Field::string("type"),
        Field::integer("id"),
        Field::string("name"),
    ]
}

fn media_fields() -> Vec<Field> {
    vec![Field::string("category"), Field::string("url")]
}
