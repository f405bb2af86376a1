use crate::bigquery::schema::{relax, row_schema, Field, FieldKind, FieldMode};
use serde_json::json;

fn assert_no_required(fields: &[Field]) {
    for field in fields {
        assert_ne!(
            field.mode,
            FieldMode::Required,
            "field {} survived relax as REQUIRED",
            field.name
        );
        assert_no_required(&field.fields);
    }
}

#[test]
fn row_schema_pairs_fetch_time_with_listing_record() {
    let schema = row_schema();

    assert_eq!(schema.len(), 2);
    assert_eq!(schema[0].name, "fetch_time");
    assert_eq!(schema[0].kind, FieldKind::Timestamp);
    assert_eq!(schema[1].name, "listing");
    assert_eq!(schema[1].kind, FieldKind::Record);
    assert!(!schema[1].fields.is_empty());
}

#[test]
fn relax_widens_every_nested_field_to_nullable() {
    let relaxed = relax(row_schema());
    assert_no_required(&relaxed);
}

#[test]
fn relax_keeps_repeated_fields_repeated() {
    let relaxed = relax(row_schema());

    let listing = &relaxed[1];
    let media = listing
        .fields
        .iter()
        .find(|f| f.name == "media")
        .expect("listing should have a media field");
    assert_eq!(media.mode, FieldMode::Repeated);

    let details = listing
        .fields
        .iter()
        .find(|f| f.name == "propertyDetails")
        .expect("listing should have propertyDetails");
    let features = details
        .fields
        .iter()
        .find(|f| f.name == "features")
        .expect("propertyDetails should have features");
    assert_eq!(features.mode, FieldMode::Repeated);
}

#[test]
fn field_serializes_to_the_rest_wire_shape() {
    let field = Field::timestamp("fetch_time");
    assert_eq!(
        serde_json::to_value(&field).unwrap(),
        json!({ "name": "fetch_time", "type": "TIMESTAMP", "mode": "REQUIRED" })
    );

    let record = Field::record("advertiser", vec![Field::string("name")]);
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({
            "name": "advertiser",
            "type": "RECORD",
            "mode": "REQUIRED",
            "fields": [{ "name": "name", "type": "STRING", "mode": "REQUIRED" }]
        })
    );
}
