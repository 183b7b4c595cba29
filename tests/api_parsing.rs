use shared_time::api::parse_latest_value;
use shared_time::error::LookupError;
use shared_time::models::Meta;

#[test]
fn parse_life_expectancy_sample() {
    let sample = r#"
    [
      {"page":1,"pages":1,"per_page":"1","total":1,"sourceid":"2","lastupdated":"2025-07-01"},
      [
        {
          "indicator":{"id":"SP.DYN.LE00.FE.IN","value":"Life expectancy at birth, female (years)"},
          "country":{"id":"JP","value":"Japan"},
          "countryiso3code":"JPN",
          "date":"2023",
          "value":87.14,
          "unit":"",
          "obs_status":"",
          "decimal":1
        }
      ]
    ]
    "#;
    let v: serde_json::Value = serde_json::from_str(sample).unwrap();
    assert_eq!(parse_latest_value(&v).unwrap(), Some(87.14));
}

#[test]
fn newest_non_null_observation_wins() {
    let sample = r#"
    [
      {"page":1,"pages":1,"per_page":50,"total":3},
      [
        {"indicator":{"id":"I","value":"I"},"country":{"id":"DE","value":"Germany"},
         "countryiso3code":"DEU","date":"2023","value":null},
        {"indicator":{"id":"I","value":"I"},"country":{"id":"DE","value":"Germany"},
         "countryiso3code":"DEU","date":"2021","value":78.5},
        {"indicator":{"id":"I","value":"I"},"country":{"id":"DE","value":"Germany"},
         "countryiso3code":"DEU","date":"2022","value":78.9}
      ]
    ]
    "#;
    let v: serde_json::Value = serde_json::from_str(sample).unwrap();
    assert_eq!(parse_latest_value(&v).unwrap(), Some(78.9));
}

#[test]
fn observation_without_country_echo_still_parses() {
    let v: serde_json::Value = serde_json::from_str(
        r#"[{"page":1,"pages":1,"per_page":1,"total":1},[{"date":"2022","value":84.0}]]"#,
    )
    .unwrap();
    assert_eq!(parse_latest_value(&v).unwrap(), Some(84.0));
}

#[test]
fn empty_result_is_no_data() {
    let v: serde_json::Value =
        serde_json::from_str(r#"[{"page":0,"pages":0,"per_page":"50","total":0}, null]"#).unwrap();
    assert_eq!(parse_latest_value(&v).unwrap(), None);
}

#[test]
fn message_payload_is_api_error() {
    let v: serde_json::Value = serde_json::from_str(
        r#"[{"message":[{"id":"120","key":"Invalid value","value":"The provided parameter value is not valid"}]}]"#,
    )
    .unwrap();
    assert!(matches!(parse_latest_value(&v), Err(LookupError::Api(_))));
}

#[test]
fn non_array_is_decode_error() {
    let v = serde_json::json!({"page": 1});
    assert!(matches!(parse_latest_value(&v), Err(LookupError::Decode(_))));
}

#[test]
fn meta_per_page_accepts_string_or_number() {
    let m: Meta =
        serde_json::from_str(r#"{"page":1,"pages":2,"per_page":"1000","total":2000}"#).unwrap();
    assert_eq!(m.per_page, 1000);
    let m: Meta =
        serde_json::from_str(r#"{"page":1,"pages":2,"per_page":500,"total":2000}"#).unwrap();
    assert_eq!(m.per_page, 500);
}
