use contacts_client::model::auth::{ApiStatus, CredentialPair, User};

#[test]
fn test_credential_pair_deserialize() {
    let pair: CredentialPair =
        serde_json::from_str(r#"{"access":"acc","refresh":"ref"}"#).unwrap();
    assert_eq!(pair, CredentialPair::new("acc", "ref"));
    assert!(pair.is_well_formed());
}

#[test]
fn test_credential_pair_requires_both_tokens() {
    assert!(serde_json::from_str::<CredentialPair>(r#"{"access":"acc"}"#).is_err());
    assert!(!CredentialPair::new("", "ref").is_well_formed());
    assert!(!CredentialPair::new("acc", "").is_well_formed());
}

#[test]
fn test_credential_pair_serializes_as_single_document() {
    let pair = CredentialPair::new("acc", "ref");
    let value = serde_json::to_value(&pair).unwrap();
    assert_json_diff::assert_json_eq!(value, serde_json::json!({"access": "acc", "refresh": "ref"}));
}

#[test]
fn test_user_display() {
    let user = User::new("ann");
    assert!(format!("{user}").contains("ann"));
}

#[test]
fn test_api_status() {
    assert!(ApiStatus::Online.is_online());
    assert!(!ApiStatus::Offline.is_online());
    assert_eq!(serde_json::to_string(&ApiStatus::Offline).unwrap(), r#""offline""#);
}
