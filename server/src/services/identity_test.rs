use super::*;

#[test]
fn provider_parses_known_id() {
    assert_eq!("google".parse::<Provider>().unwrap(), Provider::Google);
    assert_eq!(Provider::Google.to_string(), "google");
}

#[test]
fn provider_rejects_unknown_id() {
    let err = "github".parse::<Provider>().unwrap_err();
    assert!(matches!(err, IdentityError::UnknownProvider(ref id) if id == "github"));
}

#[test]
fn provider_parse_is_case_sensitive() {
    assert!("Google".parse::<Provider>().is_err());
}

#[test]
fn google_authorize_url_carries_encoded_params() {
    let url = google_authorize_url("client-1", "state-abc", "http://localhost:3000/api/auth/callback/google");
    let parsed = Url::parse(&url).unwrap();
    assert_eq!(parsed.host_str(), Some("accounts.google.com"));

    let pairs: std::collections::HashMap<String, String> = parsed.query_pairs().into_owned().collect();
    assert_eq!(pairs["client_id"], "client-1");
    assert_eq!(pairs["state"], "state-abc");
    assert_eq!(pairs["response_type"], "code");
    assert_eq!(pairs["scope"], "openid email profile");
    assert_eq!(pairs["redirect_uri"], "http://localhost:3000/api/auth/callback/google");
    assert!(!url.contains("redirect_uri=http://"), "redirect uri must be percent-encoded");
}

#[test]
fn google_provider_reports_its_kind() {
    let google = GoogleProvider::new("id".into(), "secret".into());
    assert_eq!(google.provider(), Provider::Google);
    assert!(google.authorize_url("s", "http://localhost/cb").starts_with(GOOGLE_AUTHORIZE_URL));
}

#[test]
fn userinfo_maps_to_profile() {
    let info: GoogleUserInfo = serde_json::from_str(
        r#"{"sub":"1234","email":"ada@example.com","email_verified":true,"name":"Ada","picture":"https://img/ada.png"}"#,
    )
    .unwrap();
    let profile = ProviderProfile::from(info);
    assert_eq!(profile.account_id, "1234");
    assert_eq!(profile.email.as_deref(), Some("ada@example.com"));
    assert_eq!(profile.name.as_deref(), Some("Ada"));
    assert_eq!(profile.image.as_deref(), Some("https://img/ada.png"));
}

#[test]
fn userinfo_tolerates_missing_optional_fields() {
    let info: GoogleUserInfo = serde_json::from_str(r#"{"sub":"only-sub"}"#).unwrap();
    let profile = ProviderProfile::from(info);
    assert_eq!(profile.account_id, "only-sub");
    assert!(profile.email.is_none());
    assert!(profile.name.is_none());
    assert!(profile.image.is_none());
}
