use jf_core::{
    decode, digest, filter_json, infer, sha256_json, Digest, DigestAlg, Filter, FilterError,
    ProjectionError,
};
use serde_json::json;

const SCC: &[u8] = include_bytes!("fixtures/scc.json");

const SCC_QUERY: &str = "{metadata{name},apiVersion,priority,volumes,seLinuxContext{type}}";

const SCC_FILTERED: &str = r#"{"apiVersion":"v1","metadata":{"name":"anyuid"},"priority":10,"seLinuxContext":{"type":"MustRunAs"},"volumes":["configMap","downwardAPI","emptyDir","persistentVolumeClaim","projected","secret"]}"#;

const SCC_SHA256: &str = "73136c02726e5f6b6339c82bfa6c447c15303533fde65413e89cc7832c337315";

#[test]
fn scc_filter_matches_golden_bytes() {
    let bytes = filter_json(SCC_QUERY, SCC).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), SCC_FILTERED);
}

#[test]
fn scc_digest_matches_golden_hex() {
    assert_eq!(sha256_json(SCC_QUERY, SCC).unwrap().to_hex(), SCC_SHA256);
    assert_eq!(digest(SCC_FILTERED.as_bytes()).to_hex(), SCC_SHA256);
}

#[test]
fn selection_order_does_not_change_output() {
    let reordered = "{volumes, seLinuxContext { type }, priority, apiVersion, metadata { name }}";
    let bytes = filter_json(reordered, SCC).unwrap();
    assert_eq!(bytes, SCC_FILTERED.as_bytes());
}

#[test]
fn multiline_query_document_matches() {
    let query = r#"
        # fields that identify the SCC
        query Identity {
          metadata {
            name
          }
          apiVersion
          priority
          volumes
          seLinuxContext { type }
        }
    "#;
    assert_eq!(sha256_json(query, SCC).unwrap().to_hex(), SCC_SHA256);
}

#[test]
fn filter_is_reusable_across_documents() {
    let filter = Filter::new("{metadata{name}}").unwrap();
    let first = filter.apply(SCC).unwrap();
    let second = filter
        .apply(br#"{"metadata": {"name": "restricted", "uid": "x"}}"#)
        .unwrap();
    assert_eq!(first, br#"{"metadata":{"name":"anyuid"}}"#.to_vec());
    assert_eq!(second, br#"{"metadata":{"name":"restricted"}}"#.to_vec());
}

#[test]
fn empty_list_field_is_not_selectable() {
    let schema = infer(&decode(SCC).unwrap());
    assert!(!schema.selectable_fields().contains(&"users"));
    assert!(!schema.selectable_fields().contains(&"allowedCapabilities"));
    assert!(schema.selectable_fields().contains(&"volumes"));

    let err = filter_json("{users}", SCC).unwrap_err();
    assert!(matches!(
        err,
        FilterError::Projection(ProjectionError::UnknownField { ref name, .. }) if name == "users"
    ));
}

#[test]
fn digest_serializes_to_golden_json() {
    let digest = sha256_json(SCC_QUERY, SCC).unwrap();
    assert_eq!(digest.alg, DigestAlg::Sha256);
    assert_eq!(
        serde_json::to_value(&digest).unwrap(),
        json!({"alg": "sha-256", "hex": SCC_SHA256})
    );
}

#[test]
fn digest_is_stable_across_calls() {
    let digests: Vec<Digest> = (0..4).map(|_| sha256_json(SCC_QUERY, SCC).unwrap()).collect();
    assert!(digests.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn numbers_and_text_match_golden_bytes() {
    let doc = "{\"big\": 18446744073709551615, \"odd\": 9007199254740993, \"huge\": 1e21, \
               \"tiny\": 1e-7, \"neg\": -0.0, \"ten\": 1e1, \"name\": \"Zo\u{eb} \u{65e5}\u{672c} \u{1F600}\"}";
    let out = filter_json("{big,odd,huge,tiny,neg,ten,name}", doc.as_bytes()).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"big\":18446744073709552000,\"huge\":1e+21,\"name\":\"Zo\u{eb} \u{65e5}\u{672c} \u{1F600}\",\
         \"neg\":0,\"odd\":9007199254740992,\"ten\":10,\"tiny\":1e-7}"
    );
}
