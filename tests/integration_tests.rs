//! Integration tests for MasterQR
//!
//! Exercises the full payload pipeline: build → parse → unlock → classify.
//!
//! Properties covered:
//! - Round-trips with and without protection
//! - Wrong password fails closed (None, never garbage)
//! - Expiry boundary is strict (equality with the deadline is not expired)
//! - Classifier precedence (crypto wins while locked)
//! - Detection tolerance (non-deep-link input passes through unchanged)
//! - Same-endpoint deep-link detection (foreign URLs are plain content)

use masterqr::payload::{open, seal};
use masterqr::{
    build_payload_url, build_payload_url_at, classify, parse_payload, parse_payload_at,
    parse_vcard, parse_wifi, ContactCard, LinkConfig, Payload, ScanType, WifiNetwork,
};

fn app() -> LinkConfig {
    LinkConfig::new("https://app/")
}

/// Round-trip without protection: data survives unchanged, nothing is
/// flagged encrypted or expiring.
#[test]
fn test_roundtrip_plain() {
    let url = build_payload_url("some payload data", "", None).unwrap();
    let parsed = parse_payload(&url);

    assert_eq!(parsed.data, "some payload data");
    assert!(!parsed.is_encrypted);
    assert_eq!(parsed.expires_at, None);
    assert!(!parsed.is_expired);
}

/// Round-trip with encryption: parse detects the envelope, unlock with the
/// original password recovers the exact content.
#[test]
fn test_roundtrip_encrypted() {
    let url = build_payload_url("çok gizli mesaj 🔐", "pw123", None).unwrap();
    let parsed = parse_payload(&url);

    assert!(parsed.is_encrypted);
    assert_eq!(parsed.unlock("pw123").unwrap(), "çok gizli mesaj 🔐");
}

/// Wrong password fails closed: None, never a garbage-but-truthy string.
#[test]
fn test_wrong_password_fails_closed() {
    let url = build_payload_url("secret", "correct", None).unwrap();
    let parsed = parse_payload(&url);

    assert_eq!(parsed.unlock("wrong"), None);
    assert_eq!(parsed.unlock(""), None);

    // Retry with the right password still works - failure is recoverable
    assert_eq!(parsed.unlock("correct").unwrap(), "secret");
}

/// Expiry boundary: exact equality with the deadline is NOT expired,
/// one millisecond past it is.
#[test]
fn test_expiry_boundary() {
    let url = build_payload_url_at("data", "", Some(60_000), &app(), 1_000).unwrap();
    assert!(url.contains("exp=61000"));

    assert!(!parse_payload_at(&url, &app(), 61_000).is_expired);
    assert!(parse_payload_at(&url, &app(), 61_001).is_expired);
}

/// Expired links still expose their deadline; only the expired flag flips.
#[test]
fn test_expiry_reevaluated_per_parse() {
    let url = build_payload_url_at("data", "", Some(100), &app(), 0).unwrap();

    let before = parse_payload_at(&url, &app(), 50);
    let after = parse_payload_at(&url, &app(), 200);

    assert_eq!(before.expires_at, Some(100));
    assert_eq!(after.expires_at, Some(100));
    assert!(!before.is_expired);
    assert!(after.is_expired);
}

/// Classifier precedence: wrapping happens on the whole composed string, so
/// an encrypted Wi-Fi payload classifies crypto until unlocked - then wifi.
#[test]
fn test_classifier_precedence_crypto_over_wifi() {
    let wire = "WIFI:T:WPA;S:HomeNet;P:pass123;;";
    let url = build_payload_url(wire, "pw", None).unwrap();
    let parsed = parse_payload(&url);

    assert_eq!(classify(&parsed.data), ScanType::Crypto);

    let unlocked = parsed.unlock("pw").unwrap();
    assert_eq!(classify(&unlocked), ScanType::Wifi);
}

/// Detection tolerance: freeform input that is not a deep link passes
/// through completely unchanged.
#[test]
fn test_non_deep_link_passes_through() {
    let parsed = parse_payload("plain text, no query params");
    assert_eq!(parsed.data, "plain text, no query params");
    assert!(!parsed.is_encrypted);
    assert_eq!(parsed.expires_at, None);
}

/// End-to-end scenario A: plain "hello world" produces the exact documented
/// link and parses back cleanly.
#[test]
fn test_scenario_plain_hello_world() {
    let url = build_payload_url_at("hello world", "", None, &app(), 0).unwrap();
    assert_eq!(url, "https://app/?d=hello%20world");

    let parsed = parse_payload_at(&url, &app(), 0);
    assert_eq!(parsed.data, "hello world");
    assert!(!parsed.is_encrypted);
    assert_eq!(parsed.expires_at, None);
    assert!(!parsed.is_expired);
}

/// End-to-end scenario B: encrypted payload built at now=1000 with a one
/// minute lifetime carries exp=61000 and reads expired at 61001.
#[test]
fn test_scenario_encrypted_with_expiry() {
    let url = build_payload_url_at("secret", "pw123", Some(60_000), &app(), 1_000).unwrap();
    assert!(url.contains("exp=61000"));

    let parsed = parse_payload_at(&url, &app(), 61_001);
    assert!(parsed.is_expired);
    assert!(parsed.is_encrypted);
}

/// End-to-end scenario C: standard Wi-Fi payload classifies and extracts.
#[test]
fn test_scenario_wifi_extraction() {
    let wire = "WIFI:T:WPA;S:HomeNet;P:pass123;;";
    assert_eq!(classify(wire), ScanType::Wifi);

    let network = parse_wifi(wire).unwrap();
    assert_eq!(network.ssid, "HomeNet");
    assert_eq!(network.password, "pass123");
    assert_eq!(network.auth, "WPA");
}

/// A foreign URL carrying ?d=... is NOT a payload link: same-endpoint
/// detection treats it as plain content and classifies it as a URL.
#[test]
fn test_foreign_url_with_d_is_plain() {
    let foreign = "https://evil.example/page?d=injected&exp=1";
    let parsed = parse_payload_at(foreign, &app(), 100);

    assert_eq!(parsed.data, foreign);
    assert_eq!(parsed.expires_at, None);
    assert!(!parsed.is_expired);
    assert_eq!(classify(&parsed.data), ScanType::Url);
}

/// The tagged union spares downstream code from prefix re-inspection.
#[test]
fn test_payload_union_after_parse() {
    let url = build_payload_url("content", "pw", None).unwrap();
    match parse_payload(&url).payload() {
        Payload::Encrypted(ciphertext) => {
            // Marker already stripped; ciphertext alone decrypts
            assert_eq!(
                open(&format!("MASTERQR:ENC:{}", ciphertext), "pw").unwrap(),
                "content"
            );
        }
        Payload::Plain(_) => panic!("expected encrypted payload"),
    }
}

/// Composed payloads round-trip through the whole pipeline: builder →
/// parser → unlock → classifier → format sub-parser.
#[test]
fn test_full_pipeline_vcard() {
    let card = ContactCard {
        full_name: "Ayse Yilmaz".to_string(),
        tel: "+90 555 000 1122".to_string(),
        email: "ayse@example.com".to_string(),
        org: "Acme".to_string(),
    };
    let url = build_payload_url(&card.to_payload(), "pw", Some(86_400_000)).unwrap();

    let parsed = parse_payload(&url);
    assert_eq!(classify(&parsed.data), ScanType::Crypto);
    assert!(parsed.expires_at.is_some());
    assert!(!parsed.is_expired);

    let unlocked = parsed.unlock("pw").unwrap();
    assert_eq!(classify(&unlocked), ScanType::Vcard);
    assert_eq!(parse_vcard(&unlocked).unwrap(), card);
}

/// Bare envelope without any deep link still detects and unlocks.
#[test]
fn test_bare_envelope_without_link() {
    let sealed = seal("standalone secret", "pw").unwrap();
    let parsed = parse_payload(&sealed);

    assert!(parsed.is_encrypted);
    assert_eq!(parsed.expires_at, None);
    assert_eq!(parsed.unlock("pw").unwrap(), "standalone secret");
}

/// Open-network Wi-Fi payloads omit the password field and still round-trip.
#[test]
fn test_open_wifi_roundtrip() {
    let wire = WifiNetwork::open("CafeGuest").to_payload();
    let url = build_payload_url(&wire, "", None).unwrap();

    let parsed = parse_payload(&url);
    assert_eq!(classify(&parsed.data), ScanType::Wifi);

    let network = parse_wifi(&parsed.data).unwrap();
    assert_eq!(network.ssid, "CafeGuest");
    assert_eq!(network.password, "");
    assert_eq!(network.auth, "nopass");
}

/// Payload content containing URL metacharacters survives the query
/// parameter encoding.
#[test]
fn test_url_metacharacters_roundtrip() {
    let tricky = "a&b=c?d=e#f%20g+h";
    let url = build_payload_url(tricky, "", None).unwrap();
    assert_eq!(parse_payload(&url).data, tricky);
}
