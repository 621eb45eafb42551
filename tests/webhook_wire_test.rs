//! Wire-level tests for the WhatsApp webhook integration
//! Run with: cargo test --test webhook_wire_test

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute an X-Hub-Signature-256 header value the way Meta does.
fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

/// A text-command delivery as the Cloud API posts it.
const TEXT_FIXTURE: &str = r#"{
  "object": "whatsapp_business_account",
  "entry": [{
    "id": "102290129340398",
    "changes": [{
      "field": "messages",
      "value": {
        "messaging_product": "whatsapp",
        "metadata": {"display_phone_number": "15550000000", "phone_number_id": "106540352242922"},
        "contacts": [{"profile": {"name": "Test User"}, "wa_id": "6281234567890"}],
        "messages": [{
          "from": "6281234567890",
          "id": "wamid.HBgLNjI4MTIzNDU2Nzg5MBUCABIYFjNFQjBEMUQ3QzdGQjAyRjVGQUE1AA==",
          "timestamp": "1712345678",
          "type": "text",
          "text": {"body": "LIST /Reports"}
        }]
      }
    }]
  }]
}"#;

/// A document delivery with an UPLOAD caption.
const DOCUMENT_FIXTURE: &str = r#"{
  "object": "whatsapp_business_account",
  "entry": [{
    "id": "102290129340398",
    "changes": [{
      "field": "messages",
      "value": {
        "messaging_product": "whatsapp",
        "messages": [{
          "from": "6281234567890",
          "id": "wamid.document",
          "timestamp": "1712345680",
          "type": "document",
          "document": {
            "id": "media-4821",
            "filename": "report.pdf",
            "caption": "UPLOAD /Reports q3.pdf",
            "mime_type": "application/pdf"
          }
        }]
      }
    }]
  }]
}"#;

#[test]
fn webhook_payload_carries_text_commands() {
    let payload: serde_json::Value = serde_json::from_str(TEXT_FIXTURE).expect("valid JSON");

    let message = &payload["entry"][0]["changes"][0]["value"]["messages"][0];
    assert_eq!(message["type"], "text");
    assert_eq!(message["from"], "6281234567890");
    assert_eq!(message["text"]["body"], "LIST /Reports");
}

#[test]
fn document_messages_carry_filename_and_caption() {
    let payload: serde_json::Value = serde_json::from_str(DOCUMENT_FIXTURE).expect("valid JSON");

    let message = &payload["entry"][0]["changes"][0]["value"]["messages"][0];
    assert_eq!(message["type"], "document");
    assert_eq!(message["document"]["id"], "media-4821");
    assert_eq!(message["document"]["filename"], "report.pdf");
    assert_eq!(message["document"]["caption"], "UPLOAD /Reports q3.pdf");
}

#[test]
fn signature_header_has_the_expected_shape() {
    let signature = sign("app-secret", TEXT_FIXTURE.as_bytes());

    assert!(signature.starts_with("sha256="));
    // 32-byte MAC as lowercase hex
    assert_eq!(signature.len(), "sha256=".len() + 64);
    assert!(signature["sha256=".len()..].chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn signature_is_deterministic_and_keyed() {
    let body = TEXT_FIXTURE.as_bytes();

    assert_eq!(sign("app-secret", body), sign("app-secret", body));
    assert_ne!(sign("app-secret", body), sign("other-secret", body));
    assert_ne!(
        sign("app-secret", body),
        sign("app-secret", DOCUMENT_FIXTURE.as_bytes())
    );
}

#[test]
fn outbound_send_body_matches_the_cloud_api_contract() {
    let body = serde_json::json!({
        "messaging_product": "whatsapp",
        "to": "6281234567890",
        "text": {"body": "✅ Successfully renamed 'old.pdf' to 'new.pdf'"}
    });

    assert_eq!(body["messaging_product"], "whatsapp");
    assert!(body["text"]["body"].as_str().unwrap().starts_with('✅'));
}
