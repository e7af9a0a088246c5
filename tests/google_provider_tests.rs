#![cfg(feature = "google")]

use base64::prelude::{Engine as _, BASE64_STANDARD};
use narrate::config::SpeechConfig;
use narrate::error::NarrateError;
use narrate::provider::google::GoogleCloudProvider;
use narrate::provider::{SpeechProvider, SpeechRequest};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer, token: &str) -> GoogleCloudProvider {
    GoogleCloudProvider::with_token(SpeechConfig::default(), token).with_base_url(server.uri())
}

#[tokio::test]
async fn synthesize_round_trips_base64_audio() {
    let server = MockServer::start().await;
    let audio = b"raw-pcm-bytes".to_vec();

    Mock::given(method("POST"))
        .and(path("/v1beta1/text:synthesize"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_string_contains("150%"))
        .and(body_string_contains("<![CDATA[hello]]>"))
        .and(body_string_contains("ja-JP-Wavenet-A"))
        .and(body_string_contains("LINEAR16"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audioContent": BASE64_STANDARD.encode(&audio),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SpeechRequest::new("hello").with_voice("Mizuki").with_speed(150);
    let bytes = provider(&server, "test-token")
        .synthesize(&request)
        .await
        .expect("synthesis should succeed");

    assert_eq!(bytes, audio);
}

#[tokio::test]
async fn unrecognized_voice_sends_the_english_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta1/text:synthesize"))
        .and(body_string_contains("en-US-Wavenet-C"))
        .and(body_string_contains("en-US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audioContent": BASE64_STANDARD.encode(b"x"),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SpeechRequest::new("hi").with_voice("Joey");
    provider(&server, "t").synthesize(&request).await.unwrap();
}

#[tokio::test]
async fn markup_in_the_message_is_not_sent_as_markup() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta1/text:synthesize"))
        .and(body_string_contains("<![CDATA[<b>hi</b>]]>"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audioContent": BASE64_STANDARD.encode(b"x"),
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SpeechRequest::new("<b>hi</b>").with_speed(150);
    provider(&server, "t").synthesize(&request).await.unwrap();
}

#[tokio::test]
async fn expired_token_surfaces_as_an_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta1/text:synthesize"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server, "stale")
        .synthesize(&SpeechRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, NarrateError::Authentication(_)));
}

#[tokio::test]
async fn server_errors_surface_with_their_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta1/text:synthesize"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server, "t")
        .synthesize(&SpeechRequest::new("hi"))
        .await
        .unwrap_err();

    match err {
        NarrateError::Api { status, .. } => assert_eq!(status, 500),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn invalid_base64_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta1/text:synthesize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audioContent": "!!not base64!!",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server, "t")
        .synthesize(&SpeechRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, NarrateError::Decode(_)));
}

#[tokio::test]
async fn malformed_json_is_a_serialization_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta1/text:synthesize"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_bytes(b"{not-json".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = provider(&server, "t")
        .synthesize(&SpeechRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, NarrateError::Serialization(_)));
}
