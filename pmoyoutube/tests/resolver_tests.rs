//! Integration tests for pmoyoutube against mocked YouTube endpoints

use pmoyoutube::{
    InnerTubeExtractor, MediaResolver, ResolveError, VideoSearch, YouTubeResolver,
    YouTubeSearchClient,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn search_client(server: &MockServer) -> YouTubeSearchClient {
    YouTubeSearchClient::builder("TEST_KEY")
        .api_base(format!("{}/youtube/v3", server.uri()))
        .build()
        .unwrap()
}

fn innertube(server: &MockServer) -> InnerTubeExtractor {
    InnerTubeExtractor::with_base_url(server.uri(), Duration::from_secs(5)).unwrap()
}

fn search_hit(video_id: &str) -> serde_json::Value {
    json!({
        "kind": "youtube#searchListResponse",
        "items": [{
            "id": { "kind": "youtube#video", "videoId": video_id },
            "snippet": { "title": "Queen - Bohemian Rhapsody" }
        }]
    })
}

fn youtube_resolver(server: &MockServer) -> YouTubeResolver {
    YouTubeResolver::new(Arc::new(search_client(server)), Arc::new(innertube(server)))
}

fn player_ok() -> serde_json::Value {
    json!({
        "playabilityStatus": { "status": "OK" },
        "videoDetails": { "title": "Queen - Bohemian Rhapsody" },
        "streamingData": {
            "adaptiveFormats": [
                {
                    "itag": 137,
                    "mimeType": "video/mp4; codecs=\"avc1.640028\"",
                    "bitrate": 4000000,
                    "url": "https://cdn.test/137"
                },
                {
                    "itag": 139,
                    "mimeType": "audio/mp4; codecs=\"mp4a.40.5\"",
                    "bitrate": 50000,
                    "averageBitrate": 48000,
                    "url": "https://cdn.test/139"
                },
                {
                    "itag": 140,
                    "mimeType": "audio/mp4; codecs=\"mp4a.40.2\"",
                    "bitrate": 130000,
                    "averageBitrate": 128000,
                    "url": "https://cdn.test/140"
                },
                {
                    "itag": 141,
                    "mimeType": "audio/mp4; codecs=\"mp4a.40.2\"",
                    "bitrate": 260000,
                    "signatureCipher": "s=abc&url=https%3A%2F%2Fcdn.test%2F141"
                },
                {
                    "itag": 251,
                    "mimeType": "audio/webm; codecs=\"opus\"",
                    "bitrate": 160000,
                    "url": "https://cdn.test/251"
                }
            ]
        }
    })
}

#[tokio::test]
async fn test_search_returns_top_video() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .and(query_param("q", "bohemian rhapsody"))
        .and(query_param("maxResults", "1"))
        .and(query_param("key", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_hit("fJ9rUzIMcZQ")))
        .expect(1)
        .mount(&server)
        .await;

    let video = search_client(&server)
        .search_top("bohemian rhapsody")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(video.video_id, "fJ9rUzIMcZQ");
    assert_eq!(video.url, "https://www.youtube.com/watch?v=fJ9rUzIMcZQ");
    assert_eq!(video.title.as_deref(), Some("Queen - Bohemian Rhapsody"));
}

#[tokio::test]
async fn test_search_quota_error_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "quotaExceeded" }
        })))
        .mount(&server)
        .await;

    assert!(search_client(&server).search_top("x").await.is_err());
}

#[tokio::test]
async fn test_resolve_end_to_end_with_innertube() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_hit("fJ9rUzIMcZQ")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/youtubei/v1/player"))
        .and(body_partial_json(json!({ "videoId": "fJ9rUzIMcZQ" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(player_ok()))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = youtube_resolver(&server);
    let stream = resolver.resolve("bohemian rhapsody").await.unwrap();

    // 141 has a higher bitrate but no direct URL; 251 is not MP4
    assert_eq!(stream.audio_url, "https://cdn.test/140");
    assert_eq!(stream.bitrate, 128.0);
    assert_eq!(stream.codec, "mp4a.40.2");
    assert_eq!(stream.mime_type, "audio/mp4");
    assert_eq!(stream.source_url, "https://www.youtube.com/watch?v=fJ9rUzIMcZQ");
}

#[tokio::test]
async fn test_resolve_zero_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/youtubei/v1/player"))
        .respond_with(ResponseTemplate::new(200).set_body_json(player_ok()))
        .expect(0)
        .mount(&server)
        .await;

    let resolver = youtube_resolver(&server);
    assert_eq!(
        resolver.resolve("asdfghjkl").await,
        Err(ResolveError::NoMatchFound("asdfghjkl".to_string()))
    );
}

#[tokio::test]
async fn test_resolve_unplayable_video() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_hit("blocked")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/youtubei/v1/player"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "playabilityStatus": {
                "status": "UNPLAYABLE",
                "reason": "Not available in your country"
            }
        })))
        .mount(&server)
        .await;

    let resolver = youtube_resolver(&server);
    match resolver.resolve("q").await {
        Err(ResolveError::ExtractionError(msg)) => assert!(msg.contains("UNPLAYABLE")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_resolve_without_m4a_audio() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_hit("opusonly")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/youtubei/v1/player"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "playabilityStatus": { "status": "OK" },
            "streamingData": { "adaptiveFormats": [
                {
                    "itag": 251,
                    "mimeType": "audio/webm; codecs=\"opus\"",
                    "bitrate": 160000,
                    "url": "https://cdn.test/251"
                }
            ]}
        })))
        .mount(&server)
        .await;

    let resolver = youtube_resolver(&server);
    assert!(matches!(
        resolver.resolve("q").await,
        Err(ResolveError::NoCompatibleAudioFormat(_))
    ));
}
