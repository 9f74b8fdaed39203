fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use vidpush_protocol::{PrivacyStatus, UploadedVideo, VideoMetadata, VideoResource};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture, re-serializes it, and compares the JSON values.
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  wire: {fixture}\n  Rust: {reserialized}"
        );
    }

    #[test]
    fn fixture_video_resource() {
        roundtrip_test::<VideoResource>("video_resource.json");
    }

    #[test]
    fn fixture_uploaded_video() {
        roundtrip_test::<UploadedVideo>("uploaded_video.json");
    }

    #[test]
    fn metadata_serializes_to_fixture() {
        let meta = VideoMetadata {
            title: "Weekend highlights".into(),
            description: "Clips from the Saturday stream".into(),
            privacy_status: PrivacyStatus::Unlisted,
        };
        let value = serde_json::to_value(VideoResource::from(&meta)).unwrap();
        assert_eq!(value, load_fixture("video_resource.json"));
    }

    #[test]
    fn full_insert_response_parses() {
        let video: UploadedVideo =
            serde_json::from_value(load_fixture("video_insert_response.json")).unwrap();
        assert_eq!(video.id, "dQw4w9WgXcQ");

        let snippet = video.snippet.expect("snippet");
        assert_eq!(snippet.title, "Weekend highlights");
        assert_eq!(
            video.status.map(|s| s.privacy_status),
            Some(PrivacyStatus::Unlisted)
        );
    }

    #[test]
    fn insert_response_reduces_to_known_fields() {
        let video: UploadedVideo =
            serde_json::from_value(load_fixture("video_insert_response.json")).unwrap();
        let reserialized = serde_json::to_value(&video).unwrap();
        assert_eq!(reserialized, load_fixture("uploaded_video.json"));
    }

    #[test]
    fn unknown_privacy_is_rejected() {
        let mut fixture = load_fixture("video_resource.json");
        fixture["status"]["privacyStatus"] = serde_json::json!("friends");
        assert!(serde_json::from_value::<VideoResource>(fixture).is_err());
    }
}
