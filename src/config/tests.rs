use super::*;
use crate::playlist::TrackId;

#[test]
fn embedded_manifest_loads() {
    let setup = load_embedded().unwrap();
    assert_eq!(setup.playlist.len(), 4);
    assert_eq!(setup.playlist.first().id, TrackId(1));
    assert_eq!(setup.playlist.first().title, "Moanin'");
    assert_eq!(setup.config.transition_delay(), Duration::from_millis(300));
}

#[test]
fn missing_player_section_uses_defaults() {
    let setup = parse_manifest(
        r#"{"tracks": [{"id": 1, "title": "A", "url": "https://example.test/a.mp3"}]}"#,
    )
    .unwrap();
    assert_eq!(setup.config, PlayerConfig::default());
    assert!(setup.config.keyboard_shortcuts);
}

#[test]
fn partial_player_section_keeps_other_defaults() {
    let setup = parse_manifest(
        r#"{
            "player": {"keyboard_shortcuts": false},
            "tracks": [{"id": 1, "title": "A", "url": "https://example.test/a.mp3"}]
        }"#,
    )
    .unwrap();
    assert!(!setup.config.keyboard_shortcuts);
    assert_eq!(setup.config.transition_delay_ms, 300);
}

#[test]
fn transition_delay_is_capped() {
    let config = PlayerConfig {
        transition_delay_ms: 60_000,
        ..PlayerConfig::default()
    };
    assert_eq!(config.transition_delay(), Duration::from_millis(5_000));
}

#[test]
fn empty_track_list_is_rejected() {
    let err = parse_manifest(r#"{"tracks": []}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Playlist(PlaylistError::Empty)));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = parse_manifest("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
