use super::*;

fn t(id: u32, title: &str) -> Track {
    Track {
        id: TrackId(id),
        title: title.into(),
        artist: String::new(),
        album: String::new(),
        source_url: format!("https://example.test/{id}.mp3"),
    }
}

#[test]
fn rejects_empty_playlist() {
    assert_eq!(Playlist::new(Vec::new()), Err(PlaylistError::Empty));
}

#[test]
fn rejects_duplicate_ids() {
    let err = Playlist::new(vec![t(1, "A"), t(2, "B"), t(1, "C")]).unwrap_err();
    assert_eq!(err, PlaylistError::DuplicateId(TrackId(1)));
}

#[test]
fn navigation_wraps_both_directions() {
    let playlist = Playlist::new(vec![t(1, "A"), t(2, "B"), t(3, "C"), t(4, "D")]).unwrap();
    assert_eq!(playlist.next_index(3), 0);
    assert_eq!(playlist.previous_index(0), 3);
    assert_eq!(playlist.next_index(1), 2);
    assert_eq!(playlist.previous_index(2), 1);
}

#[test]
fn single_track_wraps_onto_itself() {
    let playlist = Playlist::new(vec![t(7, "Solo")]).unwrap();
    assert_eq!(playlist.next_index(0), 0);
    assert_eq!(playlist.previous_index(0), 0);
}

#[test]
fn lookup_by_id() {
    let playlist = Playlist::new(vec![t(10, "A"), t(20, "B")]).unwrap();
    assert_eq!(playlist.index_of(TrackId(20)), Some(1));
    assert_eq!(playlist.index_of(TrackId(30)), None);
    assert_eq!(playlist.get(0).map(|t| t.title.as_str()), Some("A"));
    assert_eq!(playlist.first().id, TrackId(10));
}

#[test]
fn track_accepts_url_alias() {
    let json = r#"{"id": 3, "title": "Billie Jean", "url": "https://example.test/bj.mp3"}"#;
    let track: Track = serde_json::from_str(json).unwrap();
    assert_eq!(track.id, TrackId(3));
    assert_eq!(track.source_url, "https://example.test/bj.mp3");
    assert!(track.artist.is_empty());
}
