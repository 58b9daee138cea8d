const PLAYER_CSS: &str = include_str!("../../assets/styling/player.css");

#[test]
fn stylesheet_defines_every_class_the_markup_uses() {
    let used = [
        "player-page",
        "player-card",
        "load-error",
        "now-playing",
        "album-art",
        "album-art-icon",
        "now-playing-body",
        "track-meta",
        "track-title",
        "track-artist",
        "track-fade",
        "is-transitioning",
        "error-banner",
        "error-banner-icon",
        "progress",
        "scrubber",
        "time-labels",
        "transport",
        "transport-play",
        "transport-skip",
        "transport-icon",
        "playlist",
        "playlist-row",
        "is-current",
        "is-pending",
        "playlist-row-info",
        "playlist-row-art",
        "playlist-row-art-icon",
        "playlist-row-text",
        "playlist-row-title",
        "playlist-row-artist",
        "playlist-row-button",
        "playlist-row-button-icon",
    ];
    let missing: Vec<_> = used
        .iter()
        .filter(|class| {
            let selector = format!(".{class}");
            !PLAYER_CSS.match_indices(&selector).any(|(at, _)| {
                PLAYER_CSS[at + selector.len()..]
                    .chars()
                    .next()
                    .is_some_and(|c| !c.is_ascii_alphanumeric() && c != '-')
            })
        })
        .collect();
    assert!(missing.is_empty(), "classes without a rule: {missing:?}");
}
