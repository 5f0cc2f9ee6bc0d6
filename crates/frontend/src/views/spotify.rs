use url::Url;

const EMBED_BASE: &str = "https://open.spotify.com/embed/track/";
const SPOTIFY_HOST: &str = "open.spotify.com";

/// Embed URL for a Spotify track link.
///
/// Accepts `https://open.spotify.com/track/<id>` (port, query and fragment
/// ignored) and `spotify:track:<id>`. Anything else yields `None`.
pub fn spotify_embed_url(url: &str) -> Option<String> {
    let url = url.trim();

    if let Some(rest) = url.strip_prefix("spotify:") {
        let mut parts = rest.split(':');
        return match (parts.next(), parts.next()) {
            (Some("track"), Some(id)) if !id.is_empty() => Some(format!("{EMBED_BASE}{id}")),
            _ => None,
        };
    }

    let parsed = Url::parse(url).ok()?;
    if parsed.host_str() != Some(SPOTIFY_HOST) {
        return None;
    }
    let mut segments = parsed.path_segments()?;
    match (segments.next(), segments.next()) {
        (Some("track"), Some(id)) if !id.is_empty() => Some(format!("{EMBED_BASE}{id}")),
        _ => None,
    }
}
