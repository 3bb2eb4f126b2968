use serde::Serialize;

/// Known video host URL forms, owned here so the trigger detector and the
/// block parser agree on what counts as an embeddable source.
pub struct VideoHost;

impl VideoHost {
    pub const WATCH_PREFIX: &'static str = "https://www.youtube.com/watch";
    pub const SHORT_PREFIX: &'static str = "https://youtu.be/";
    pub const EMBED_BASE: &'static str = "https://www.youtube.com/embed/";

    const PREFIXES: [&'static str; 2] = [Self::WATCH_PREFIX, Self::SHORT_PREFIX];

    /// Prefix test against the known host URL forms.
    pub fn matches(text: &str) -> bool {
        Self::PREFIXES.iter().any(|p| text.starts_with(p))
    }
}

/// Source reference held by a media-embed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaSource {
    url: String,
    video_id: Option<String>,
}

impl MediaSource {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let video_id = extract_video_id(&url);
        Self { url, video_id }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    /// Player URL for the presentation layer's embed frame.
    pub fn embed_url(&self) -> Option<String> {
        self.video_id
            .as_ref()
            .map(|id| format!("{}{id}", VideoHost::EMBED_BASE))
    }
}

fn extract_video_id(url: &str) -> Option<String> {
    let id = match url.split_once("watch?v=") {
        Some((_, rest)) => rest.split('&').next().unwrap_or_default(),
        None if url.starts_with(VideoHost::WATCH_PREFIX) => "",
        None => url
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .split('?')
            .next()
            .unwrap_or_default(),
    };
    (!id.is_empty()).then(|| id.to_string())
}
