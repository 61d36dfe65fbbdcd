use serde::{Deserialize, Serialize};

/// A stream source as listed by the backend.
///
/// Only `name`, `playing_now` and `url` are guaranteed; the playlist-derived
/// fields are filled in by backends that scan m3u sources and are empty
/// otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Channel {
    pub name: String,
    #[serde(default)]
    pub playing_now: String,
    pub url: String,
    #[serde(default)]
    pub tvg_id: String,
    #[serde(default)]
    pub tvg_logo: String,
    #[serde(default)]
    pub group_title: String,
    #[serde(default)]
    pub status: String,
}

impl Channel {
    pub fn new(
        name: impl Into<String>,
        playing_now: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            playing_now: playing_now.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// True when the backend's stream validator marked this channel reachable.
    pub fn is_online(&self) -> bool {
        self.status.eq_ignore_ascii_case("online")
    }
}

/// What a single request to the backend asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelQuery {
    /// `GET /channels?page=N` — the paged browse view.
    Page(u32),
    /// `GET /search?query=Q` — unpaginated name search.
    Search(String),
}

impl ChannelQuery {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Page(_) => "load",
            Self::Search(_) => "search",
        }
    }
}
