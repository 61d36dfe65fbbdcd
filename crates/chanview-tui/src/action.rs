//! Action enum — all user-initiated intents.

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    SearchBar,
    ChannelList,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPane(ComponentId),

    // ── Search ───────────────────────────────────────────────────────────────
    OpenSearch,
    CloseSearch,
    SearchChanged(String),

    // ── Pagination ───────────────────────────────────────────────────────────
    PrevPage,
    NextPage,
    Reload,

    // ── Card actions (carry the channel's stream URL) ────────────────────────
    CopyStream(String),
    OpenStream(String),
    OpenInBrowser(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
