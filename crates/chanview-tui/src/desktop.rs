//! Desktop hand-offs for a channel card: clipboard, external player, browser.

use tracing::info;

pub const COPIED_NOTICE: &str = "Stream URL copied to clipboard!";

/// The two OS services card actions need.
pub trait Desktop {
    fn copy_text(&mut self, text: &str) -> anyhow::Result<()>;
    fn open_uri(&mut self, uri: &str) -> anyhow::Result<()>;
}

/// Real clipboard (arboard) and URI handler (`open`).
///
/// The clipboard handle is kept for the lifetime of the app: on X11 the
/// contents disappear as soon as the owning handle is dropped.
#[derive(Default)]
pub struct SystemDesktop {
    clipboard: Option<arboard::Clipboard>,
}

impl SystemDesktop {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Desktop for SystemDesktop {
    fn copy_text(&mut self, text: &str) -> anyhow::Result<()> {
        let mut clipboard = match self.clipboard.take() {
            Some(cb) => cb,
            None => arboard::Clipboard::new()?,
        };
        let result = clipboard.set_text(text.to_string());
        self.clipboard = Some(clipboard);
        Ok(result?)
    }

    fn open_uri(&mut self, uri: &str) -> anyhow::Result<()> {
        open::that_detached(uri)?;
        Ok(())
    }
}

/// `<scheme>://<url>`, the form player URI handlers register for.
pub fn player_uri(scheme: &str, url: &str) -> String {
    format!("{}://{}", scheme, url)
}

/// Copy the stream URL. Returns the notice to show.
pub fn copy_stream(desktop: &mut impl Desktop, url: &str) -> anyhow::Result<&'static str> {
    desktop.copy_text(url)?;
    info!("copied stream url {}", url);
    Ok(COPIED_NOTICE)
}

/// Hand the stream to the external player.
pub fn open_stream(desktop: &mut impl Desktop, scheme: &str, url: &str) -> anyhow::Result<String> {
    let uri = player_uri(scheme, url);
    desktop.open_uri(&uri)?;
    info!("opened {}", uri);
    Ok(format!("opening in {}…", scheme))
}

pub fn open_in_browser(desktop: &mut impl Desktop, url: &str) -> anyhow::Result<String> {
    desktop.open_uri(url)?;
    info!("opened {} in browser", url);
    Ok("opening in browser…".to_string())
}
