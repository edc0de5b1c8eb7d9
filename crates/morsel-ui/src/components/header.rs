use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Application title shown in the banner line.
pub const TITLE: &str = "PINK MORSEL SALES VISUALISER";

/// Chart screen header rendering four lines:
///
/// 1. Application title, centered in the available width.
/// 2. A separator as wide as the title.
/// 3. Region and artifact information in `[ region | artifact ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Currently selected region option (e.g. "all", "north").
    pub region: &'a str,
    /// Artifact filename the chart reads from.
    pub artifact: &'a str,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Construct a new header.
    pub fn new(region: &'a str, artifact: &'a str, theme: &'a Theme) -> Self {
        Self {
            region,
            artifact,
            theme,
        }
    }

    /// Render the header as exactly four lines for a terminal `width`
    /// columns wide.
    pub fn to_lines(&self, width: u16) -> Vec<Line<'a>> {
        let pad = (width as usize).saturating_sub(TITLE.width()) / 2;
        let separator = "=".repeat(TITLE.width());

        vec![
            // Title line, centered.
            Line::from(vec![
                Span::raw(" ".repeat(pad)),
                Span::styled(TITLE, self.theme.header),
            ]),
            // Separator line.
            Line::from(Span::styled(separator, self.theme.separator)),
            // Region / artifact info line.
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.region.to_lowercase(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.artifact.to_string(), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            // Empty line.
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
