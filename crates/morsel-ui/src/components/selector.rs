use ratatui::text::{Line, Span};

use crate::themes::Theme;

/// Key hints appended after the option row.
const HINTS: &str = "   ←/→ switch · 1-5 jump · r reload · q quit";

/// The fixed region option row: `all` plus the four named regions, with the
/// active option highlighted.
pub struct RegionSelector<'a> {
    pub options: &'a [String],
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> RegionSelector<'a> {
    /// Construct a new selector.
    pub fn new(options: &'a [String], selected: usize, theme: &'a Theme) -> Self {
        Self {
            options,
            selected,
            theme,
        }
    }

    /// Render the selector as a single line.
    pub fn to_line(&self) -> Line<'a> {
        let mut spans = vec![Span::styled("Region: ", self.theme.label)];

        for (i, option) in self.options.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            if i == self.selected {
                spans.push(Span::styled(
                    format!("[{}]", option),
                    self.theme.selector_active,
                ));
            } else {
                spans.push(Span::styled(
                    format!(" {} ", option),
                    self.theme.selector_inactive,
                ));
            }
        }

        spans.push(Span::styled(HINTS, self.theme.dim));
        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
