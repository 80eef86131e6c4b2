//! Terminal rendering for dry runs.
//!
//! The alert is written in the chat Markdown dialect (`*bold*`,
//! `[text](url)`); termimad renders it close enough for a preview.

use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        // Section titles are `*...*`, which termimad treats as italic
        skin.italic.set_fg(Color::Yellow);
        skin.bold.set_fg(Color::Red);

        Self { rich_enabled, skin }
    }

    /// Render markdown text to stdout
    pub fn render(&self, markdown: &str) {
        if self.rich_enabled {
            for line in markdown.lines() {
                self.skin.print_inline(line);
                println!();
            }
        } else {
            println!("{markdown}");
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
