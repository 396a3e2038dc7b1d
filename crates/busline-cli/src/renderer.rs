//! Terminal rendering for markdown output
//!
//! Renders the core's markdown with termimad, or prints it untouched in
//! plain mode.

use anyhow::Result;
use busline_core::{Notice, Severity};
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            // Tables need the whole block; everything else goes line by line
            // so header hashes stay visible.
            if markdown.lines().any(|line| line.starts_with('|')) {
                self.skin.print_text(markdown);
                return Ok(());
            }

            for line in markdown.lines() {
                if line.starts_with('#') {
                    println!("\x1b[36m{line}\x1b[0m");
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        } else {
            print!("{markdown}");
        }
        Ok(())
    }

    /// Render a notice, coloring it by severity
    pub fn notice(&self, notice: &Notice) -> Result<()> {
        if !self.rich_enabled {
            print!("{notice}");
            return Ok(());
        }

        let color = match notice.severity {
            Severity::Success => "32",
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Info => "36",
        };
        print!("\x1b[{color}m{notice}\x1b[0m");
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }
}
