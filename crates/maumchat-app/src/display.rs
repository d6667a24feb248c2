use colored::Colorize;
use maumchat_chat::{ChatDisplay, UpdatableRegion};
use maumchat_types::{Role, CURSOR_GLYPH};
use std::io::{self, Write};

// Backspace over the one-column cursor glyph, then clear to end of line
const ERASE_CURSOR: &str = "\x08\x1B[K";
// Move up one line and clear it
const ERASE_PREVIOUS_LINE: &str = "\x1B[1A\x1B[2K";

fn label(role: Role) -> colored::ColoredString {
    match role {
        Role::User => "나:".bright_green().bold(),
        Role::Assistant => "상담사:".bright_blue().bold(),
        Role::System => "시스템:".bright_black().bold(),
    }
}

/// Line-oriented terminal rendering of a chat session
pub struct TerminalDisplay<W: Write> {
    out: W,
}

impl TerminalDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Remove the prompt line the user just typed, so the submitted message
    /// is shown once with its label.
    pub fn erase_prompt_line(&mut self) {
        let _ = write!(self.out, "{}", ERASE_PREVIOUS_LINE);
        let _ = self.out.flush();
    }
}

impl<W: Write> ChatDisplay for TerminalDisplay<W> {
    fn render_message(&mut self, role: Role, content: &str) {
        let _ = writeln!(self.out, "{} {}\n", label(role), content);
        let _ = self.out.flush();
    }

    fn create_updatable_region(&mut self) -> Box<dyn UpdatableRegion + '_> {
        let _ = write!(self.out, "{} ", label(Role::Assistant));
        let _ = self.out.flush();
        Box::new(TerminalRegion {
            out: &mut self.out,
            shown: String::new(),
        })
    }

    fn show_error(&mut self, text: &str) {
        let _ = writeln!(self.out, "{} {}\n", "❌".bright_red(), text.bright_red());
        let _ = self.out.flush();
    }
}

/// Streaming reply printed after its label.
///
/// Updates that extend what is already on screen only print the new tail;
/// anything else starts a fresh line with the full text.
struct TerminalRegion<'a, W: Write> {
    out: &'a mut W,
    shown: String,
}

impl<W: Write> TerminalRegion<'_, W> {
    fn write_update(&mut self, text: &str) -> io::Result<()> {
        let (shown_body, shown_cursor) = split_cursor(&self.shown);

        match text.strip_prefix(shown_body) {
            Some(tail) => {
                if shown_cursor {
                    write!(self.out, "{}", ERASE_CURSOR)?;
                }
                write!(self.out, "{}", tail)?;
            }
            None => {
                write!(self.out, "\n{} {}", label(Role::Assistant), text)?;
            }
        }

        self.shown = text.to_string();
        self.out.flush()
    }
}

impl<W: Write> UpdatableRegion for TerminalRegion<'_, W> {
    fn update(&mut self, text: &str) {
        let _ = self.write_update(text);
    }
}

impl<W: Write> Drop for TerminalRegion<'_, W> {
    fn drop(&mut self) {
        if split_cursor(&self.shown).1 {
            let _ = write!(self.out, "{}", ERASE_CURSOR);
        }
        let _ = write!(self.out, "\n\n");
        let _ = self.out.flush();
    }
}

fn split_cursor(text: &str) -> (&str, bool) {
    match text.strip_suffix(CURSOR_GLYPH) {
        Some(body) => (body, true),
        None => (text, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain() {
        colored::control::set_override(false);
    }

    fn rendered(display: TerminalDisplay<Vec<u8>>) -> String {
        String::from_utf8(display.into_inner()).unwrap()
    }

    #[test]
    fn test_render_message_labels_roles() {
        plain();
        let mut display = TerminalDisplay::new(Vec::new());

        display.render_message(Role::User, "안녕하세요");
        display.render_message(Role::Assistant, "반가워요");

        assert_eq!(rendered(display), "나: 안녕하세요\n\n상담사: 반가워요\n\n");
    }

    #[test]
    fn test_region_extends_line_and_moves_cursor() {
        plain();
        let mut display = TerminalDisplay::new(Vec::new());
        {
            let mut region = display.create_updatable_region();
            region.update(&format!("안{CURSOR_GLYPH}"));
            region.update(&format!("안녕{CURSOR_GLYPH}"));
            region.update("안녕");
        }

        assert_eq!(
            rendered(display),
            format!("상담사: 안{CURSOR_GLYPH}{ERASE_CURSOR}녕{CURSOR_GLYPH}{ERASE_CURSOR}\n\n")
        );
    }

    #[test]
    fn test_region_drop_erases_dangling_cursor() {
        plain();
        let mut display = TerminalDisplay::new(Vec::new());
        {
            let mut region = display.create_updatable_region();
            region.update(&format!("부분{CURSOR_GLYPH}"));
        }

        assert_eq!(
            rendered(display),
            format!("상담사: 부분{CURSOR_GLYPH}{ERASE_CURSOR}\n\n")
        );
    }

    #[test]
    fn test_region_reprints_when_text_does_not_extend() {
        plain();
        let mut display = TerminalDisplay::new(Vec::new());
        {
            let mut region = display.create_updatable_region();
            region.update("abc");
            region.update("xyz");
        }

        assert_eq!(rendered(display), "상담사: abc\n상담사: xyz\n\n");
    }

    #[test]
    fn test_show_error_prints_notice() {
        plain();
        let mut display = TerminalDisplay::new(Vec::new());

        display.show_error("API 호출 중 오류가 발생했습니다: timeout");

        assert_eq!(rendered(display), "❌ API 호출 중 오류가 발생했습니다: timeout\n\n");
    }
}
