use anyhow::Result;
use chrono::Local;
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{stdout, Write};
use tracing::Level;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::layout::{
    message_input_left, pill, recipient_input_left, MenuLayout, HEADER_ROW, MESSAGE_PROMPT,
    MESSAGE_ROW, RECIPIENT_PROMPT, RECIPIENT_ROW, TRANSCRIPT_TOP,
};
use super::TerminalUI;
use crate::compose::ComposeFocus;
use crate::ui::UIMode;

/// Cuts `text` to at most `width` terminal columns.
fn fit(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

fn level_color(level: Level) -> Color {
    match level {
        Level::ERROR => Color::Red,
        Level::WARN => Color::Yellow,
        Level::INFO => Color::Blue,
        Level::DEBUG => Color::White,
        Level::TRACE => Color::DarkGrey,
    }
}

impl TerminalUI {
    pub(super) fn render(&self) -> Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::Hide, Clear(ClearType::All))?;

        let (width, height) = self.state.terminal_size;
        let body_bottom = height.saturating_sub(1);

        self.render_bar(&mut stdout, HEADER_ROW, width, &self.header_text())?;
        match self.state.mode {
            UIMode::Compose => {
                self.render_transcript(&mut stdout, TRANSCRIPT_TOP, body_bottom, width)?;
                self.render_recipient_row(&mut stdout, width)?;
                self.render_message_row(&mut stdout, width)?;
                if let Some(menu) = MenuLayout::of(self.compose.focused(), width) {
                    render_menu(&mut stdout, &menu, body_bottom)?;
                }
            }
            UIMode::Logs => self.render_logs(&mut stdout, HEADER_ROW + 1, body_bottom, width)?,
        }
        self.render_bar(&mut stdout, body_bottom, width, &self.status_text())?;

        if self.state.mode == UIMode::Compose {
            self.place_cursor(&mut stdout, width)?;
        }

        stdout.flush()?;
        Ok(())
    }

    fn header_text(&self) -> String {
        let focus = match self.compose.focus() {
            ComposeFocus::Recipient => "recipients",
            ComposeFocus::Message => "message",
        };
        format!(" chat-typeahead | editing {}", focus)
    }

    fn status_text(&self) -> String {
        match self.state.mode {
            UIMode::Compose => format!(
                " To: {} | Tab/Ctrl+T: switch field | Ctrl+R: recipients | Ctrl+Z: undo | F9: logs | Ctrl+C: exit",
                self.compose.recipients().len()
            ),
            UIMode::Logs => format!(
                " Logs | Level: {} | Entries: {} | 1-5: level | F9: compose",
                self.log_buffer.display_level(),
                self.log_buffer.len()
            ),
        }
    }

    fn render_bar(&self, stdout: &mut impl Write, row: u16, width: u16, text: &str) -> Result<()> {
        let text = fit(text, usize::from(width));
        let padding = usize::from(width).saturating_sub(text.width());
        queue!(
            stdout,
            cursor::MoveTo(0, row),
            SetBackgroundColor(Color::DarkGrey),
            SetForegroundColor(Color::White),
            Print(&text),
            Print(" ".repeat(padding)),
            ResetColor
        )?;
        Ok(())
    }

    fn render_recipient_row(&self, stdout: &mut impl Write, width: u16) -> Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, RECIPIENT_ROW),
            SetForegroundColor(Color::Cyan),
            Print(RECIPIENT_PROMPT),
            ResetColor
        )?;
        for name in self.compose.recipients() {
            queue!(
                stdout,
                SetForegroundColor(Color::Green),
                Print(pill(name)),
                ResetColor
            )?;
        }

        let left = recipient_input_left(self.compose.recipients());
        let value = self.compose.widget(ComposeFocus::Recipient).field().value();
        let room = usize::from(width.saturating_sub(left));
        queue!(stdout, Print(fit(value, room)))?;
        Ok(())
    }

    fn render_message_row(&self, stdout: &mut impl Write, width: u16) -> Result<()> {
        let value = self.compose.widget(ComposeFocus::Message).field().value();
        let room = usize::from(width.saturating_sub(message_input_left()));
        queue!(
            stdout,
            cursor::MoveTo(0, MESSAGE_ROW),
            SetForegroundColor(Color::Cyan),
            Print(MESSAGE_PROMPT),
            ResetColor,
            Print(fit(value, room))
        )?;
        Ok(())
    }

    fn render_transcript(
        &self,
        stdout: &mut impl Write,
        top: u16,
        bottom: u16,
        width: u16,
    ) -> Result<()> {
        let rows = usize::from(bottom.saturating_sub(top));
        let start = self.state.sent.len().saturating_sub(rows);
        for (offset, message) in self.state.sent[start..].iter().enumerate() {
            let to = if message.recipients.is_empty() {
                "everyone".to_string()
            } else {
                message.recipients.join(", ")
            };
            let line = format!(
                "{} to {}: {}",
                message.timestamp.with_timezone(&Local).format("%H:%M:%S"),
                to,
                message.body
            );
            queue!(
                stdout,
                cursor::MoveTo(0, top + offset as u16),
                Print(fit(&line, usize::from(width)))
            )?;
        }
        Ok(())
    }

    fn render_logs(&self, stdout: &mut impl Write, top: u16, bottom: u16, width: u16) -> Result<()> {
        let rows = usize::from(bottom.saturating_sub(top));
        for (offset, entry) in self.log_buffer.visible(rows).iter().enumerate() {
            let line = format!(
                "{} {:5} [{}] {}",
                entry.timestamp.with_timezone(&Local).format("%H:%M:%S%.3f"),
                entry.level.as_str(),
                entry.module,
                entry.message
            );
            queue!(
                stdout,
                cursor::MoveTo(0, top + offset as u16),
                SetForegroundColor(level_color(entry.level)),
                Print(fit(&line, usize::from(width))),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn place_cursor(&self, stdout: &mut impl Write, width: u16) -> Result<()> {
        let (row, left) = match self.compose.focus() {
            ComposeFocus::Recipient => (
                RECIPIENT_ROW,
                recipient_input_left(self.compose.recipients()),
            ),
            ComposeFocus::Message => (MESSAGE_ROW, message_input_left()),
        };
        let field = self.compose.focused().field();
        let typed = field.value()[..field.cursor()].width();
        let column = usize::from(left) + typed;
        if column < usize::from(width) {
            queue!(stdout, cursor::MoveTo(column as u16, row), cursor::Show)?;
        }
        Ok(())
    }
}

fn render_menu(stdout: &mut impl Write, menu: &MenuLayout, bottom: u16) -> Result<()> {
    let inner = usize::from(menu.width.saturating_sub(2));

    if let Some(header) = &menu.header {
        if menu.top < bottom {
            let text = fit(header, inner);
            let padding = inner.saturating_sub(text.width());
            queue!(
                stdout,
                cursor::MoveTo(menu.left, menu.top),
                SetBackgroundColor(Color::Black),
                SetForegroundColor(Color::DarkGrey),
                Print(format!(" {}{} ", text, " ".repeat(padding))),
                ResetColor
            )?;
        }
    }

    for (index, row) in menu.rows.iter().enumerate() {
        let y = menu.item_row(index);
        if y >= bottom {
            break;
        }
        let (background, foreground) = if row.active {
            (Color::Blue, Color::White)
        } else {
            (Color::Black, Color::Grey)
        };

        let text = fit(&row.text, inner);
        let label = row
            .label
            .as_deref()
            .map(|label| fit(label, inner.saturating_sub(text.width() + 1)))
            .filter(|label| !label.is_empty());
        let used = text.width() + label.as_ref().map_or(0, |l| l.width() + 1);
        let padding = inner.saturating_sub(used);

        queue!(
            stdout,
            cursor::MoveTo(menu.left, y),
            SetBackgroundColor(background),
            SetForegroundColor(foreground),
            Print(format!(" {}", text))
        )?;
        if let Some(label) = label {
            queue!(
                stdout,
                SetForegroundColor(Color::DarkGrey),
                Print(format!(" {}", label))
            )?;
        }
        queue!(stdout, Print(" ".repeat(padding + 1)), ResetColor)?;
    }
    Ok(())
}
