//! Where things sit on screen, shared by drawing and mouse hit-testing.
use unicode_width::UnicodeWidthStr;

use crate::compose::{ComposeWidget, MenuRow};
use crate::typeahead::{FieldGeometry, Rect};

pub(super) const HEADER_ROW: u16 = 0;
pub(super) const RECIPIENT_ROW: u16 = 2;
pub(super) const MESSAGE_ROW: u16 = 3;
pub(super) const TRANSCRIPT_TOP: u16 = 5;

pub(super) const RECIPIENT_PROMPT: &str = "To:      ";
pub(super) const MESSAGE_PROMPT: &str = "Message: ";

pub(super) fn pill(name: &str) -> String {
    format!("[{}] ", name)
}

/// Column where the recipient input starts, after the prompt and the pills.
pub(super) fn recipient_input_left(recipients: &[String]) -> u16 {
    let pills: usize = recipients.iter().map(|name| pill(name).width()).sum();
    (RECIPIENT_PROMPT.width() + pills).min(u16::MAX as usize) as u16
}

pub(super) fn message_input_left() -> u16 {
    MESSAGE_PROMPT.width() as u16
}

/// One terminal row per field; the menu drops just below it.
pub(super) fn field_geometry(row: u16, left: u16, terminal_width: u16) -> FieldGeometry {
    FieldGeometry {
        client_rect: Rect {
            left: f64::from(left),
            top: f64::from(row),
            width: f64::from(terminal_width.saturating_sub(left)),
            height: 1.0,
        },
        scroll_x: 0.0,
        scroll_y: 0.0,
        offset_height: 1.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MenuHit {
    Outside,
    Header,
    Item(usize),
}

/// A visible menu, resolved to terminal cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct MenuLayout {
    pub top: u16,
    pub left: u16,
    pub width: u16,
    pub header: Option<String>,
    pub rows: Vec<MenuRow>,
}

impl MenuLayout {
    pub fn of(widget: &dyn ComposeWidget, terminal_width: u16) -> Option<Self> {
        if !widget.is_shown() {
            return None;
        }
        let position = widget.position()?;
        let header = widget.header();
        let rows = widget.rows();

        let content = rows
            .iter()
            .map(|row| row.text.width() + row.label.as_ref().map_or(0, |l| l.width() + 1))
            .chain(header.as_ref().map(|h| h.width()))
            .max()
            .unwrap_or(0);

        let left = position.left.max(0.0) as u16;
        let width = (content + 2).min(usize::from(terminal_width.saturating_sub(left))) as u16;
        Some(Self {
            top: position.top.max(0.0) as u16,
            left,
            width,
            header,
            rows,
        })
    }

    fn header_rows(&self) -> u16 {
        u16::from(self.header.is_some())
    }

    pub fn item_row(&self, index: usize) -> u16 {
        self.top + self.header_rows() + index as u16
    }

    pub fn hit(&self, column: u16, row: u16) -> MenuHit {
        if column < self.left || column >= self.left.saturating_add(self.width) || row < self.top {
            return MenuHit::Outside;
        }
        let offset = row - self.top;
        if offset < self.header_rows() {
            return MenuHit::Header;
        }
        let index = usize::from(offset - self.header_rows());
        if index < self.rows.len() {
            MenuHit::Item(index)
        } else {
            MenuHit::Outside
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(header: bool) -> MenuLayout {
        let row = |text: &str| MenuRow {
            text: text.to_string(),
            label: None,
            active: false,
        };
        MenuLayout {
            top: 3,
            left: 9,
            width: 10,
            header: header.then(|| "Recipients".to_string()),
            rows: vec![row("alice"), row("bob")],
        }
    }

    #[test]
    fn hits_account_for_the_header() {
        let menu = layout(true);
        assert_eq!(menu.hit(10, 3), MenuHit::Header);
        assert_eq!(menu.hit(10, 4), MenuHit::Item(0));
        assert_eq!(menu.hit(18, 5), MenuHit::Item(1));
        assert_eq!(menu.hit(10, 6), MenuHit::Outside);
        assert_eq!(menu.item_row(1), 5);
    }

    #[test]
    fn hits_outside_the_columns_miss() {
        let menu = layout(false);
        assert_eq!(menu.hit(10, 3), MenuHit::Item(0));
        assert_eq!(menu.hit(8, 3), MenuHit::Outside);
        assert_eq!(menu.hit(19, 3), MenuHit::Outside);
        assert_eq!(menu.hit(10, 2), MenuHit::Outside);
    }

    #[test]
    fn recipient_input_moves_right_with_pills() {
        let names = vec!["bob".to_string(), "eve".to_string()];
        assert_eq!(recipient_input_left(&[]), 9);
        assert_eq!(recipient_input_left(&names), 9 + 6 + 6);
    }
}
