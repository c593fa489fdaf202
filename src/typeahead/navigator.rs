//! Which rendered suggestion is active.

/// Focus over a rendered list of `len` entries.
///
/// The active entry is held as an index; the menu's visual marker is derived
/// from it. After [`Navigator::reset`] with a non-empty list the first entry is
/// active, and at most one entry is ever active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    len: usize,
    active: Option<usize>,
    mouse_moved_since_show: bool,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts over on a freshly rendered list.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.active = if len > 0 { Some(0) } else { None };
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.active = None;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Moves down, wrapping past the last entry to the first.
    pub fn next(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let next = match self.active {
            Some(i) if i + 1 < self.len => i + 1,
            _ => 0,
        };
        self.active = Some(next);
        self.active
    }

    /// Moves up, wrapping past the first entry to the last.
    pub fn prev(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let prev = match self.active {
            Some(i) if i > 0 => i - 1,
            _ => self.len - 1,
        };
        self.active = Some(prev);
        self.active
    }

    /// Activates `index` directly; out-of-range indices are ignored.
    pub fn activate(&mut self, index: usize) -> bool {
        if index < self.len {
            self.active = Some(index);
            true
        } else {
            false
        }
    }

    /// Called whenever the menu is shown.
    pub fn arm_mouse_guard(&mut self) {
        self.mouse_moved_since_show = false;
    }

    pub fn mouse_moved_since_show(&self) -> bool {
        self.mouse_moved_since_show
    }

    /// Records genuine pointer motion. Returns `true` the first time after a
    /// show.
    pub fn note_mouse_move(&mut self) -> bool {
        !std::mem::replace(&mut self.mouse_moved_since_show, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_activates_first_entry() {
        let mut nav = Navigator::new();
        nav.reset(3);
        assert_eq!(nav.active(), Some(0));
        nav.reset(0);
        assert_eq!(nav.active(), None);
    }

    #[test]
    fn wraps_in_both_directions() {
        let mut nav = Navigator::new();
        nav.reset(3);
        assert_eq!(nav.prev(), Some(2));
        assert_eq!(nav.next(), Some(0));
        assert_eq!(nav.next(), Some(1));
        assert_eq!(nav.next(), Some(2));
        assert_eq!(nav.next(), Some(0));
    }

    #[test]
    fn exactly_one_entry_is_active() {
        let mut nav = Navigator::new();
        nav.reset(3);
        for step in 0..7 {
            if step % 2 == 0 {
                nav.next();
            } else {
                nav.prev();
            }
            assert_eq!((0..3).filter(|&i| nav.is_active(i)).count(), 1);
        }
    }

    #[test]
    fn empty_list_stays_inactive() {
        let mut nav = Navigator::new();
        assert_eq!(nav.next(), None);
        assert_eq!(nav.prev(), None);
        assert!(!nav.activate(0));
    }

    #[test]
    fn mouse_guard_reports_first_move_only() {
        let mut nav = Navigator::new();
        nav.arm_mouse_guard();
        assert!(!nav.mouse_moved_since_show());
        assert!(nav.note_mouse_move());
        assert!(!nav.note_mouse_move());
        nav.arm_mouse_guard();
        assert!(nav.note_mouse_move());
    }
}
