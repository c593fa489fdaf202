//! Placement of the suggestion panel relative to the bound field.

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// What the host knows about where the bound field sits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldGeometry {
    /// Bounding rectangle relative to the viewport.
    pub client_rect: Rect,
    /// Scroll offset of the scrolling root, used to turn viewport coordinates
    /// into document coordinates.
    pub scroll_x: f64,
    pub scroll_y: f64,
    /// Rendered height of the field itself.
    pub offset_height: f64,
}

impl FieldGeometry {
    /// Offset from the top of the document, measured through the bounding
    /// rectangle rather than the field's own `offsetTop`, which is relative to
    /// its positioned ancestor and wrong inside scrolled containers.
    pub fn document_top(&self) -> f64 {
        self.client_rect.top + self.scroll_y
    }

    pub fn document_left(&self) -> f64 {
        self.client_rect.left + self.scroll_x
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MenuPosition {
    pub top: f64,
    pub left: f64,
}

/// Computes where the menu container goes.
///
/// `fixed` positions against the viewport, otherwise against the document.
/// `dropup` puts the container above the field. The top edge never goes
/// negative.
pub fn menu_position(
    geometry: &FieldGeometry,
    container_height: f64,
    fixed: bool,
    dropup: bool,
) -> MenuPosition {
    let (anchor_top, left) = if fixed {
        (geometry.client_rect.top, geometry.client_rect.left)
    } else {
        (geometry.document_top(), geometry.document_left())
    };

    let top = if dropup {
        anchor_top - container_height
    } else {
        anchor_top + geometry.offset_height
    };

    MenuPosition {
        top: top.max(0.0),
        left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> FieldGeometry {
        FieldGeometry {
            client_rect: Rect {
                left: 10.0,
                top: 100.0,
                width: 300.0,
                height: 20.0,
            },
            scroll_x: 0.0,
            scroll_y: 50.0,
            offset_height: 20.0,
        }
    }

    #[test]
    fn below_field_in_document_coordinates() {
        let position = menu_position(&geometry(), 80.0, false, false);
        assert_eq!(position, MenuPosition { top: 170.0, left: 10.0 });
    }

    #[test]
    fn fixed_uses_viewport_coordinates() {
        let position = menu_position(&geometry(), 80.0, true, false);
        assert_eq!(position.top, 120.0);
    }

    #[test]
    fn dropup_sits_above_the_field() {
        let position = menu_position(&geometry(), 80.0, true, true);
        assert_eq!(position.top, 20.0);
    }

    #[test]
    fn top_is_clamped_to_zero() {
        let position = menu_position(&geometry(), 500.0, true, true);
        assert_eq!(position.top, 0.0);
    }
}
