//! Hit testing for clickable TUI elements
//!
//! Tracks rendered widget bounds and maps mouse coordinates to actions

use ratatui::layout::Rect;

use crate::panel::SettingsTab;

/// Identifies a clickable element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    /// Anywhere outside the settings modal
    ModalClose,
    /// The settings modal itself (swallows clicks)
    ModalContent,
    /// Tab in the settings tab bar
    Tab(SettingsTab),
    /// Preference row on the General/API/Appearance tabs
    SettingRow(usize),
    /// Entry in the local model list
    ModelRow(usize),
    /// "Add model" button on the Local Models tab
    AddModel,
    /// Yes/confirm button of the active dialog
    DialogYes,
    /// No/cancel button of the active dialog
    DialogNo,
}

/// Tracks clickable regions for hit testing
#[derive(Debug, Default)]
pub struct HitTestRegistry {
    /// We use a vector and iterate in reverse (last rendered on top) for hit testing
    regions: Vec<(Rect, ClickTarget)>,
}

impl HitTestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn register(&mut self, rect: Rect, target: ClickTarget) {
        self.regions.push((rect, target));
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<&ClickTarget> {
        // Search in reverse order to respect Z-order (later registrations are "on top")
        for (rect, target) in self.regions.iter().rev() {
            if x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height {
                return Some(target);
            }
        }
        None
    }

    /// Register the strips of `area` around `overlay` as [`ClickTarget::ModalClose`]
    /// and the overlay itself as [`ClickTarget::ModalContent`].
    pub fn register_modal(&mut self, area: Rect, overlay: Rect) {
        // Top strip
        if overlay.y > area.y {
            self.register(
                Rect::new(area.x, area.y, area.width, overlay.y - area.y),
                ClickTarget::ModalClose,
            );
        }
        // Bottom strip
        let bottom_y = overlay.y + overlay.height;
        if bottom_y < area.y + area.height {
            self.register(
                Rect::new(area.x, bottom_y, area.width, area.y + area.height - bottom_y),
                ClickTarget::ModalClose,
            );
        }
        // Left strip
        if overlay.x > area.x {
            self.register(
                Rect::new(area.x, overlay.y, overlay.x - area.x, overlay.height),
                ClickTarget::ModalClose,
            );
        }
        // Right strip
        let right_x = overlay.x + overlay.width;
        if right_x < area.x + area.width {
            self.register(
                Rect::new(right_x, overlay.y, area.x + area.width - right_x, overlay.height),
                ClickTarget::ModalClose,
            );
        }

        self.register(overlay, ClickTarget::ModalContent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_regions_win() {
        let mut hits = HitTestRegistry::new();
        hits.register(Rect::new(0, 0, 10, 10), ClickTarget::ModalContent);
        hits.register(Rect::new(2, 2, 3, 1), ClickTarget::SettingRow(0));

        assert_eq!(hits.hit_test(3, 2), Some(&ClickTarget::SettingRow(0)));
        assert_eq!(hits.hit_test(3, 3), Some(&ClickTarget::ModalContent));
        assert_eq!(hits.hit_test(10, 10), None);
    }

    #[test]
    fn test_modal_strips_cover_outside_only() {
        let area = Rect::new(0, 0, 100, 40);
        let overlay = Rect::new(10, 4, 80, 32);
        let mut hits = HitTestRegistry::new();
        hits.register_modal(area, overlay);

        for (x, y) in [(0, 0), (99, 39), (5, 20), (95, 20), (50, 2), (50, 37)] {
            assert_eq!(hits.hit_test(x, y), Some(&ClickTarget::ModalClose), "{x},{y}");
        }
        for (x, y) in [(10, 4), (89, 35), (50, 20)] {
            assert_eq!(hits.hit_test(x, y), Some(&ClickTarget::ModalContent), "{x},{y}");
        }
    }
}
