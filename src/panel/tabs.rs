//! Tab navigation for the settings panel.

/// Available tabs in the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SettingsTab {
    #[default]
    General,
    Api,
    LocalModels,
    Appearance,
}

impl SettingsTab {
    /// Get all tabs in order
    pub fn all() -> &'static [SettingsTab] {
        &[
            SettingsTab::General,
            SettingsTab::Api,
            SettingsTab::LocalModels,
            SettingsTab::Appearance,
        ]
    }

    /// Get the display name for the tab
    pub fn display_name(&self) -> &'static str {
        match self {
            SettingsTab::General => "General",
            SettingsTab::Api => "API",
            SettingsTab::LocalModels => "Local Models",
            SettingsTab::Appearance => "Appearance",
        }
    }

    /// Get the index of the tab (for Tabs widget)
    pub fn index(&self) -> usize {
        match self {
            SettingsTab::General => 0,
            SettingsTab::Api => 1,
            SettingsTab::LocalModels => 2,
            SettingsTab::Appearance => 3,
        }
    }

    /// Get tab from index
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => SettingsTab::Api,
            2 => SettingsTab::LocalModels,
            3 => SettingsTab::Appearance,
            _ => SettingsTab::General,
        }
    }

    /// Get the next tab (wraps around)
    pub fn next(&self) -> Self {
        Self::from_index((self.index() + 1) % Self::all().len())
    }

    /// Get the previous tab (wraps around)
    pub fn prev(&self) -> Self {
        let len = Self::all().len();
        Self::from_index((self.index() + len - 1) % len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for tab in SettingsTab::all() {
            assert_eq!(SettingsTab::from_index(tab.index()), *tab);
        }
    }

    #[test]
    fn test_next_and_prev_wrap() {
        assert_eq!(SettingsTab::Appearance.next(), SettingsTab::General);
        assert_eq!(SettingsTab::General.prev(), SettingsTab::Appearance);
        assert_eq!(SettingsTab::Api.next(), SettingsTab::LocalModels);
    }
}
