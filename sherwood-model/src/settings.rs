//! Display toggles and icon size preferences for the new-tab page.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Flat record of display toggles plus the background image reference.
///
/// With the `serde` feature the struct deserializes with container-level
/// defaults: any field missing from a stored record takes its value from
/// [`DisplaySettings::default`], so records written by older builds load
/// without holes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DisplaySettings {
    pub show_icons: bool,
    pub show_titles: bool,
    pub show_urls: bool,
    pub show_add_button: bool,
    pub show_delete_button: bool,
    pub show_edit_button: bool,
    pub show_move_button: bool,
    pub show_background_settings: bool,
    pub show_grid_settings: bool,
    pub show_settings: bool,
    pub background_image: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_icons: true,
            show_titles: true,
            show_urls: true,
            show_add_button: true,
            show_delete_button: true,
            show_edit_button: true,
            show_move_button: true,
            show_background_settings: true,
            show_grid_settings: true,
            show_settings: true,
            background_image: String::new(),
        }
    }
}

/// Keys for the boolean fields of [`DisplaySettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum DisplayToggle {
    ShowIcons,
    ShowTitles,
    ShowUrls,
    ShowAddButton,
    ShowDeleteButton,
    ShowEditButton,
    ShowMoveButton,
    ShowBackgroundSettings,
    ShowGridSettings,
    ShowSettings,
}

impl DisplayToggle {
    pub const ALL: [DisplayToggle; 10] = [
        DisplayToggle::ShowIcons,
        DisplayToggle::ShowTitles,
        DisplayToggle::ShowUrls,
        DisplayToggle::ShowAddButton,
        DisplayToggle::ShowDeleteButton,
        DisplayToggle::ShowEditButton,
        DisplayToggle::ShowMoveButton,
        DisplayToggle::ShowBackgroundSettings,
        DisplayToggle::ShowGridSettings,
        DisplayToggle::ShowSettings,
    ];

    /// Field name as it appears in the stored record.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayToggle::ShowIcons => "showIcons",
            DisplayToggle::ShowTitles => "showTitles",
            DisplayToggle::ShowUrls => "showUrls",
            DisplayToggle::ShowAddButton => "showAddButton",
            DisplayToggle::ShowDeleteButton => "showDeleteButton",
            DisplayToggle::ShowEditButton => "showEditButton",
            DisplayToggle::ShowMoveButton => "showMoveButton",
            DisplayToggle::ShowBackgroundSettings => "showBackgroundSettings",
            DisplayToggle::ShowGridSettings => "showGridSettings",
            DisplayToggle::ShowSettings => "showSettings",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|toggle| toggle.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl DisplaySettings {
    pub fn get(&self, toggle: DisplayToggle) -> bool {
        match toggle {
            DisplayToggle::ShowIcons => self.show_icons,
            DisplayToggle::ShowTitles => self.show_titles,
            DisplayToggle::ShowUrls => self.show_urls,
            DisplayToggle::ShowAddButton => self.show_add_button,
            DisplayToggle::ShowDeleteButton => self.show_delete_button,
            DisplayToggle::ShowEditButton => self.show_edit_button,
            DisplayToggle::ShowMoveButton => self.show_move_button,
            DisplayToggle::ShowBackgroundSettings => {
                self.show_background_settings
            }
            DisplayToggle::ShowGridSettings => self.show_grid_settings,
            DisplayToggle::ShowSettings => self.show_settings,
        }
    }

    /// Copy of `self` with one toggle replaced.
    pub fn with_toggle(mut self, toggle: DisplayToggle, value: bool) -> Self {
        let slot = match toggle {
            DisplayToggle::ShowIcons => &mut self.show_icons,
            DisplayToggle::ShowTitles => &mut self.show_titles,
            DisplayToggle::ShowUrls => &mut self.show_urls,
            DisplayToggle::ShowAddButton => &mut self.show_add_button,
            DisplayToggle::ShowDeleteButton => &mut self.show_delete_button,
            DisplayToggle::ShowEditButton => &mut self.show_edit_button,
            DisplayToggle::ShowMoveButton => &mut self.show_move_button,
            DisplayToggle::ShowBackgroundSettings => {
                &mut self.show_background_settings
            }
            DisplayToggle::ShowGridSettings => &mut self.show_grid_settings,
            DisplayToggle::ShowSettings => &mut self.show_settings,
        };
        *slot = value;
        self
    }
}

pub const MIN_ICON_SIZE_PX: u32 = 10;
pub const MAX_ICON_SIZE_PX: u32 = 50;
pub const DEFAULT_ICON_SIZE_PX: u32 = 20;

/// Base size of the grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct IconSize(u32);

impl IconSize {
    pub fn clamped(px: u32) -> Self {
        Self(px.clamp(MIN_ICON_SIZE_PX, MAX_ICON_SIZE_PX))
    }

    pub fn px(&self) -> u32 {
        self.0
    }

    /// CSS length for the `--em` presentation variable.
    pub fn css_length(&self) -> String {
        format!("{}px", self.0)
    }
}

impl Default for IconSize {
    fn default() -> Self {
        Self(DEFAULT_ICON_SIZE_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_round_trip_through_names() {
        for toggle in DisplayToggle::ALL {
            assert_eq!(DisplayToggle::parse(toggle.as_str()), Some(toggle));
        }
        assert_eq!(DisplayToggle::parse("showNothing"), None);
    }

    #[test]
    fn with_toggle_touches_one_field() {
        let settings =
            DisplaySettings::default().with_toggle(DisplayToggle::ShowUrls, false);
        for toggle in DisplayToggle::ALL {
            assert_eq!(
                settings.get(toggle),
                toggle != DisplayToggle::ShowUrls,
                "{}",
                toggle.as_str()
            );
        }
    }

    #[test]
    fn icon_size_clamps() {
        assert_eq!(IconSize::clamped(4).px(), MIN_ICON_SIZE_PX);
        assert_eq!(IconSize::clamped(99).px(), MAX_ICON_SIZE_PX);
        assert_eq!(IconSize::default().css_length(), "20px");
    }
}
