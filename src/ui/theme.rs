use crossterm::style::Color;

/// Design tokens for the tree view.
///
/// All icons and colors used by the terminal front-end come from here.
pub mod colors {
    use super::Color;

    /// Cursor row
    pub const ACTIVE: Color = Color::Cyan;
    /// Status and help lines
    pub const DIM: Color = Color::DarkGrey;
    /// Load failures
    pub const ERROR: Color = Color::Red;
}

pub mod icons {
    pub const CURSOR: &str = "> ";

    // Selection states.
    pub const SELECTED: &str = "●";
    pub const UNSELECTED: &str = "○";

    // Tree expansion.
    pub const EXPAND: &str = "▼";
    pub const COLLAPSE: &str = "▶";

    pub const ELLIPSIS: &str = "…";
    pub const RULE: &str = "─";
}

pub mod icons_ascii {
    pub const CURSOR: &str = "> ";

    pub const SELECTED: &str = "[x]";
    pub const UNSELECTED: &str = "[ ]";

    pub const EXPAND: &str = "[v]";
    pub const COLLAPSE: &str = "[>]";

    pub const ELLIPSIS: &str = "~";
    pub const RULE: &str = "-";
}

/// Icon set picked once from terminal capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSet {
    pub selected: &'static str,
    pub unselected: &'static str,
    pub expand: &'static str,
    pub collapse: &'static str,
    pub ellipsis: &'static str,
    pub rule: &'static str,
}

impl IconSet {
    pub fn new(unicode: bool) -> Self {
        if unicode {
            Self {
                selected: icons::SELECTED,
                unselected: icons::UNSELECTED,
                expand: icons::EXPAND,
                collapse: icons::COLLAPSE,
                ellipsis: icons::ELLIPSIS,
                rule: icons::RULE,
            }
        } else {
            Self {
                selected: icons_ascii::SELECTED,
                unselected: icons_ascii::UNSELECTED,
                expand: icons_ascii::EXPAND,
                collapse: icons_ascii::COLLAPSE,
                ellipsis: icons_ascii::ELLIPSIS,
                rule: icons_ascii::RULE,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unicode_icons() {
        let set = IconSet::new(true);
        assert_eq!(set.selected, "●");
        assert_eq!(set.collapse, "▶");
    }

    #[test]
    fn ascii_icons() {
        let set = IconSet::new(false);
        assert_eq!(set.selected, "[x]");
        assert_eq!(set.unselected, "[ ]");
        assert_eq!(set.expand, "[v]");
    }
}
