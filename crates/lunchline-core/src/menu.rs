//! Formatted menu types.
//!
//! A [`Menu`] is what a source produces for one school on one day: either a
//! [`SectionedMenu`] (weekly API, dishes grouped under section names) or a
//! [`FlatMenu`] (daily API, a plain list of dish names).

use std::fmt::Write as _;

// ============================================================================
// Section
// ============================================================================

/// A named group of dishes within one day's menu (e.g. "Entrées").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Normalized section name.
    pub name: String,
    /// Dish names in encounter order.
    pub dishes: Vec<String>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dishes: Vec::new(),
        }
    }
}

// ============================================================================
// SectionedMenu
// ============================================================================

/// Ordered mapping from section name to dish list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionedMenu {
    sections: Vec<Section>,
}

impl SectionedMenu {
    /// Creates a menu from already-built sections.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Sections in encounter order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Looks up a section by name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Returns `true` when no section was found for the day.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of dishes across all sections.
    pub fn dish_count(&self) -> usize {
        self.sections.iter().map(|s| s.dishes.len()).sum()
    }

    /// Renders `"<section>: "` followed by one `"- <dish>"` line per dish and a
    /// blank line, for every section in order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            let _ = writeln!(out, "{}: ", section.name);
            for dish in &section.dishes {
                let _ = writeln!(out, "- {dish}");
            }
            out.push('\n');
        }
        out
    }
}

// ============================================================================
// FlatMenu
// ============================================================================

/// A flat, ungrouped list of dish names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatMenu {
    /// Dish descriptions in list order.
    pub dishes: Vec<String>,
}

impl FlatMenu {
    /// Returns `true` when the list is empty.
    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    /// Renders one dish per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for dish in &self.dishes {
            out.push_str(dish);
            out.push('\n');
        }
        out
    }
}

// ============================================================================
// Menu
// ============================================================================

/// A day's menu from either API family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Menu {
    /// Weekly-API menu grouped by section.
    Sectioned(SectionedMenu),
    /// Daily-API flat entrée list.
    Flat(FlatMenu),
}

impl Menu {
    /// Returns `true` when there is nothing to send.
    pub fn is_empty(&self) -> bool {
        match self {
            Menu::Sectioned(menu) => menu.is_empty(),
            Menu::Flat(menu) => menu.is_empty(),
        }
    }

    /// Number of dishes, for logging.
    pub fn dish_count(&self) -> usize {
        match self {
            Menu::Sectioned(menu) => menu.dish_count(),
            Menu::Flat(menu) => menu.dishes.len(),
        }
    }

    /// Renders the menu body without any header.
    pub fn render_body(&self) -> String {
        match self {
            Menu::Sectioned(menu) => menu.render(),
            Menu::Flat(menu) => menu.render(),
        }
    }
}

impl From<SectionedMenu> for Menu {
    fn from(menu: SectionedMenu) -> Self {
        Menu::Sectioned(menu)
    }
}

impl From<FlatMenu> for Menu {
    fn from(menu: FlatMenu) -> Self {
        Menu::Flat(menu)
    }
}
