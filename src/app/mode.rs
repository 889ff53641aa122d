use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Navigate,    // Browse, select, copy, delete
    AddTitle,    // Typing the title of a new entry
    EditContent, // Editing the selected entry's content
    Menu,        // Tray menu popup
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Navigate => write!(f, "NAVIGATE"),
            Mode::AddTitle => write!(f, "NEW"),
            Mode::EditContent => write!(f, "EDIT"),
            Mode::Menu => write!(f, "MENU"),
        }
    }
}
