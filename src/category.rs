use std::fmt;

/// Photo role within an entity folder.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Category {
    Earlier, // Historical photo, e.g. `baby.jpg`
    Current, // Recent photo, e.g. `recent.jpg`
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Earlier => write!(f, "Earlier"),
            Category::Current => write!(f, "Current"),
        }
    }
}
