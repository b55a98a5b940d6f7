/// Colour scheme, passed explicitly to every component that styles by it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Dark,
    Light,
}

impl ColorMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Dark => ColorMode::Light,
            ColorMode::Light => ColorMode::Dark,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, ColorMode::Dark)
    }

    /// `block block--dark` or `block block--light`
    #[must_use]
    pub fn class(self, block: &str) -> String {
        format!("{block} {block}--{self}")
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorMode::Dark => write!(f, "dark"),
            ColorMode::Light => write!(f, "light"),
        }
    }
}
