//! Active-section visual side effect
//!
//! Maps the active section index onto a class from a fixed palette,
//! cycling when there are more sections than classes.

/// Class swap produced by applying a new active section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeChange {
    pub removed: Option<String>,
    pub added: Option<String>,
}

impl ThemeChange {
    pub fn is_noop(&self) -> bool {
        self.removed == self.added
    }
}

#[derive(Debug, Clone)]
pub struct ThemeSideEffect {
    palette: Vec<String>,
    applied: Option<String>,
}

impl Default for ThemeSideEffect {
    fn default() -> Self {
        Self::new(["blue", "yellow", "green", "bluegreen"].iter().map(|s| s.to_string()).collect())
    }
}

impl ThemeSideEffect {
    pub fn new(palette: Vec<String>) -> Self {
        Self {
            palette,
            applied: None,
        }
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    /// Class for a section index
    pub fn class_for(&self, index: usize) -> Option<&str> {
        if self.palette.is_empty() {
            return None;
        }
        self.palette.get(index % self.palette.len()).map(String::as_str)
    }

    /// Class currently applied
    pub fn current_class(&self) -> Option<&str> {
        self.applied.as_deref()
    }

    /// Switch to the class for `index`
    pub fn apply(&mut self, index: usize) -> ThemeChange {
        let added = self.class_for(index).map(str::to_string);
        let removed = std::mem::replace(&mut self.applied, added.clone());
        ThemeChange { removed, added }
    }

    /// Remove whatever class is applied
    pub fn clear(&mut self) -> ThemeChange {
        ThemeChange {
            removed: self.applied.take(),
            added: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        let theme = ThemeSideEffect::default();
        assert_eq!(theme.class_for(0), Some("blue"));
        assert_eq!(theme.class_for(3), Some("bluegreen"));
        assert_eq!(theme.class_for(5), Some("yellow"));
    }

    #[test]
    fn test_apply_reports_swap() {
        let mut theme = ThemeSideEffect::default();
        let change = theme.apply(1);
        assert_eq!(change.removed, None);
        assert_eq!(change.added.as_deref(), Some("yellow"));

        let change = theme.apply(2);
        assert_eq!(change.removed.as_deref(), Some("yellow"));
        assert_eq!(change.added.as_deref(), Some("green"));

        assert!(theme.apply(2).is_noop());
        assert!(theme.apply(6).is_noop());
    }

    #[test]
    fn test_empty_palette_applies_nothing() {
        let mut theme = ThemeSideEffect::new(Vec::new());
        assert_eq!(theme.class_for(0), None);
        assert!(theme.apply(0).is_noop());
    }

    #[test]
    fn test_clear() {
        let mut theme = ThemeSideEffect::default();
        theme.apply(0);
        let change = theme.clear();
        assert_eq!(change.removed.as_deref(), Some("blue"));
        assert_eq!(theme.current_class(), None);
    }
}
