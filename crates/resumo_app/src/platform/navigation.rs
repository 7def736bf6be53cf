use resumo_core::SITE_ROOT;

/// Visited locations, oldest first. The current page is the last entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl Default for History {
    fn default() -> Self {
        Self {
            entries: vec![SITE_ROOT.to_string()],
        }
    }
}

impl History {
    pub fn current(&self) -> &str {
        self.entries.last().map(String::as_str).unwrap_or(SITE_ROOT)
    }

    /// The page that led to the current one.
    pub fn referrer(&self) -> Option<&str> {
        self.entries
            .len()
            .checked_sub(2)
            .and_then(|index| self.entries.get(index))
            .map(String::as_str)
    }

    pub fn push(&mut self, location: impl Into<String>) {
        self.entries.push(location.into());
    }

    /// Leaves the current page; returns the one now showing, or `None` when
    /// there is nothing to go back to.
    pub fn back(&mut self) -> Option<&str> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop();
        Some(self.current())
    }
}

/// True for locations the summary page is served under.
pub fn is_summary_location(location: &str) -> bool {
    let path = match location.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or(SITE_ROOT, |slash| &rest[slash..]),
        None => location,
    };
    path.split(['?', '#']).next().unwrap_or(path) != SITE_ROOT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_root_without_referrer() {
        let history = History::default();
        assert_eq!(history.current(), "/");
        assert_eq!(history.referrer(), None);
    }

    #[test]
    fn push_sets_referrer_and_back_returns_it() {
        let mut history = History::default();
        history.push("/resumo");
        assert_eq!(history.referrer(), Some("/"));

        assert_eq!(history.back(), Some("/"));
        assert_eq!(history.current(), "/");
        assert_eq!(history.back(), None);
    }

    #[test]
    fn summary_locations() {
        assert!(is_summary_location("/resumo"));
        assert!(is_summary_location("http://127.0.0.1:5000/resumo/42"));
        assert!(!is_summary_location("/"));
        assert!(!is_summary_location("/?lang=pt"));
        assert!(!is_summary_location("http://127.0.0.1:5000/"));
    }
}
