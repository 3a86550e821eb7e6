use documented::{Documented, DocumentedFields};
use serde::{Deserialize, Serialize};

use crate::defaults::{self, strings};

/// Text shown in the About section of the page.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct About {
    /// Paragraphs of the introduction, in order.
    pub paragraphs: Option<Vec<String>>,

    /// Topics listed on the "Interests:" line.
    pub interests: Option<Vec<String>>,

    /// Bullet points of the Highlights box.
    pub highlights: Option<Vec<String>>,
}

impl About {
    pub fn default_about() -> Self {
        Self {
            paragraphs: Some(strings(defaults::ABOUT)),
            interests: Some(strings(defaults::INTERESTS)),
            highlights: Some(strings(defaults::HIGHLIGHTS)),
        }
    }

    pub fn resolve(&mut self) {
        self.paragraphs
            .get_or_insert_with(|| strings(defaults::ABOUT));
        self.interests
            .get_or_insert_with(|| strings(defaults::INTERESTS));
        self.highlights
            .get_or_insert_with(|| strings(defaults::HIGHLIGHTS));
    }

    pub fn paragraphs(&self) -> &[String] {
        self.paragraphs.as_deref().unwrap_or_default()
    }

    pub fn interests(&self) -> &[String] {
        self.interests.as_deref().unwrap_or_default()
    }

    pub fn highlights(&self) -> &[String] {
        self.highlights.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_about_keeps_explicit_values() {
        let mut about: About = toml::from_str("highlights = []").unwrap();
        about.resolve();

        assert!(about.highlights().is_empty());
        assert_eq!(about.paragraphs().len(), defaults::ABOUT.len());
        assert_eq!(about.interests()[0], "Innovation");
    }
}
