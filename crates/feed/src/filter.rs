/// Keyword filter over the vessel classification field.
///
/// A report passes when its trimmed classification contains any configured
/// keyword as a substring. Matching is case-sensitive on purpose: the site
/// spells its category labels consistently, and the keywords mirror those
/// labels exactly.
#[derive(Debug, Clone)]
pub struct VesselFilter {
    keywords: Vec<String>,
}

impl Default for VesselFilter {
    fn default() -> Self {
        Self {
            keywords: vec!["Fiske-/ fangstfartøy".to_string()],
        }
    }
}

impl VesselFilter {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    pub fn matches(&self, classification: &str) -> bool {
        let classification = classification.trim();
        if classification.is_empty() {
            return false;
        }
        self.keywords
            .iter()
            .any(|keyword| classification.contains(keyword.as_str()))
    }
}
