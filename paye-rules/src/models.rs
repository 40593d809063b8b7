use serde::Serialize;

/// How prominently a tag is shown on its card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleTag {
    pub label: String,
    pub kind: TagKind,
}

impl RuleTag {
    pub fn primary(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: TagKind::Primary,
        }
    }

    pub fn secondary(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: TagKind::Secondary,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.kind == TagKind::Primary
    }
}

/// A single rule as shown in the library: tags first, then title and text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCard {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub tags: Vec<RuleTag>,
}

impl RuleCard {
    /// Whether any tag on this card matches `label`, ignoring case.
    pub fn has_tag(&self, label: &str) -> bool {
        let wanted = label.trim().to_lowercase();
        self.tags
            .iter()
            .any(|tag| tag.label.to_lowercase() == wanted)
    }
}
