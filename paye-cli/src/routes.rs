use std::fmt;

/// The three views and their paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    RuleLibrary,
    TaxCalculator,
    Status,
}

impl Route {
    pub const ALL: [Route; 3] = [Self::RuleLibrary, Self::TaxCalculator, Self::Status];

    /// Path segment, also used as the CLI subcommand name.
    pub fn path(&self) -> &'static str {
        match self {
            Self::RuleLibrary => "rule-library",
            Self::TaxCalculator => "tax-calculator",
            Self::Status => "status",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::RuleLibrary => "Rule Library",
            Self::TaxCalculator => "Tax Calculator",
            Self::Status => "Your Tax Status",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.path())
    }
}
