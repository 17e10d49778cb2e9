use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// A course whose questions live in their own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ComputerApplications,
    BusinessLaw,
    ManagerialFinance,
    DatabaseManagement,
    BusinessAnalytics,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 5] = [
        Category::ComputerApplications,
        Category::BusinessLaw,
        Category::ManagerialFinance,
        Category::DatabaseManagement,
        Category::BusinessAnalytics,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::ComputerApplications => "Computer Applications",
            Category::BusinessLaw => "Business Law",
            Category::ManagerialFinance => "Managerial Finance",
            Category::DatabaseManagement => "Database Management",
            Category::BusinessAnalytics => "Business Analytics",
        }
    }

    /// Storage key, also used verbatim as the SQL table name.
    ///
    /// This is the only source of table identifiers in the crate.
    pub fn table(self) -> &'static str {
        match self {
            Category::ComputerApplications => "computer_applications",
            Category::BusinessLaw => "business_law",
            Category::ManagerialFinance => "managerial_finance",
            Category::DatabaseManagement => "database_management",
            Category::BusinessAnalytics => "business_analytics",
        }
    }

    /// Look up a category by its storage key.
    pub fn from_table(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.table() == key)
    }
}

/// Lowercase, spaces to underscores.
pub fn storage_key(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts a display name or a storage key, in any case.
impl FromStr for Category {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_table(&storage_key(s)).ok_or_else(|| QuizError::UnknownCategory(s.to_string()))
    }
}
