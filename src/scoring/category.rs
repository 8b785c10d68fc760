use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quality label derived from a score total.
///
/// Boundaries are inclusive upper bounds: `<= 2` grunt, `<= 4` minimal,
/// `<= 6` adequate, `<= 8` solid, anything higher excellent. Every place a
/// category is derived from a number goes through [`Category::from_total`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Grunt,
    Minimal,
    Adequate,
    Solid,
    Excellent,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Grunt,
        Category::Minimal,
        Category::Adequate,
        Category::Solid,
        Category::Excellent,
    ];

    pub fn from_total(total: f64) -> Self {
        if total <= 2.0 {
            Self::Grunt
        } else if total <= 4.0 {
            Self::Minimal
        } else if total <= 6.0 {
            Self::Adequate
        } else if total <= 8.0 {
            Self::Solid
        } else {
            Self::Excellent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grunt => "grunt",
            Self::Minimal => "minimal",
            Self::Adequate => "adequate",
            Self::Solid => "solid",
            Self::Excellent => "excellent",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grunt" => Ok(Self::Grunt),
            "minimal" => Ok(Self::Minimal),
            "adequate" => Ok(Self::Adequate),
            "solid" => Ok(Self::Solid),
            "excellent" => Ok(Self::Excellent),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}
