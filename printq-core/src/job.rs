//! Print job description

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Kind of material a job prints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Category {
    Newspaper,
    Magazine,
    Advertisement,
}

/// Urgency the print processor should give a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Category {
    /// Wire code understood by the print processor
    pub fn code(&self) -> i64 {
        match self {
            Category::Newspaper => 1,
            Category::Magazine => 2,
            Category::Advertisement => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Newspaper => "Newspaper",
            Category::Magazine => "Magazine/Book",
            Category::Advertisement => "Advertisement",
        }
    }

    pub fn all() -> &'static [Category] {
        &[Category::Newspaper, Category::Magazine, Category::Advertisement]
    }
}

impl Priority {
    /// Wire code understood by the print processor
    pub fn code(&self) -> i64 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn all() -> &'static [Priority] {
        &[Priority::High, Priority::Medium, Priority::Low]
    }
}

impl TryFrom<i64> for Category {
    type Error = ValidationError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Category::Newspaper),
            2 => Ok(Category::Magazine),
            3 => Ok(Category::Advertisement),
            _ => Err(ValidationError::UnknownCode {
                field: "category",
                value: code,
            }),
        }
    }
}

impl TryFrom<i64> for Priority {
    type Error = ValidationError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Priority::High),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::Low),
            _ => Err(ValidationError::UnknownCode {
                field: "priority",
                value: code,
            }),
        }
    }
}

impl From<Category> for i64 {
    fn from(category: Category) -> Self {
        category.code()
    }
}

impl From<Priority> for i64 {
    fn from(priority: Priority) -> Self {
        priority.code()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Accepts a bare code ("2") or a labelled choice ("2 - Magazine/Book")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = leading_code(s, "category")?;
        Category::try_from(code)
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = leading_code(s, "priority")?;
        Priority::try_from(code)
    }
}

/// One print job, as handed to the print processor
///
/// Records are immutable once built. `job_id` is not required to be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobRecord {
    job_id: i32,
    pages: i32,
    category: Category,
    priority: Priority,
}

impl JobRecord {
    pub fn new(job_id: i32, pages: i32, category: Category, priority: Priority) -> Self {
        Self {
            job_id,
            pages,
            category,
            priority,
        }
    }

    /// Build a record from raw operator-entered text.
    ///
    /// Every field is trimmed and must be present. `job_id` and `pages` must
    /// parse as integers; `category` and `priority` must start with one of the
    /// codes 1, 2 or 3.
    pub fn parse(
        job_id: &str,
        pages: &str,
        category: &str,
        priority: &str,
    ) -> Result<Self, ValidationError> {
        let job_id = parse_int(job_id, "job_id")?;
        let pages = parse_int(pages, "pages")?;
        let category = category.parse::<Category>()?;
        let priority = priority.parse::<Priority>()?;

        Ok(Self::new(job_id, pages, category, priority))
    }

    pub fn job_id(&self) -> i32 {
        self.job_id
    }

    pub fn pages(&self) -> i32 {
        self.pages
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }
}

impl fmt::Display for JobRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID:{} | Pages:{} | Type:{} | Priority:{}",
            self.job_id, self.pages, self.category, self.priority
        )
    }
}

fn parse_int(raw: &str, field: &'static str) -> Result<i32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }

    trimmed
        .parse::<i32>()
        .map_err(|_| ValidationError::NotAnInteger {
            field,
            value: trimmed.to_string(),
        })
}

fn leading_code(raw: &str, field: &'static str) -> Result<i64, ValidationError> {
    let Some(token) = raw.split_whitespace().next() else {
        return Err(ValidationError::MissingField { field });
    };

    token.parse::<i64>().map_err(|_| ValidationError::NotAnInteger {
        field,
        value: token.to_string(),
    })
}
