//! Author model, form validation and view types

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::book::BookView;

/// Date format used for display and form round-trips
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Full author model from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    /// "Family, First", or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            format_date(self.date_of_birth),
            format_date(self.date_of_death)
        )
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Validated data for a new author record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl NewAuthor {
    pub fn into_author(self, id: Uuid) -> Author {
        Author {
            id,
            first_name: self.first_name,
            family_name: self.family_name,
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
        }
    }
}

/// Raw author form as submitted by the browser
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "First name must be specified."),
        custom(
            function = "validate_alphanumeric",
            message = "First name has non-alphanumeric characters"
        )
    )]
    pub first_name: String,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "Family name must be specified"),
        custom(
            function = "validate_alphanumeric",
            message = "Family name has non-alphanumeric characters"
        )
    )]
    pub family_name: String,

    #[serde(default)]
    #[validate(custom(function = "validate_optional_date", message = "Invalid date of birth"))]
    pub date_of_birth: String,

    #[serde(default)]
    #[validate(custom(function = "validate_optional_date", message = "Invalid date of death"))]
    pub date_of_death: String,
}

/// Field order in which errors are reported
const FIELD_ORDER: [&str; 4] = ["first_name", "family_name", "date_of_birth", "date_of_death"];

/// One failed rule on one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub msg: String,
}

impl AuthorForm {
    /// Trim surrounding whitespace from every field
    pub fn sanitized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            family_name: self.family_name.trim().to_string(),
            date_of_birth: self.date_of_birth.trim().to_string(),
            date_of_death: self.date_of_death.trim().to_string(),
        }
    }

    /// Run the field rules in order and convert into a `NewAuthor`.
    ///
    /// Expects an already sanitized form. Each field reports at most its first
    /// failing rule; errors come back in form order.
    pub fn to_new_author(&self) -> Result<NewAuthor, Vec<FieldError>> {
        if let Err(errors) = self.validate() {
            let field_errors = errors.field_errors();
            let mut flattened = Vec::new();
            for field in FIELD_ORDER {
                let first = field_errors
                    .iter()
                    .find(|(name, _)| ***name == *field)
                    .and_then(|(_, errs)| errs.first());
                if let Some(err) = first {
                    flattened.push(FieldError {
                        field: field.to_string(),
                        msg: error_message(field, err),
                    });
                }
            }
            return Err(flattened);
        }

        Ok(NewAuthor {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: parse_optional_date(&self.date_of_birth),
            date_of_death: parse_optional_date(&self.date_of_death),
        })
    }
}

fn error_message(field: &str, err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    let text = match (field, &*err.code) {
        ("first_name", "length") => "First name must be specified.",
        ("first_name", _) => "First name has non-alphanumeric characters",
        ("family_name", "length") => "Family name must be specified",
        ("family_name", _) => "Family name has non-alphanumeric characters",
        ("date_of_birth", _) => "Invalid date of birth",
        _ => "Invalid date of death",
    };
    text.to_string()
}

fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    // Emptiness is reported by the length rule
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

fn validate_optional_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_iso8601_date(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("iso8601"))
    }
}

fn parse_optional_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        None
    } else {
        parse_iso8601_date(value)
    }
}

/// Parse an ISO-8601 calendar date.
///
/// Accepts extended (`1920-01-02`) and basic (`19200102`) dates, timestamps
/// with or without an offset (the time part is dropped), and reduced
/// precision `1920-01` / `1920`, which map to the first day of the period.
pub fn parse_iso8601_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    parse_numeric_date(value)
}

/// `YYYYMMDD`, `YYYY-MM` and `YYYY`
fn parse_numeric_date(value: &str) -> Option<NaiveDate> {
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    let (year, month, day) = match value.len() {
        8 if digits(value) => (&value[..4], &value[4..6], &value[6..]),
        7 if value.as_bytes()[4] == b'-' && digits(&value[..4]) && digits(&value[5..]) => {
            (&value[..4], &value[5..], "01")
        }
        4 if digits(value) => (value, "01", "01"),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Author as exposed to templates
#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub name: String,
    pub url: String,
    pub lifespan: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            name: author.name(),
            url: author.url(),
            lifespan: author.lifespan(),
            date_of_birth: format_date(author.date_of_birth),
            date_of_death: format_date(author.date_of_death),
        }
    }
}

/// An author together with the books referencing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<super::Book>,
}

impl AuthorDetail {
    pub fn has_books(&self) -> bool {
        !self.books.is_empty()
    }

    pub fn book_views(&self) -> Vec<BookView> {
        self.books.iter().map(BookView::from).collect()
    }
}
