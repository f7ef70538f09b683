//! Equipment records and their input validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reservation::{UserId, ValidationError};

/// Accepted equipment name length, in characters, after trimming.
pub const NAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=50;

/// Accepted description length, in characters, after trimming.
pub const DESCRIPTION_LENGTH: std::ops::RangeInclusive<usize> = 3..=150;

/// Accepted category name length, in characters, after trimming.
pub const CATEGORY_LENGTH: std::ops::RangeInclusive<usize> = 3..=20;

/// Description stored when none is given.
pub const DEFAULT_DESCRIPTION: &str = "-";

/// Identifier of a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EquipmentId(i64);

impl EquipmentId {
    /// Wraps a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable item in the club inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Row id.
    pub id: EquipmentId,
    /// Display name, first letter capitalized.
    pub name: String,
    /// Weight in kilograms.
    pub weight_kg: f64,
    /// Free-form description.
    pub description: String,
    /// Category names, title-cased and sorted.
    pub categories: Vec<String>,
    /// The member currently holding the item, if any.
    pub holder: Option<UserId>,
}

/// Validated input for creating equipment.
///
/// # Examples
///
/// ```
/// use kitbook::NewEquipment;
///
/// let tent = NewEquipment::new("  two-person TENT ", 2.4)
///     .description("Green, with footprint")
///     .category("shelter")
///     .category("Shelter")
///     .validate()
///     .unwrap();
///
/// assert_eq!(tent.name, "Two-person tent");
/// assert_eq!(tent.categories, vec!["Shelter".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewEquipment {
    /// Display name.
    pub name: String,
    /// Weight in kilograms.
    pub weight_kg: f64,
    /// Free-form description.
    pub description: String,
    /// Category names.
    pub categories: Vec<String>,
    /// Initial holder.
    pub holder: Option<UserId>,
}

impl NewEquipment {
    /// Starts a new equipment record with the default description and no
    /// categories.
    #[must_use]
    pub fn new(name: impl Into<String>, weight_kg: f64) -> Self {
        Self {
            name: name.into(),
            weight_kg,
            description: DEFAULT_DESCRIPTION.to_string(),
            categories: Vec::new(),
            holder: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a category name.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Sets the initial holder.
    #[must_use]
    pub fn holder(mut self, holder: Option<UserId>) -> Self {
        self.holder = holder;
        self
    }

    /// Checks every field and returns the normalized record.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first field out of bounds.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let name = self.name.trim();
        check_length("name", name, &NAME_LENGTH)?;

        if !self.weight_kg.is_finite() || self.weight_kg < 0.0 {
            return Err(ValidationError {
                field: "weight_kg".into(),
                message: format!("weight must be a non-negative number, got {}", self.weight_kg),
            });
        }

        let description = self.description.trim();
        if description != DEFAULT_DESCRIPTION {
            check_length("description", description, &DESCRIPTION_LENGTH)?;
        }

        let categories = normalize_categories(&self.categories)?;

        Ok(Self {
            name: capitalize(name),
            weight_kg: self.weight_kg,
            description: description.to_string(),
            categories,
            holder: self.holder,
        })
    }
}

/// Field edits for an existing piece of equipment.
///
/// Fields left unset keep their stored value. Categories, when given,
/// replace the stored set; an empty list clears it. The holder is changed
/// separately.
///
/// # Examples
///
/// ```
/// use kitbook::equipment::EquipmentChanges;
///
/// let changes = EquipmentChanges::default().weight_kg(2.1).categories(["shelter"]);
/// assert!(!changes.is_empty());
/// assert!(EquipmentChanges::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentChanges {
    /// New display name.
    pub name: Option<String>,
    /// New weight in kilograms.
    pub weight_kg: Option<f64>,
    /// New description.
    pub description: Option<String>,
    /// Replacement category names.
    pub categories: Option<Vec<String>>,
}

impl EquipmentChanges {
    /// Sets a new name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a new weight.
    #[must_use]
    pub const fn weight_kg(mut self, weight_kg: f64) -> Self {
        self.weight_kg = Some(weight_kg);
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the categories.
    #[must_use]
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// True when no field is changed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.weight_kg.is_none()
            && self.description.is_none()
            && self.categories.is_none()
    }

    /// Applies the edits on top of `current`.
    ///
    /// The result still has to pass [`NewEquipment::validate`].
    #[must_use]
    pub fn apply(self, current: &Equipment) -> NewEquipment {
        NewEquipment {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            weight_kg: self.weight_kg.unwrap_or(current.weight_kg),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            categories: self
                .categories
                .unwrap_or_else(|| current.categories.clone()),
            holder: current.holder.clone(),
        }
    }
}

fn check_length(
    field: &str,
    value: &str,
    bounds: &std::ops::RangeInclusive<usize>,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if bounds.contains(&len) {
        Ok(())
    } else {
        Err(ValidationError {
            field: field.into(),
            message: format!(
                "must be between {} and {} characters, got {len}",
                bounds.start(),
                bounds.end()
            ),
        })
    }
}

/// Title-cases, sorts and de-duplicates category names.
///
/// # Errors
///
/// Returns an error if any trimmed name is outside [`CATEGORY_LENGTH`].
pub fn normalize_categories(categories: &[String]) -> Result<Vec<String>, ValidationError> {
    let mut normalized = Vec::with_capacity(categories.len());
    for category in categories {
        let trimmed = category.trim();
        check_length("category", trimmed, &CATEGORY_LENGTH)?;
        normalized.push(title_case(trimmed));
    }
    normalized.sort();
    normalized.dedup();
    Ok(normalized)
}

/// Upper-cases the first character and lower-cases the rest.
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Upper-cases the first letter of every word, lower-cases the rest.
///
/// A word starts after any non-alphabetic character, so "ice-axe" becomes
/// "Ice-Axe".
#[must_use]
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
