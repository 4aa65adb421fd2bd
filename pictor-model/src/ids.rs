use crate::error::ModelError;
use chrono::NaiveDate;
use uuid::Uuid;

/// Strongly typed ID for photos
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhotoID(pub Uuid);

impl Default for PhotoID {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoID {
    pub fn new() -> Self {
        PhotoID(Uuid::now_v7())
    }

    pub fn from_string(id: String) -> Result<Self, ModelError> {
        if id.is_empty() {
            return Err(ModelError::InvalidPhoto(
                "Photo ID cannot be empty".to_string(),
            ));
        }
        id.parse()
            .map(PhotoID)
            .map_err(|e| ModelError::InvalidPhoto(e.to_string()))
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for PhotoID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for PhotoID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for tags
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagID(pub Uuid);

impl Default for TagID {
    fn default() -> Self {
        Self::new()
    }
}

impl TagID {
    pub fn new() -> Self {
        TagID(Uuid::now_v7())
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for TagID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TagID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for photo sections.
///
/// Sections group photos by capture day, so the ID is the day key itself
/// (`YYYY-MM-DD`). Keeping the key human-readable makes section order a plain
/// lexicographic sort and keeps server and client keys identical.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionID(pub String);

impl SectionID {
    /// Build the section ID for a capture day.
    pub fn for_day(day: NaiveDate) -> Self {
        SectionID(day.format("%Y-%m-%d").to_string())
    }

    /// Parse and validate a day-key string.
    pub fn from_string(id: String) -> Result<Self, ModelError> {
        if id.is_empty() {
            return Err(ModelError::InvalidSection(
                "Section ID cannot be empty".to_string(),
            ));
        }
        NaiveDate::parse_from_str(&id, "%Y-%m-%d")
            .map_err(|e| ModelError::InvalidSection(e.to_string()))?;
        Ok(SectionID(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectionID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
