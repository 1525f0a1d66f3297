pub mod criteria;
pub mod mapper;
pub mod memory;
pub mod queries;
pub mod types;

use async_trait::async_trait;

use crate::models::pagination::{PageRequest, SortDir};

pub use criteria::{CriteriaError, LongFilter, SliderCriteria, SqlParam, StringFilter};
pub use memory::MemorySliderRepository;
pub use queries::PgSliderRepository;
pub use types::*;

pub const ENTITY_NAME: &str = "slider";

/// Storage seam for sliders. Reads return the owning user joined in.
#[async_trait]
pub trait SliderRepository: Send + Sync {
    async fn find_by_criteria(&self, criteria: &SliderCriteria, page: &PageRequest) -> Result<Vec<Slider>, sqlx::Error>;
    async fn count_by_criteria(&self, criteria: &SliderCriteria) -> Result<i64, sqlx::Error>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Slider>, sqlx::Error>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, sqlx::Error>;
    /// Insert a new row and return its assigned id. Any id on `slider` is ignored.
    async fn insert(&self, slider: &Slider) -> Result<i64, sqlx::Error>;
    /// Overwrite the row with `slider.id`. Returns false when no such row exists.
    async fn update(&self, slider: &Slider) -> Result<bool, sqlx::Error>;
    async fn delete_by_id(&self, id: i64) -> Result<(), sqlx::Error>;
    async fn count(&self) -> Result<i64, sqlx::Error>;
}

/// Columns a slider collection may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Presentation,
    UserId,
}

impl SortField {
    pub fn parse(property: &str) -> Option<Self> {
        match property {
            "id" => Some(SortField::Id),
            "presentation" => Some(SortField::Presentation),
            "user" | "user.id" | "userId" => Some(SortField::UserId),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "s.id",
            SortField::Presentation => "s.presentation",
            SortField::UserId => "s.user_id",
        }
    }
}

/// Known sort orders of a page request, with `id` appended as a tiebreaker so
/// paging is stable.
pub fn sort_fields(page: &PageRequest) -> Vec<(SortField, SortDir)> {
    let mut fields: Vec<(SortField, SortDir)> = page
        .sort
        .iter()
        .filter_map(|o| SortField::parse(&o.property).map(|f| (f, o.dir)))
        .collect();
    if !fields.iter().any(|(f, _)| *f == SortField::Id) {
        fields.push((SortField::Id, SortDir::Asc));
    }
    fields
}
