use std::sync::Arc;

use crate::errors::{AppError, BadRequestAlert};
use crate::models::pagination::PageRequest;
use crate::models::slider::{ENTITY_NAME, SliderCriteria, SliderDto, SliderRepository, mapper};
use crate::models::user::{UserRef, UserRepository};

/// Slider use cases shared by the REST resource and the HTML pages.
#[derive(Clone)]
pub struct SliderService {
    sliders: Arc<dyn SliderRepository>,
    users: Arc<dyn UserRepository>,
}

impl SliderService {
    pub fn new(sliders: Arc<dyn SliderRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { sliders, users }
    }

    /// Resolve the referenced user to its stored id and login.
    async fn resolve_user(&self, user: Option<&UserRef>) -> Result<Option<UserRef>, AppError> {
        let Some(user) = user else {
            return Ok(None);
        };
        match self.users.find_ref(user.id).await? {
            Some(found) => Ok(Some(found)),
            None => Err(BadRequestAlert::new("User not found", ENTITY_NAME, "usernotfound").into()),
        }
    }

    /// Persist a new slider. Any id on the DTO is ignored; callers reject it first.
    pub async fn save(&self, dto: SliderDto) -> Result<SliderDto, AppError> {
        log::debug!("Request to save Slider : {dto:?}");
        let user = self.resolve_user(dto.user.as_ref()).await?;
        let entity = mapper::to_entity(SliderDto { id: None, user, ..dto });
        let id = self.sliders.insert(&entity).await?;
        self.find_one(id).await?.ok_or(AppError::NotFound)
    }

    /// Replace every field of an existing slider. `None` when it does not exist.
    pub async fn update(&self, dto: SliderDto) -> Result<Option<SliderDto>, AppError> {
        log::debug!("Request to update Slider : {dto:?}");
        let Some(id) = dto.id else {
            return Ok(None);
        };
        let user = self.resolve_user(dto.user.as_ref()).await?;
        let entity = mapper::to_entity(SliderDto { user, ..dto });
        if !self.sliders.update(&entity).await? {
            return Ok(None);
        }
        self.find_one(id).await
    }

    /// Update only the fields present in `dto`. `None` when the slider does not exist.
    pub async fn partial_update(&self, dto: SliderDto) -> Result<Option<SliderDto>, AppError> {
        log::debug!("Request to partially update Slider : {dto:?}");
        let Some(id) = dto.id else {
            return Ok(None);
        };
        let Some(mut existing) = self.sliders.find_by_id(id).await? else {
            return Ok(None);
        };
        let user = self.resolve_user(dto.user.as_ref()).await?;
        mapper::partial_update(&mut existing, &SliderDto { user, ..dto });
        if !self.sliders.update(&existing).await? {
            return Ok(None);
        }
        self.find_one(id).await
    }

    pub async fn find_by_criteria(&self, criteria: &SliderCriteria, page: &PageRequest) -> Result<Vec<SliderDto>, AppError> {
        log::debug!("Request to get all Sliders by Criteria: {criteria:?}");
        let rows = self.sliders.find_by_criteria(criteria, page).await?;
        Ok(rows.into_iter().map(mapper::to_dto).collect())
    }

    pub async fn count_by_criteria(&self, criteria: &SliderCriteria) -> Result<i64, AppError> {
        log::debug!("Request to get the count of all Sliders by Criteria");
        if criteria.is_empty() {
            return self.count_all().await;
        }
        Ok(self.sliders.count_by_criteria(criteria).await?)
    }

    pub async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.sliders.count().await?)
    }

    pub async fn find_one(&self, id: i64) -> Result<Option<SliderDto>, AppError> {
        log::debug!("Request to get Slider : {id}");
        Ok(self.sliders.find_by_id(id).await?.map(mapper::to_dto))
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.sliders.exists_by_id(id).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        log::debug!("Request to delete Slider : {id}");
        Ok(self.sliders.delete_by_id(id).await?)
    }

    /// Candidates for the slider's user relationship.
    pub async fn user_options(&self) -> Result<Vec<UserRef>, AppError> {
        Ok(self.users.find_all_refs().await?)
    }
}
