//! Conversions between stored sliders and their DTOs.

use super::types::{Slider, SliderDto};

pub fn to_dto(slider: Slider) -> SliderDto {
    SliderDto {
        id: slider.id,
        presentation: slider.presentation,
        user: slider.user,
    }
}

pub fn to_entity(dto: SliderDto) -> Slider {
    Slider {
        id: dto.id,
        presentation: dto.presentation,
        user_id: dto.user.as_ref().map(|u| u.id),
        user: dto.user,
    }
}

/// Overwrite the fields of `existing` that are present in `patch`; absent fields are kept.
pub fn partial_update(existing: &mut Slider, patch: &SliderDto) {
    if let Some(presentation) = &patch.presentation {
        existing.presentation = Some(presentation.clone());
    }
    if let Some(user) = &patch.user {
        existing.user_id = Some(user.id);
        existing.user = Some(user.clone());
    }
}
