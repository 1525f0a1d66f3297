use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::pagination::{PageRequest, SortDir};
use crate::models::user::UserRepository;
use super::criteria::SliderCriteria;
use super::types::Slider;
use super::{SliderRepository, SortField, sort_fields};

#[derive(Default)]
struct Sliders {
    next_id: i64,
    rows: BTreeMap<i64, StoredSlider>,
}

#[derive(Clone)]
struct StoredSlider {
    presentation: Option<String>,
    user_id: Option<i64>,
}

/// Process-local slider store. Reads join the user from `users`, the way the
/// SQL repository left-joins `app_user`.
pub struct MemorySliderRepository {
    inner: RwLock<Sliders>,
    users: Arc<dyn UserRepository>,
}

impl MemorySliderRepository {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { inner: RwLock::new(Sliders::default()), users }
    }

    async fn hydrate(&self, id: i64, stored: StoredSlider) -> Result<Slider, sqlx::Error> {
        let user = match stored.user_id {
            Some(uid) => self.users.find_ref(uid).await?,
            None => None,
        };
        Ok(Slider {
            id: Some(id),
            presentation: stored.presentation,
            user_id: stored.user_id,
            user,
        })
    }

    /// Filtered and sorted snapshot of every row.
    async fn select(&self, criteria: &SliderCriteria, page: &PageRequest) -> Result<Vec<Slider>, sqlx::Error> {
        let snapshot: Vec<(i64, StoredSlider)> = {
            let sliders = self.inner.read().await;
            sliders.rows.iter().map(|(id, s)| (*id, s.clone())).collect()
        };
        let mut rows = Vec::with_capacity(snapshot.len());
        for (id, stored) in snapshot {
            let slider = self.hydrate(id, stored).await?;
            if criteria.matches(&slider) {
                rows.push(slider);
            }
        }
        let order = sort_fields(page);
        rows.sort_by(|a, b| {
            order
                .iter()
                .map(|(field, dir)| compare(a, b, *field, *dir))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
        Ok(rows)
    }
}

/// Postgres ordering: NULLs sort last ascending and first descending.
fn compare_nullable<T: Ord>(a: Option<T>, b: Option<T>, dir: SortDir) -> Ordering {
    let asc = match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    };
    match dir {
        SortDir::Asc => asc,
        SortDir::Desc => asc.reverse(),
    }
}

fn compare(a: &Slider, b: &Slider, field: SortField, dir: SortDir) -> Ordering {
    match field {
        SortField::Id => compare_nullable(a.id, b.id, dir),
        SortField::Presentation => compare_nullable(a.presentation.as_deref(), b.presentation.as_deref(), dir),
        SortField::UserId => compare_nullable(a.user_id, b.user_id, dir),
    }
}

#[async_trait]
impl SliderRepository for MemorySliderRepository {
    async fn find_by_criteria(&self, criteria: &SliderCriteria, page: &PageRequest) -> Result<Vec<Slider>, sqlx::Error> {
        let rows = self.select(criteria, page).await?;
        Ok(rows
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.size).unwrap_or(0))
            .collect())
    }

    async fn count_by_criteria(&self, criteria: &SliderCriteria) -> Result<i64, sqlx::Error> {
        let rows = self.select(criteria, &PageRequest::default()).await?;
        Ok(rows.len() as i64)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Slider>, sqlx::Error> {
        let stored = self.inner.read().await.rows.get(&id).cloned();
        match stored {
            Some(s) => Ok(Some(self.hydrate(id, s).await?)),
            None => Ok(None),
        }
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, sqlx::Error> {
        Ok(self.inner.read().await.rows.contains_key(&id))
    }

    async fn insert(&self, slider: &Slider) -> Result<i64, sqlx::Error> {
        let mut sliders = self.inner.write().await;
        sliders.next_id += 1;
        let id = sliders.next_id;
        sliders.rows.insert(
            id,
            StoredSlider { presentation: slider.presentation.clone(), user_id: slider.user_id },
        );
        Ok(id)
    }

    async fn update(&self, slider: &Slider) -> Result<bool, sqlx::Error> {
        let Some(id) = slider.id else {
            return Ok(false);
        };
        let mut sliders = self.inner.write().await;
        match sliders.rows.get_mut(&id) {
            Some(stored) => {
                stored.presentation = slider.presentation.clone();
                stored.user_id = slider.user_id;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), sqlx::Error> {
        self.inner.write().await.rows.remove(&id);
        Ok(())
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        Ok(self.inner.read().await.rows.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pagination::SortOrder;
    use crate::models::user::{MemoryUserRepository, NewUser, ROLE_USER};

    async fn repo_with_user() -> (MemorySliderRepository, i64) {
        let users = Arc::new(MemoryUserRepository::new());
        let uid = users
            .create(&NewUser {
                login: "W".to_string(),
                password_hash: "x".to_string(),
                authorities: vec![ROLE_USER.to_string()],
            })
            .await
            .unwrap();
        (MemorySliderRepository::new(users), uid)
    }

    fn slider(presentation: &str, user_id: Option<i64>) -> Slider {
        Slider {
            id: None,
            presentation: Some(presentation.to_string()),
            user_id,
            user: None,
        }
    }

    #[tokio::test]
    async fn reads_join_the_user_login() {
        let (repo, uid) = repo_with_user().await;
        let id = repo.insert(&slider("trop membre de l'équipe", Some(uid))).await.unwrap();
        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.id, Some(id));
        assert_eq!(found.user.unwrap().login, "W");
    }

    #[tokio::test]
    async fn pages_follow_requested_sort() {
        let (repo, _) = repo_with_user().await;
        for p in ["b", "c", "a"] {
            repo.insert(&slider(p, None)).await.unwrap();
        }
        let page = PageRequest {
            page: 0,
            size: 2,
            sort: vec![SortOrder { property: "presentation".into(), dir: SortDir::Desc }],
        };
        let rows = repo.find_by_criteria(&SliderCriteria::default(), &page).await.unwrap();
        let texts: Vec<_> = rows.iter().map(|s| s.presentation.clone().unwrap()).collect();
        assert_eq!(texts, vec!["c", "b"]);

        let second = PageRequest { page: 1, ..page };
        let rows = repo.find_by_criteria(&SliderCriteria::default(), &second).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].presentation.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn update_of_missing_row_reports_false() {
        let (repo, _) = repo_with_user().await;
        let mut s = slider("x", None);
        s.id = Some(99);
        assert!(!repo.update(&s).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
