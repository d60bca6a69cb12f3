//! In-memory profiles, services and portfolio items.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::foundation::{
    DomainError, ErrorCode, PortfolioItemId, ProfileId, ServiceId, UserId,
};
use crate::domain::professional::{sort_for_display, PortfolioItem, ProfessionalProfile, Service};
use crate::ports::{PortfolioRepository, ProfileRepository, ServiceRepository};

#[derive(Default)]
struct Tables {
    profiles: HashMap<ProfileId, ProfessionalProfile>,
    services: HashMap<ServiceId, Service>,
    portfolio: HashMap<PortfolioItemId, PortfolioItem>,
}

/// Implements all three professional repositories over one set of tables,
/// so deleting a profile can cascade like the database does.
#[derive(Default)]
pub struct InMemoryProfessionalStore {
    tables: Mutex<Tables>,
}

impl InMemoryProfessionalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DomainError> {
        self.tables.lock().map_err(|_| {
            DomainError::new(ErrorCode::InternalError, "professional store lock poisoned")
        })
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfessionalStore {
    async fn insert_profile(&self, profile: &ProfessionalProfile) -> Result<(), DomainError> {
        let mut t = self.lock()?;
        if t.profiles.values().any(|p| p.owner == profile.owner) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Professional profile already exists",
            ));
        }
        t.profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn update_profile(&self, profile: &ProfessionalProfile) -> Result<(), DomainError> {
        let mut t = self.lock()?;
        match t.profiles.get_mut(&profile.id) {
            Some(existing) => {
                *existing = profile.clone();
                Ok(())
            }
            None => Err(DomainError::not_found("Professional profile")),
        }
    }

    async fn find_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<ProfessionalProfile>, DomainError> {
        Ok(self
            .lock()?
            .profiles
            .values()
            .find(|p| &p.owner == owner)
            .cloned())
    }

    async fn find_profile(&self, id: ProfileId) -> Result<Option<ProfessionalProfile>, DomainError> {
        Ok(self.lock()?.profiles.get(&id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<ProfessionalProfile>, DomainError> {
        Ok(self.lock()?.profiles.values().cloned().collect())
    }

    async fn delete_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Option<(ProfessionalProfile, Vec<PortfolioItem>)>, DomainError> {
        let mut t = self.lock()?;
        let id = match t.profiles.values().find(|p| &p.owner == owner) {
            Some(p) => p.id,
            None => return Ok(None),
        };
        let profile = t.profiles.remove(&id);
        t.services.retain(|_, s| s.profile_id != id);
        let mut removed = Vec::new();
        t.portfolio.retain(|_, item| {
            if item.profile_id == id {
                removed.push(item.clone());
                false
            } else {
                true
            }
        });
        Ok(profile.map(|p| (p, removed)))
    }
}

#[async_trait]
impl ServiceRepository for InMemoryProfessionalStore {
    async fn insert_service(&self, service: &Service) -> Result<(), DomainError> {
        self.lock()?.services.insert(service.id, service.clone());
        Ok(())
    }

    async fn update_service(&self, service: &Service) -> Result<(), DomainError> {
        let mut t = self.lock()?;
        if !t.services.contains_key(&service.id) {
            return Err(DomainError::not_found("Service"));
        }
        t.services.insert(service.id, service.clone());
        Ok(())
    }

    async fn find_service(&self, id: ServiceId) -> Result<Option<Service>, DomainError> {
        Ok(self.lock()?.services.get(&id).cloned())
    }

    async fn list_services(&self, profile: ProfileId) -> Result<Vec<Service>, DomainError> {
        let mut services: Vec<Service> = self
            .lock()?
            .services
            .values()
            .filter(|s| s.profile_id == profile)
            .cloned()
            .collect();
        services.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(services)
    }

    async fn delete_service(&self, id: ServiceId) -> Result<bool, DomainError> {
        Ok(self.lock()?.services.remove(&id).is_some())
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryProfessionalStore {
    async fn insert_item(&self, item: &PortfolioItem) -> Result<(), DomainError> {
        self.lock()?.portfolio.insert(item.id, item.clone());
        Ok(())
    }

    async fn update_item(&self, item: &PortfolioItem) -> Result<(), DomainError> {
        let mut t = self.lock()?;
        if !t.portfolio.contains_key(&item.id) {
            return Err(DomainError::not_found("Portfolio item"));
        }
        t.portfolio.insert(item.id, item.clone());
        Ok(())
    }

    async fn find_item(&self, id: PortfolioItemId) -> Result<Option<PortfolioItem>, DomainError> {
        Ok(self.lock()?.portfolio.get(&id).cloned())
    }

    async fn list_items(&self, profile: ProfileId) -> Result<Vec<PortfolioItem>, DomainError> {
        let mut items: Vec<PortfolioItem> = self
            .lock()?
            .portfolio
            .values()
            .filter(|i| i.profile_id == profile)
            .cloned()
            .collect();
        sort_for_display(&mut items);
        Ok(items)
    }

    async fn delete_item(&self, id: PortfolioItemId) -> Result<bool, DomainError> {
        Ok(self.lock()?.portfolio.remove(&id).is_some())
    }
}
