//! CRUD for the services on the caller's profile.

use std::sync::Arc;

use super::own_profile;
use crate::domain::foundation::{DomainError, ProfileId, ServiceId, Timestamp, UserId};
use crate::domain::professional::{Service, ServiceDraft, ServiceInput};
use crate::ports::{ProfileRepository, ServiceRepository};

#[derive(Debug, Clone)]
pub struct SaveServiceCommand {
    pub owner: UserId,
    /// `None` creates a new service.
    pub service_id: Option<ServiceId>,
    pub input: ServiceInput,
}

pub struct ManageServicesHandler {
    profiles: Arc<dyn ProfileRepository>,
    services: Arc<dyn ServiceRepository>,
}

impl ManageServicesHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, services: Arc<dyn ServiceRepository>) -> Self {
        Self { profiles, services }
    }

    pub async fn list(&self, owner: &UserId) -> Result<Vec<Service>, DomainError> {
        let profile = own_profile(self.profiles.as_ref(), owner).await?;
        self.services.list_services(profile.id).await
    }

    pub async fn save(&self, cmd: SaveServiceCommand) -> Result<Service, DomainError> {
        let draft = ServiceDraft::new(cmd.input)?;
        let profile = own_profile(self.profiles.as_ref(), &cmd.owner).await?;
        let now = Timestamp::now();

        match cmd.service_id {
            None => {
                let service = Service::create(profile.id, draft, now);
                self.services.insert_service(&service).await?;
                tracing::info!(service_id = %service.id, user = %cmd.owner, "service created");
                Ok(service)
            }
            Some(id) => {
                let mut service = self.owned(profile.id, id).await?;
                service.apply(draft, now);
                self.services.update_service(&service).await?;
                tracing::info!(service_id = %id, user = %cmd.owner, "service updated");
                Ok(service)
            }
        }
    }

    pub async fn delete(&self, owner: &UserId, id: ServiceId) -> Result<(), DomainError> {
        let profile = own_profile(self.profiles.as_ref(), owner).await?;
        self.owned(profile.id, id).await?;
        self.services.delete_service(id).await?;
        tracing::info!(service_id = %id, user = %owner, "service deleted");
        Ok(())
    }

    async fn owned(&self, profile: ProfileId, id: ServiceId) -> Result<Service, DomainError> {
        self.services
            .find_service(id)
            .await?
            .filter(|s| s.profile_id == profile)
            .ok_or_else(|| DomainError::not_found("Service"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfessionalStore;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::professional::{ProfessionalProfile, ProfileDraft, ProfileInput};

    async fn store_with_profiles() -> Arc<InMemoryProfessionalStore> {
        let store = Arc::new(InMemoryProfessionalStore::new());
        for email in ["a@example.com", "b@example.com"] {
            let draft = ProfileDraft::new(ProfileInput {
                business_name: email.into(),
                ..Default::default()
            })
            .unwrap();
            let profile =
                ProfessionalProfile::create(UserId::new(email).unwrap(), draft, Timestamp::now());
            store.insert_profile(&profile).await.unwrap();
        }
        store
    }

    fn user(email: &str) -> UserId {
        UserId::new(email).unwrap()
    }

    fn input(name: &str) -> ServiceInput {
        ServiceInput {
            name: name.into(),
            price_min: Some(20.0),
            price_max: Some(40.0),
            duration_minutes: Some(45),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_update_and_list() {
        let store = store_with_profiles().await;
        let handler = ManageServicesHandler::new(store.clone(), store.clone());

        let created = handler
            .save(SaveServiceCommand {
                owner: user("a@example.com"),
                service_id: None,
                input: input("Fade"),
            })
            .await
            .unwrap();
        let updated = handler
            .save(SaveServiceCommand {
                owner: user("a@example.com"),
                service_id: Some(created.id),
                input: input("Skin fade"),
            })
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);

        let listed = handler.list(&user("a@example.com")).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Skin fade");
    }

    #[tokio::test]
    async fn other_profiles_service_is_not_found() {
        let store = store_with_profiles().await;
        let handler = ManageServicesHandler::new(store.clone(), store.clone());
        let created = handler
            .save(SaveServiceCommand {
                owner: user("a@example.com"),
                service_id: None,
                input: input("Fade"),
            })
            .await
            .unwrap();

        let err = handler
            .delete(&user("b@example.com"), created.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(handler.list(&user("a@example.com")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn invalid_price_band_is_rejected() {
        let store = store_with_profiles().await;
        let handler = ManageServicesHandler::new(store.clone(), store.clone());
        let err = handler
            .save(SaveServiceCommand {
                owner: user("a@example.com"),
                service_id: None,
                input: ServiceInput {
                    price_min: Some(50.0),
                    price_max: Some(10.0),
                    ..input("Fade")
                },
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn caller_without_profile_gets_not_found() {
        let store = store_with_profiles().await;
        let handler = ManageServicesHandler::new(store.clone(), store.clone());
        let err = handler.list(&user("nobody@example.com")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
