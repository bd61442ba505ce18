//! User self-service operations: profile and avatar.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use contacts_core::error::AppError;
use contacts_core::traits::AvatarStorage;
use contacts_core::types::PageRequest;
use contacts_database::store::UserStore;
use contacts_entity::user::User;
use contacts_storage::avatar::AvatarProcessor;

use crate::context::RequestContext;

/// Handles profile reads, avatar uploads, and admin listings.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    avatars: Arc<dyn AvatarStorage>,
    processor: AvatarProcessor,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        avatars: Arc<dyn AvatarStorage>,
        processor: AvatarProcessor,
    ) -> Self {
        Self {
            users,
            avatars,
            processor,
        }
    }

    /// The authenticated user's own profile.
    pub fn me(&self, ctx: &RequestContext) -> User {
        ctx.user.clone()
    }

    /// Normalize an uploaded image, store it, and point the profile at it.
    pub async fn update_avatar(&self, ctx: &RequestContext, upload: Bytes) -> Result<User, AppError> {
        let png = self.processor.process(upload).await?;
        let key = ctx.user_id().to_string();
        let url = self.avatars.store(&key, png).await?;

        let user = self
            .users
            .update_avatar(ctx.user_id(), &url)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %user.id, provider = self.avatars.provider_type(), "Avatar updated");
        Ok(user)
    }

    /// List accounts for administrative tooling.
    pub async fn list_users(&self, page: PageRequest) -> Result<Vec<User>, AppError> {
        self.users.list(page).await
    }

    /// Mark an account confirmed without an email round trip.
    pub async fn confirm_user(&self, email: &str) -> Result<User, AppError> {
        if !self.users.confirm_email(email).await? {
            return Err(AppError::not_found(format!("No user with email {email}")));
        }
        info!(email, "User confirmed manually");
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No user with email {email}")))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use contacts_core::config::StorageConfig;
    use contacts_core::error::ErrorKind;
    use contacts_database::memory::MemoryUserStore;
    use contacts_entity::user::CreateUser;
    use contacts_storage::providers::LocalAvatarStorage;
    use image::{ImageBuffer, ImageFormat, Rgb};

    use super::*;

    async fn fixture(root: &std::path::Path) -> (UserService, Arc<MemoryUserStore>, User) {
        let users = Arc::new(MemoryUserStore::new());
        let user = users
            .create(&CreateUser {
                username: "alan".into(),
                email: "alan@example.com".into(),
                password_hash: "hash".into(),
                avatar: None,
            })
            .await
            .unwrap();
        let storage = LocalAvatarStorage::new(&StorageConfig {
            root: root.to_string_lossy().into_owned(),
            ..StorageConfig::default()
        })
        .await
        .unwrap();
        let service = UserService::new(users.clone(), Arc::new(storage), AvatarProcessor::new(250));
        (service, users, user)
    }

    fn jpeg() -> Bytes {
        let img = ImageBuffer::from_pixel(320, 200, Rgb([10u8, 120, 200]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Jpeg).unwrap();
        Bytes::from(out.into_inner())
    }

    #[tokio::test]
    async fn test_update_avatar_persists_url() {
        let tmp = tempfile::tempdir().unwrap();
        let (service, users, user) = fixture(tmp.path()).await;
        let ctx = RequestContext::new(user.clone());

        let updated = service.update_avatar(&ctx, jpeg()).await.unwrap();
        let url = updated.avatar.clone().unwrap();
        assert!(url.contains(&format!("/avatars/{}.png", user.id)));

        let stored = users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.avatar, Some(url));

        let file = std::fs::read(tmp.path().join(format!("avatars/{}.png", user.id))).unwrap();
        let decoded = image::load_from_memory(&file).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (250, 250));
    }

    #[tokio::test]
    async fn test_update_avatar_rejects_non_images() {
        let tmp = tempfile::tempdir().unwrap();
        let (service, _, user) = fixture(tmp.path()).await;
        let err = service
            .update_avatar(&RequestContext::new(user), Bytes::from_static(b"%PDF-1.7"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_confirm_user() {
        let tmp = tempfile::tempdir().unwrap();
        let (service, _, _) = fixture(tmp.path()).await;
        assert!(service.confirm_user("alan@example.com").await.unwrap().confirmed);
        assert_eq!(
            service.confirm_user("ghost@example.com").await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(service.list_users(PageRequest::default()).await.unwrap().len(), 1);
    }
}
