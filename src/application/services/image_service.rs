//! Save, paste, submit and housekeeping of users' sign images.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::image_resizer::ImageResizer;
use super::keyed_locks::{CollectionKind, KeyedLocks};
use super::purge_scheduler::PurgeScheduler;
use crate::application::dto::{ListedImage, PasteOutcome, RemoveOutcome, SavedImage};
use crate::application::settings::ImageSettings;
use crate::domain::canvas::CanvasTable;
use crate::domain::entities::{
    ImageRecord, OperationKind, SlotReference, StoredImage, TargetRef, UserId, VaultBucket,
    VaultKey, WorldObject,
};
use crate::domain::errors::ImageError;
use crate::domain::image_store::ImageStore;
use crate::domain::ports::{Clock, ImageVault, ObjectLocator, PermissionOracle, TextureBackend};

/// Collaborators the service talks to.
#[derive(Clone)]
pub struct ServicePorts {
    pub locator: Arc<dyn ObjectLocator>,
    pub textures: Arc<dyn TextureBackend>,
    pub vault: Arc<dyn ImageVault>,
    pub permissions: Arc<dyn PermissionOracle>,
    pub clock: Arc<dyn Clock>,
}

/// Orchestrates every user-facing image operation.
///
/// Mutations of one user's collection are serialized through [`KeyedLocks`].
/// The store lock is only ever held between awaits. Cooldowns live in the
/// store so they are persisted with it.
pub struct ImageService {
    store: Arc<RwLock<ImageStore>>,
    locks: Arc<KeyedLocks>,
    ports: ServicePorts,
    canvases: CanvasTable,
    settings: ImageSettings,
}

impl ImageService {
    #[must_use]
    pub fn new(
        store: Arc<RwLock<ImageStore>>,
        ports: ServicePorts,
        canvases: CanvasTable,
        settings: ImageSettings,
    ) -> Self {
        Self {
            store,
            locks: Arc::new(KeyedLocks::new()),
            ports,
            canvases,
            settings,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &ImageSettings {
        &self.settings
    }

    /// Copy of the current store, for persisting.
    #[must_use]
    pub fn snapshot(&self) -> ImageStore {
        self.store.read().clone()
    }

    /// Purge scheduler sharing this service's store and locks.
    #[must_use]
    pub fn purge_scheduler(&self) -> PurgeScheduler {
        PurgeScheduler::new(
            self.store.clone(),
            self.locks.clone(),
            self.ports.vault.clone(),
            self.ports.permissions.clone(),
            self.settings.purge,
        )
    }

    /// Copies the image shown on `target` into a new slot named `name`.
    ///
    /// # Errors
    /// Returns `NoPermission`, a validation error, `QuotaExceeded`,
    /// `DuplicateName`, `NoTexture` or a backend failure. Nothing is stored
    /// and no cooldown is consumed on error.
    pub async fn save(
        &self,
        user: UserId,
        target: &TargetRef,
        name: &str,
    ) -> Result<SavedImage, ImageError> {
        self.require_use(user)?;
        let name = validate_name(name)?;
        debug!(user = %user, name, "Saving sign image");

        let _guard = self.locks.acquire(user, CollectionKind::Slots).await;
        let now = self.ports.clock.now();
        let cooldown_secs = self.settings.save.cooldown_secs;
        self.check_cooldown(user, OperationKind::Save, cooldown_secs)?;

        let object = self.locate_editable(user, target).await?;

        let limit = self
            .settings
            .save
            .limit_for(self.ports.permissions.tier(user));
        let slot_index = self.store.read().slots.check_add(user, name, limit)?;

        let image = self.capture(user, &object, name).await?;
        self.ports
            .vault
            .write(&VaultKey::Slot { user, slot_index }, &image)
            .await?;

        let record = ImageRecord::new(slot_index, name, image.source_label);
        {
            let mut store = self.store.write();
            store.slots.insert(user, record.clone(), now);
            store
                .cooldowns
                .record_use(user, OperationKind::Save, cooldown_secs, now);
        }

        info!(user = %user, name, slot_index, "Sign image saved");
        Ok(record.into())
    }

    /// Applies a stored image to `target`, scaled to the target's canvas.
    ///
    /// # Errors
    /// Returns `NoPermission`, a validation error, `NoCollection`,
    /// `NotFound`, `UnsupportedObject`, `MissingImageData`, `DecodeError` or
    /// a backend failure.
    pub async fn paste(
        &self,
        user: UserId,
        target: &TargetRef,
        reference: &SlotReference,
    ) -> Result<PasteOutcome, ImageError> {
        self.require_use(user)?;
        debug!(user = %user, reference = %reference, "Pasting sign image");

        let _guard = self.locks.acquire(user, CollectionKind::Slots).await;
        let now = self.ports.clock.now();
        let cooldown_secs = self.settings.paste_cooldown_secs;
        self.check_cooldown(user, OperationKind::Paste, cooldown_secs)?;

        let object = self.locate_editable(user, target).await?;
        let record = self.store.read().slots.find(user, reference)?.clone();
        let canvas = self
            .canvases
            .dimensions(object.kind())
            .ok_or_else(|| ImageError::UnsupportedObject {
                kind: object.kind().to_string(),
            })?
            .clone();

        let key = VaultKey::Slot {
            user,
            slot_index: record.slot_index(),
        };
        let image = self.ports.vault.read(&key).await?.ok_or_else(|| {
            warn!(user = %user, key = %key, "Stored image data missing");
            ImageError::MissingImageData {
                name: record.name().to_string(),
            }
        })?;

        let resized =
            ImageResizer::resize_blocking(Bytes::from(image.data), canvas.width, canvas.height)
                .await?;
        let handle = self.ports.textures.store(&object, resized).await?;

        self.store
            .write()
            .cooldowns
            .record_use(user, OperationKind::Paste, cooldown_secs, now);

        info!(
            user = %user,
            name = record.name(),
            object = %object.id(),
            width = canvas.width,
            height = canvas.height,
            "Sign image pasted"
        );
        Ok(PasteOutcome {
            name: record.name().to_string(),
            handle,
            width: canvas.width,
            height: canvas.height,
        })
    }

    /// Queues the image shown on `target` for administrator review.
    ///
    /// # Errors
    /// Returns `FeatureDisabled` when submissions are off and `NoPermission`
    /// for users without the submit grant, otherwise the same errors as
    /// [`ImageService::save`].
    pub async fn submit(
        &self,
        user: UserId,
        target: &TargetRef,
        name: &str,
    ) -> Result<SavedImage, ImageError> {
        self.require_use(user)?;
        if !self.settings.submit.enabled {
            return Err(ImageError::FeatureDisabled);
        }
        if !self.ports.permissions.can_submit(user) {
            warn!(user = %user, "Submit permission denied");
            return Err(ImageError::NoPermission);
        }
        let name = validate_name(name)?;
        debug!(user = %user, name, "Submitting sign image");

        let _guard = self.locks.acquire(user, CollectionKind::Submissions).await;
        let now = self.ports.clock.now();
        let quota = self.settings.submit.quota;
        self.check_cooldown(user, OperationKind::Submit, quota.cooldown_secs)?;

        let object = self.locate_editable(user, target).await?;

        let limit = quota.limit_for(self.ports.permissions.tier(user));
        let slot_index = self
            .store
            .read()
            .submissions
            .check_add(user, name, limit)?;

        let image = self.capture(user, &object, name).await?;
        self.ports
            .vault
            .write(&VaultKey::Submission { user, slot_index }, &image)
            .await?;

        let record = ImageRecord::new(slot_index, name, image.source_label);
        {
            let mut store = self.store.write();
            store.submissions.insert(user, record.clone());
            store
                .cooldowns
                .record_use(user, OperationKind::Submit, quota.cooldown_secs, now);
        }

        info!(user = %user, name, "Sign image submitted for review");
        Ok(record.into())
    }

    /// Deletes a stored image and its backing data.
    ///
    /// # Errors
    /// Returns `NoPermission`, `NoCollection`, `NotFound` or a backend
    /// failure, in which case the record is kept.
    pub async fn remove(
        &self,
        user: UserId,
        reference: &SlotReference,
    ) -> Result<RemoveOutcome, ImageError> {
        self.require_use(user)?;
        debug!(user = %user, reference = %reference, "Removing sign image");
        let _guard = self.locks.acquire(user, CollectionKind::Slots).await;

        let slot_index = self.store.read().slots.find(user, reference)?.slot_index();
        self.ports
            .vault
            .clear(&VaultKey::Slot { user, slot_index })
            .await?;

        let removal = self.store.write().slots.remove(user, reference)?;
        if removal.collection_deleted {
            debug!(user = %user, "Collection emptied");
            if let Err(e) = self
                .ports
                .vault
                .mark_for_cleanup(VaultBucket::User(user))
                .await
            {
                warn!(user = %user, error = %e, "Failed to mark user images for cleanup");
            }
        }

        info!(user = %user, name = removal.record.name(), "Sign image removed");
        Ok(RemoveOutcome {
            name: removal.record.name().to_string(),
            collection_deleted: removal.collection_deleted,
        })
    }

    /// The user's images in alphabetical order.
    ///
    /// # Errors
    /// Returns `NoPermission`, or `NoCollection` when the user has nothing
    /// saved.
    pub fn list(&self, user: UserId) -> Result<Vec<ListedImage>, ImageError> {
        self.require_use(user)?;
        let store = self.store.read();
        let collection = store.slots.collection(user).ok_or(ImageError::NoCollection)?;

        Ok(collection
            .records()
            .sorted_by_name()
            .into_iter()
            .enumerate()
            .map(|(i, record)| ListedImage {
                ordinal: i + 1,
                name: record.name().to_string(),
                source_label: record.source_label().to_string(),
                slot_index: record.slot_index(),
            })
            .collect())
    }

    /// Marks the user as active now. Returns false if they have no
    /// collection to keep alive.
    pub async fn seen(&self, user: UserId) -> bool {
        let _guard = self.locks.acquire(user, CollectionKind::Slots).await;
        let now = self.ports.clock.now();
        let touched = self.store.write().slots.touch(user, now);
        debug!(user = %user, touched, "User seen");
        touched
    }

    /// Number of submissions waiting for review.
    #[must_use]
    pub fn pending_submissions(&self) -> usize {
        self.store.read().submissions.pending_count()
    }

    /// Pending submission count to announce to `user`, if they are an admin
    /// who should be told about any.
    #[must_use]
    pub fn admin_available(&self, user: UserId) -> Option<usize> {
        let submit = self.settings.submit;
        if !submit.enabled || !submit.notify_admins {
            return None;
        }
        if !self.ports.permissions.tier(user).is_admin() {
            return None;
        }
        let pending = self.pending_submissions();
        (pending > 0).then_some(pending)
    }

    fn require_use(&self, user: UserId) -> Result<(), ImageError> {
        if self.ports.permissions.can_use(user) {
            return Ok(());
        }
        warn!(user = %user, "Use permission denied");
        Err(ImageError::NoPermission)
    }

    fn check_cooldown(
        &self,
        user: UserId,
        operation: OperationKind,
        cooldown_secs: u64,
    ) -> Result<(), ImageError> {
        let now = self.ports.clock.now();
        let remaining_secs = self
            .store
            .read()
            .cooldowns
            .remaining(user, operation, cooldown_secs, now);
        if remaining_secs > 0 {
            warn!(user = %user, %operation, remaining_secs, "Operation on cooldown");
            return Err(ImageError::OnCooldown {
                operation,
                remaining_secs,
            });
        }
        Ok(())
    }

    async fn locate_editable(
        &self,
        user: UserId,
        target: &TargetRef,
    ) -> Result<WorldObject, ImageError> {
        let object = self
            .ports
            .locator
            .find(user, target)
            .await?
            .ok_or(ImageError::NoTargetObject)?;

        if !self.ports.locator.can_edit(&object, user).await {
            warn!(user = %user, object = %object.id(), "Edit permission denied");
            return Err(ImageError::NoEditPermission);
        }
        Ok(object)
    }

    async fn capture(
        &self,
        user: UserId,
        object: &WorldObject,
        name: &str,
    ) -> Result<StoredImage, ImageError> {
        let data = self
            .ports
            .textures
            .fetch(object)
            .await?
            .ok_or(ImageError::NoTexture)?;

        Ok(StoredImage {
            name: name.to_string(),
            submitter_id: user,
            object_kind: object.kind().to_string(),
            source_label: self.canvases.label_for(object.kind()).to_string(),
            data: data.to_vec(),
        })
    }
}

fn validate_name(name: &str) -> Result<&str, ImageError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ImageError::InvalidName);
    }
    Ok(name)
}
