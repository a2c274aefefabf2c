//! Runs CLI commands against the image service.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::messages;
use crate::application::ImageService;
use crate::domain::entities::{SlotReference, TargetRef, UserId};
use crate::domain::errors::ImageError;
use crate::infrastructure::config::Command;

/// What to show and whether the store needs saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Text for the user, empty when there is nothing to say.
    pub message: String,
    /// The store changed and should be persisted.
    pub persist: bool,
    /// The command was refused.
    pub failed: bool,
}

impl CommandOutput {
    fn from_result(command: &Command, result: Result<String, ImageError>) -> Self {
        match result {
            Ok(message) => Self {
                message,
                persist: command.is_mutating(),
                failed: false,
            },
            Err(e) => Self {
                message: messages::render_error(&e),
                persist: false,
                failed: true,
            },
        }
    }
}

/// Executes `command`. `now` is used by the purge sweep.
pub async fn execute(service: &ImageService, command: &Command, now: DateTime<Utc>) -> CommandOutput {
    debug!(?command, "Executing command");

    let result = match command {
        Command::Save { user, target, name } => service
            .save(UserId(*user), &TargetRef::new(target.as_str()), &name.join(" "))
            .await
            .map(|saved| messages::saved(&saved.name)),
        Command::Paste {
            user,
            target,
            image,
        } => service
            .paste(
                UserId(*user),
                &TargetRef::new(target.as_str()),
                &parse_reference(image),
            )
            .await
            .map(|outcome| messages::pasted(&outcome.name)),
        Command::Submit { user, target, name } => service
            .submit(UserId(*user), &TargetRef::new(target.as_str()), &name.join(" "))
            .await
            .map(|saved| messages::submitted(&saved.name)),
        Command::Remove { user, image } => service
            .remove(UserId(*user), &parse_reference(image))
            .await
            .map(|outcome| messages::removed(&outcome.name)),
        Command::List { user } => service
            .list(UserId(*user))
            .map(|images| messages::listing(&images)),
        Command::Seen { user } => {
            let touched = service.seen(UserId(*user)).await;
            return CommandOutput {
                message: messages::seen(touched),
                persist: touched,
                failed: false,
            };
        }
        Command::Pending { admin: Some(user) } => Ok(service
            .admin_available(UserId(*user))
            .map(messages::pending)
            .unwrap_or_default()),
        Command::Pending { admin: None } => Ok(messages::pending(service.pending_submissions())),
        Command::Sweep => {
            let report = service.purge_scheduler().sweep(now).await;
            return CommandOutput {
                message: messages::purged(&report),
                persist: !report.removed.is_empty(),
                failed: false,
            };
        }
    };

    CommandOutput::from_result(command, result)
}

fn parse_reference(words: &[String]) -> SlotReference {
    let Ok(reference) = words.join(" ").parse::<SlotReference>();
    reference
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parking_lot::RwLock;

    use crate::application::services::sample_png;
    use crate::application::{ImageSettings, ServicePorts};
    use crate::domain::canvas::CanvasTable;
    use crate::domain::entities::Tier;
    use crate::domain::image_store::ImageStore;
    use crate::domain::ports::mocks::{
        ManualClock, MockImageVault, MockObjectLocator, MockPermissionOracle, MockTextureBackend,
    };

    fn service() -> ImageService {
        let mut permissions = MockPermissionOracle::new();
        permissions.expect_tier().returning(|user| {
            if user == UserId(99) {
                Tier::Admin
            } else {
                Tier::Standard
            }
        });
        permissions.expect_can_use().returning(|_| true);
        permissions.expect_can_submit().returning(|_| true);
        let mut settings = ImageSettings::default();
        settings.save.cooldown_secs = 0;
        settings.paste_cooldown_secs = 0;
        settings.submit.enabled = true;
        settings.submit.notify_admins = true;
        settings.submit.quota.cooldown_secs = 0;

        ImageService::new(
            Arc::new(RwLock::new(ImageStore::new())),
            ServicePorts {
                locator: Arc::new(
                    MockObjectLocator::new()
                        .with_object("sign-1", "sign.large.wood")
                        .with_object("sign-2", "sign.small.wood"),
                ),
                textures: Arc::new(
                    MockTextureBackend::new().with_texture("sign-1", sample_png(64, 32)),
                ),
                vault: Arc::new(MockImageVault::new()),
                permissions: Arc::new(permissions),
                clock: Arc::new(ManualClock::at(1_700_000_000)),
            },
            CanvasTable::builtin(),
            settings,
        )
    }

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[tokio::test]
    async fn test_save_list_paste_remove() {
        let service = service();

        let saved = execute(
            &service,
            &Command::Save {
                user: 1,
                target: "sign-1".to_string(),
                name: words("old barn"),
            },
            now(),
        )
        .await;
        assert_eq!(saved.message, "Sign image \"old barn\" saved.");
        assert!(saved.persist);
        assert!(!saved.failed);

        let listed = execute(&service, &Command::List { user: 1 }, now()).await;
        assert!(listed.message.ends_with("1.  old barn - Large Wooden Sign"));
        assert!(!listed.persist);

        let pasted = execute(
            &service,
            &Command::Paste {
                user: 1,
                target: "sign-2".to_string(),
                image: words("1"),
            },
            now(),
        )
        .await;
        assert_eq!(pasted.message, "Sign image \"old barn\" pasted.");
        assert!(pasted.persist);

        let removed = execute(
            &service,
            &Command::Remove {
                user: 1,
                image: words("OLD BARN"),
            },
            now(),
        )
        .await;
        assert_eq!(removed.message, "Sign image \"old barn\" removed.");
        assert!(removed.persist);
    }

    #[tokio::test]
    async fn test_refusal_is_rendered() {
        let service = service();

        let output = execute(&service, &Command::List { user: 5 }, now()).await;

        assert!(output.failed);
        assert!(!output.persist);
        assert_eq!(output.message, "You have no saved images.");
    }

    #[tokio::test]
    async fn test_pending_is_announced_only_to_admins() {
        let service = service();

        let idle = execute(&service, &Command::Pending { admin: Some(99) }, now()).await;
        assert_eq!(idle.message, "");

        let submitted = execute(
            &service,
            &Command::Submit {
                user: 1,
                target: "sign-1".to_string(),
                name: words("flag"),
            },
            now(),
        )
        .await;
        assert!(submitted.persist);

        let player = execute(&service, &Command::Pending { admin: Some(1) }, now()).await;
        let admin = execute(&service, &Command::Pending { admin: Some(99) }, now()).await;
        let all = execute(&service, &Command::Pending { admin: None }, now()).await;

        assert_eq!(player.message, "");
        assert!(!player.failed);
        assert_eq!(admin.message, "1 pending submissions.");
        assert_eq!(all.message, "1 pending submissions.");
    }

    #[tokio::test]
    async fn test_sweep_with_nothing_expired() {
        let service = service();

        let output = execute(&service, &Command::Sweep, now()).await;

        assert_eq!(output.message, "Purged 0 user's data.");
        assert!(!output.persist);
    }

    #[test]
    fn test_parse_reference() {
        assert_eq!(parse_reference(&words("2")), SlotReference::by_ordinal(2));
        assert_eq!(
            parse_reference(&words("old barn")),
            SlotReference::by_name("old barn")
        );
    }
}
