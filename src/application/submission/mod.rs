//! Save sequences for blog drafts.
//!
//! Create is a three step sequence: create the entity, upload the attached
//! image, refresh the list. Only the first step can fail the submission. Once
//! the entity exists, a failed upload or refresh is reported on the outcome
//! while the draft is still reset and the caller still gets a success.

use std::sync::Arc;

use blogdesk_api_types::{BlogEntity, BlogId, BlogPage};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::backend::BlogBackend;
use super::error::{WorkflowError, user_message};
use super::listing::ListSynchronizer;
use super::session::EditorSession;
use crate::domain::draft::{BlogDraft, ImageRule};
use crate::domain::locale::{LocaleSet, LocaleTag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MediaOutcome {
    NotAttached,
    Uploaded,
    Failed { message: String },
}

/// Post-mutation list refresh. A failure here is a notice, not an error: the
/// mutation itself already went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    Refreshed { page: BlogPage },
    Failed { message: String },
}

impl RefreshOutcome {
    pub fn page(&self) -> Option<&BlogPage> {
        match self {
            RefreshOutcome::Refreshed { page } => Some(page),
            RefreshOutcome::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateOutcome {
    pub id: BlogId,
    pub media: MediaOutcome,
    pub refresh: RefreshOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub id: BlogId,
    pub refresh: RefreshOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    pub id: BlogId,
    pub refresh: RefreshOutcome,
}

#[derive(Clone)]
pub struct BlogWorkflow {
    backend: Arc<dyn BlogBackend>,
    listing: Arc<ListSynchronizer>,
    locales: LocaleSet,
}

impl BlogWorkflow {
    pub fn new(
        backend: Arc<dyn BlogBackend>,
        listing: Arc<ListSynchronizer>,
        locales: LocaleSet,
    ) -> Self {
        Self {
            backend,
            listing,
            locales,
        }
    }

    pub fn listing(&self) -> &ListSynchronizer {
        &self.listing
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    fn locale(&self) -> &LocaleTag {
        &self.listing.query().locale
    }

    /// Fresh session over an empty draft.
    pub fn new_session(&self) -> EditorSession {
        EditorSession::new(BlogDraft::new(&self.locales))
    }

    pub async fn load(&self, id: BlogId) -> Result<BlogEntity, WorkflowError> {
        self.backend
            .get_by_id(id, self.locale())
            .await
            .map_err(|err| WorkflowError::load(id, err))
    }

    /// Session seeded from the persisted entity, ready for [`Self::submit_update`].
    pub async fn open_session(&self, id: BlogId) -> Result<EditorSession, WorkflowError> {
        let entity = self.load(id).await?;
        Ok(EditorSession::new(BlogDraft::from_entity(
            &self.locales,
            &entity,
        )))
    }

    pub async fn refresh_list(&self) -> Result<BlogPage, WorkflowError> {
        self.listing.refresh().await.map_err(WorkflowError::refresh)
    }

    #[instrument(skip_all)]
    pub async fn submit_create(
        &self,
        session: &mut EditorSession,
    ) -> Result<CreateOutcome, WorkflowError> {
        session
            .draft()
            .validate(ImageRule::Required)
            .map_err(WorkflowError::Validation)?;
        let submission = session.begin();

        let request = submission.draft().to_create_request();
        let id = match self.backend.create(&request, self.locale()).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                warn!("create returned no identifier");
                return Err(WorkflowError::missing_identifier());
            }
            Err(err) => {
                warn!(error = %err, "create failed");
                return Err(WorkflowError::create(err));
            }
        };

        let media = match submission.draft().image() {
            None => MediaOutcome::NotAttached,
            Some(image) => match self.backend.upload_media(id, image, self.locale()).await {
                Ok(()) => MediaOutcome::Uploaded,
                Err(err) => {
                    warn!(blog_id = id, error = %err, "media upload failed; blog was created without it");
                    MediaOutcome::Failed {
                        message: user_message(&err),
                    }
                }
            },
        };

        submission.succeed_and_reset();
        info!(blog_id = id, "blog created");

        let refresh = self.refresh_after_mutation().await;
        Ok(CreateOutcome { id, media, refresh })
    }

    #[instrument(skip(self, session))]
    pub async fn submit_update(
        &self,
        id: BlogId,
        session: &mut EditorSession,
    ) -> Result<UpdateOutcome, WorkflowError> {
        session
            .draft()
            .validate(ImageRule::NotRequired)
            .map_err(WorkflowError::Validation)?;
        let submission = session.begin();

        let request = submission.draft().to_update_request(id);
        if let Err(err) = self.backend.update(&request).await {
            warn!(error = %err, "update failed");
            return Err(WorkflowError::update(id, err));
        }

        submission.succeed();
        info!("blog updated");

        let refresh = self.refresh_after_mutation().await;
        Ok(UpdateOutcome { id, refresh })
    }

    #[instrument(skip(self))]
    pub async fn toggle_active(&self, id: BlogId) -> Result<ToggleOutcome, WorkflowError> {
        if let Err(err) = self.backend.toggle_active(id, self.locale()).await {
            warn!(error = %err, "activation toggle failed");
            return Err(WorkflowError::toggle(id, err));
        }
        info!("blog activation toggled");

        let refresh = self.refresh_after_mutation().await;
        Ok(ToggleOutcome { id, refresh })
    }

    async fn refresh_after_mutation(&self) -> RefreshOutcome {
        match self.listing.refresh().await {
            Ok(page) => RefreshOutcome::Refreshed { page },
            Err(err) => {
                warn!(error = %err, "list refresh after mutation failed");
                RefreshOutcome::Failed {
                    message: user_message(&err),
                }
            }
        }
    }
}
