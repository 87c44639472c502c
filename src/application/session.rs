//! Editing session: one draft plus its submission state.

use tokio::sync::watch;

use crate::domain::draft::BlogDraft;

/// `Idle -> Submitting -> {Succeeded, Idle}`; a failed attempt lands back on
/// `Idle` with the draft untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
}

/// Exclusive owner of a draft.
///
/// Submissions borrow the session mutably for their whole duration, so the
/// draft cannot be edited or submitted again while one is in flight. Shells
/// that render while a submission is pending observe the state through
/// [`EditorSession::subscribe`].
#[derive(Debug)]
pub struct EditorSession {
    draft: BlogDraft,
    state: watch::Sender<SubmissionState>,
}

impl EditorSession {
    pub fn new(draft: BlogDraft) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self { draft, state }
    }

    pub fn draft(&self) -> &BlogDraft {
        &self.draft
    }

    /// Mutable access for field edits. Editing after a successful submission
    /// starts a new round.
    pub fn draft_mut(&mut self) -> &mut BlogDraft {
        if self.state() == SubmissionState::Succeeded {
            self.state.send_replace(SubmissionState::Idle);
        }
        &mut self.draft
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Whether the create control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.state() != SubmissionState::Submitting && self.draft.is_submittable()
    }

    pub(crate) fn begin(&mut self) -> Submission<'_> {
        self.state.send_replace(SubmissionState::Submitting);
        Submission {
            session: self,
            settled: false,
        }
    }
}

/// In-flight submission. Dropping it without settling returns the session to
/// `Idle`, which covers both failures and cancelled futures.
pub(crate) struct Submission<'a> {
    session: &'a mut EditorSession,
    settled: bool,
}

impl Submission<'_> {
    pub(crate) fn draft(&self) -> &BlogDraft {
        &self.session.draft
    }

    pub(crate) fn succeed(mut self) {
        self.settle(SubmissionState::Succeeded);
    }

    pub(crate) fn succeed_and_reset(mut self) {
        self.session.draft.reset();
        self.settle(SubmissionState::Succeeded);
    }

    fn settle(&mut self, state: SubmissionState) {
        self.session.state.send_replace(state);
        self.settled = true;
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.session.state.send_replace(SubmissionState::Idle);
        }
    }
}
