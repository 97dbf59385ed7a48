//! The four-step provider onboarding wizard
//!
//! Owns the form store, the current step and the submission status. Each
//! Continue validates the current step; the last one sends the payload.
//! Navigation and notifications go through the narrow [`Navigator`] and
//! [`Notifier`] capabilities so the wizard can be driven without a UI.

use super::registry::Step;
use super::store::{ErrorMap, FormPatch, FormState, FormStore};
use super::submission::SubmissionAssembler;
use super::validation::ValidationRules;
use crate::api::{ApiClientTrait, ApiError};
use crate::state::notices::{NoticeKind, Notifier};
use crate::state::route::{Navigator, Route};
use uuid::Uuid;

pub const INVITATION_SENT: &str = "Invitation sent";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStatus {
    #[default]
    Editing,
    /// A create-organization request is in flight
    Submitting,
    Submitted,
    NavigatedAway,
}

/// Outcome of a Continue or Back request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChange {
    /// Validation failed, the step is unchanged
    Rejected,
    Advanced(Step),
    Back(Step),
    /// Payload validated and the wizard is now submitting
    ReadyToSubmit,
    Submitted,
    SubmitFailed,
    NavigatedAway,
    /// Ignored because a submission is in flight
    Busy,
    /// Ignored because the wizard already finished
    Finished,
}

#[derive(Debug)]
pub struct OnboardingWizard {
    id: Uuid,
    step: Step,
    submission_attempted: bool,
    status: WizardStatus,
    store: FormStore,
    rules: ValidationRules,
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self::new(ValidationRules::default())
    }
}

impl OnboardingWizard {
    pub fn new(rules: ValidationRules) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(wizard = %id, "onboarding started");
        Self {
            id,
            step: Step::FIRST,
            submission_attempted: false,
            status: WizardStatus::Editing,
            store: FormStore::new(),
            rules,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn status(&self) -> WizardStatus {
        self.status
    }

    pub fn submission_attempted(&self) -> bool {
        self.submission_attempted
    }

    pub fn values(&self) -> &FormState {
        self.store.get()
    }

    pub fn errors(&self) -> &ErrorMap {
        self.store.errors()
    }

    pub fn is_submitting(&self) -> bool {
        self.status == WizardStatus::Submitting
    }

    fn is_finished(&self) -> bool {
        matches!(
            self.status,
            WizardStatus::Submitted | WizardStatus::NavigatedAway
        )
    }

    /// Apply user input.
    ///
    /// Once Continue has been pressed the current step is re-validated after
    /// every edit so messages clear as soon as the input becomes valid.
    pub fn edit(&mut self, patch: FormPatch) {
        if self.status != WizardStatus::Editing || patch.is_empty() {
            return;
        }
        self.store.set(patch);
        if self.submission_attempted {
            self.validate_current();
        }
    }

    /// Validate the current step and replace the error map. Returns true when
    /// the step has no errors.
    pub fn validate_current(&mut self) -> bool {
        let errors = self.rules.validate(self.step, self.store.get());
        let valid = !errors.has_errors();
        self.store.set_errors(errors);
        valid
    }

    /// Synchronous half of Continue.
    ///
    /// Advances when the step validates. On the last step it flips the
    /// status to `Submitting` and returns [`StepChange::ReadyToSubmit`]; the
    /// caller then sends the form and reports back with
    /// [`finish_submission`](Self::finish_submission).
    pub fn request_continue(&mut self) -> StepChange {
        if self.is_submitting() {
            return StepChange::Busy;
        }
        if self.is_finished() {
            return StepChange::Finished;
        }

        self.submission_attempted = true;
        if !self.validate_current() {
            tracing::debug!(
                wizard = %self.id,
                step = self.step.number(),
                failing = ?self.store.errors().failing(),
                "step rejected"
            );
            return StepChange::Rejected;
        }

        match self.step.next() {
            Some(next) => {
                self.step = next;
                tracing::debug!(wizard = %self.id, step = next.number(), "advanced");
                StepChange::Advanced(next)
            }
            None => {
                self.status = WizardStatus::Submitting;
                tracing::info!(wizard = %self.id, "submitting organization");
                StepChange::ReadyToSubmit
            }
        }
    }

    /// Record the outcome of the create-organization call
    pub fn finish_submission(
        &mut self,
        result: Result<(), ApiError>,
        navigator: &mut dyn Navigator,
        notifier: &mut dyn Notifier,
    ) -> StepChange {
        if !self.is_submitting() {
            return StepChange::Finished;
        }
        match result {
            Ok(()) => {
                tracing::info!(wizard = %self.id, "organization created");
                self.status = WizardStatus::Submitted;
                self.store.reset();
                notifier.notify(NoticeKind::Success, INVITATION_SENT);
                navigator.navigate(Route::user_listings());
                StepChange::Submitted
            }
            Err(err) => {
                tracing::warn!(wizard = %self.id, error = %err, "organization create failed");
                self.status = WizardStatus::Editing;
                notifier.notify(NoticeKind::Error, &err.user_message());
                StepChange::SubmitFailed
            }
        }
    }

    /// Continue: validate, advance, and on the last step submit
    pub async fn continue_step<C>(
        &mut self,
        api: &C,
        navigator: &mut dyn Navigator,
        notifier: &mut dyn Notifier,
    ) -> StepChange
    where
        C: ApiClientTrait + ?Sized,
    {
        match self.request_continue() {
            StepChange::ReadyToSubmit => {
                let result = SubmissionAssembler::new(api).submit(self.store.get()).await;
                self.finish_submission(result, navigator, notifier)
            }
            other => other,
        }
    }

    /// Back: previous step, or leave to the provider listing from step 1
    pub fn back(&mut self, navigator: &mut dyn Navigator) -> StepChange {
        if self.is_submitting() {
            return StepChange::Busy;
        }
        if self.is_finished() {
            return StepChange::Finished;
        }
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                StepChange::Back(prev)
            }
            None => {
                tracing::debug!(wizard = %self.id, "onboarding abandoned");
                self.status = WizardStatus::NavigatedAway;
                navigator.navigate(Route::provider_listings());
                StepChange::NavigatedAway
            }
        }
    }
}
