//! Build wizard state machine.
//!
//! Four steps (project type, configuration, timeline/budget, contact) with
//! per-step validation gates on "Next", unconditional "Previous", and an
//! async submission seam. The error field is display state: it is set and
//! cleared as the user moves around but never blocks a permitted
//! transition, and a failed submission preserves every entered value.

use crate::error::CommerceError;
use crate::wizard::validate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Wizard position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    One,
    Two,
    Three,
    Four,
    Complete,
}

impl WizardStep {
    /// 1-indexed step number for the progress indicator.
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::One => 1,
            WizardStep::Two => 2,
            WizardStep::Three => 3,
            WizardStep::Four => 4,
            WizardStep::Complete => 5,
        }
    }
}

/// Whether a submission is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardPhase {
    #[default]
    Editing,
    Submitting,
}

macro_rules! wizard_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $s),+
                }
            }

            pub fn from_str(s: &str) -> Option<Self> {
                match s {
                    $($s => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

wizard_enum!(ProjectType {
    NewOutdoorKitchen => "new-outdoor-kitchen",
    Renovation => "renovation",
    BbqArea => "bbq-area",
    Commercial => "commercial",
});

wizard_enum!(BaseKit {
    Classic4 => "classic-4",
    Classic6 => "classic-6",
    Premium4 => "premium-4",
    Premium6 => "premium-6",
});

impl BaseKit {
    /// Kits that may be pre-selected via a shared URL.
    ///
    /// Deliberately a subset: the premium kits are not URL-promotable, so a
    /// crafted link cannot advertise them ahead of release.
    pub fn url_settable(&self) -> bool {
        matches!(self, BaseKit::Classic4 | BaseKit::Classic6)
    }
}

wizard_enum!(FridgeType {
    None => "none",
    Single => "single",
    Double => "double",
});

wizard_enum!(Finish {
    MatteBlack => "matte-black",
    Stainless => "stainless",
    Timber => "timber",
});

wizard_enum!(Timeline {
    Asap => "asap",
    OneToThreeMonths => "1-3-months",
    ThreeToSixMonths => "3-6-months",
    Flexible => "flexible",
});

wizard_enum!(Budget {
    Under5k => "under-5k",
    FiveToTen => "5k-10k",
    TenToTwenty => "10k-20k",
    Over20k => "over-20k",
});

wizard_enum!(InstallationPreference {
    Diy => "diy",
    Professional => "professional",
    Undecided => "undecided",
});

/// Step 1: project type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepOne {
    pub project_type: Option<ProjectType>,
}

/// Step 2: kit configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepTwo {
    pub base_kit: Option<BaseKit>,
    pub fridge_type: Option<FridgeType>,
    pub finish: Option<Finish>,
}

/// Step 3: timeline and budget.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepThree {
    pub timeline: Option<Timeline>,
    pub budget: Option<Budget>,
    pub installation_preference: Option<InstallationPreference>,
}

/// Step 4: contact details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepFour {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

/// The completed enquiry handed to the submission sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildEnquiry {
    pub project_type: String,
    pub base_kit: String,
    pub fridge_type: String,
    pub finish: String,
    pub timeline: String,
    pub budget: String,
    pub installation_preference: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

/// Where a completed enquiry goes. Implemented by the gateway; tests use
/// in-memory sinks.
#[async_trait]
pub trait EnquirySink {
    async fn submit(&self, enquiry: &BuildEnquiry) -> Result<(), CommerceError>;
}

/// The 4-step build wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildWizard {
    #[serde(skip)]
    step: WizardStep,
    pub step1: StepOne,
    pub step2: StepTwo,
    pub step3: StepThree,
    pub step4: StepFour,
    #[serde(skip)]
    error: Option<String>,
    #[serde(skip)]
    phase: WizardPhase,
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::One
    }
}

impl BuildWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::One,
            step1: StepOne::default(),
            step2: StepTwo::default(),
            step3: StepThree::default(),
            step4: StepFour::default(),
            error: None,
            phase: WizardPhase::Editing,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    /// The current display error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Dismiss the inline error banner.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Advance one step, gated on the current step's field list.
    ///
    /// Step 4 does not advance through here; reaching "Next" there means
    /// [`BuildWizard::submit`].
    pub fn next(&mut self) -> Result<WizardStep, CommerceError> {
        let gate = match self.step {
            WizardStep::One => self.validate_step1(),
            WizardStep::Two => self.validate_step2(),
            WizardStep::Three => self.validate_step3(),
            WizardStep::Four | WizardStep::Complete => {
                return Err(CommerceError::Validation(
                    "no further step to advance to".to_string(),
                ))
            }
        };

        if let Err(msg) = gate {
            self.error = Some(msg.clone());
            return Err(CommerceError::Validation(msg));
        }

        self.error = None;
        self.step = match self.step {
            WizardStep::One => WizardStep::Two,
            WizardStep::Two => WizardStep::Three,
            WizardStep::Three => WizardStep::Four,
            other => other,
        };
        debug!(step = self.step.number(), "wizard: advanced");
        Ok(self.step)
    }

    /// Go back one step. Always allowed from steps 2-4; no re-validation.
    pub fn previous(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::Two => WizardStep::One,
            WizardStep::Three => WizardStep::Two,
            WizardStep::Four => WizardStep::Three,
            other => other,
        };
        self.step
    }

    /// Submit the enquiry from step 4.
    ///
    /// On failure the wizard stays on step 4 with every entered value
    /// intact and a dismissible error set.
    pub async fn submit(&mut self, sink: &dyn EnquirySink) -> Result<(), CommerceError> {
        if self.step != WizardStep::Four {
            return Err(CommerceError::Validation(
                "submission is only available on the final step".to_string(),
            ));
        }
        if let Err(msg) = self.validate_step4() {
            self.error = Some(msg.clone());
            return Err(CommerceError::Validation(msg));
        }

        self.error = None;
        self.phase = WizardPhase::Submitting;
        let enquiry = self.enquiry();
        let result = sink.submit(&enquiry).await;
        self.phase = WizardPhase::Editing;

        match result {
            Ok(()) => {
                self.step = WizardStep::Complete;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "wizard: enquiry submission failed");
                self.error = Some(
                    "We couldn't send your enquiry. Please try again or contact us.".to_string(),
                );
                Err(err)
            }
        }
    }

    /// Flatten the form into the submission payload. Unset optional
    /// selections serialize as empty strings.
    pub fn enquiry(&self) -> BuildEnquiry {
        BuildEnquiry {
            project_type: self.step1.project_type.map(|v| v.as_str()).unwrap_or("").to_string(),
            base_kit: self.step2.base_kit.map(|v| v.as_str()).unwrap_or("").to_string(),
            fridge_type: self.step2.fridge_type.map(|v| v.as_str()).unwrap_or("").to_string(),
            finish: self.step2.finish.map(|v| v.as_str()).unwrap_or("").to_string(),
            timeline: self.step3.timeline.map(|v| v.as_str()).unwrap_or("").to_string(),
            budget: self.step3.budget.map(|v| v.as_str()).unwrap_or("").to_string(),
            installation_preference: self
                .step3
                .installation_preference
                .map(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            name: self.step4.name.clone(),
            email: self.step4.email.clone(),
            phone: self.step4.phone.clone(),
            notes: self.step4.notes.clone(),
        }
    }

    fn validate_step1(&self) -> Result<(), String> {
        validate::require_selected("project type", &self.step1.project_type)
    }

    fn validate_step2(&self) -> Result<(), String> {
        validate::require_selected("base kit", &self.step2.base_kit)?;
        validate::require_selected("fridge option", &self.step2.fridge_type)?;
        validate::require_selected("finish", &self.step2.finish)?;
        Ok(())
    }

    fn validate_step3(&self) -> Result<(), String> {
        validate::require_selected("timeline", &self.step3.timeline)?;
        validate::require_selected("budget", &self.step3.budget)?;
        validate::require_selected(
            "installation preference",
            &self.step3.installation_preference,
        )?;

        // Direct re-check of the three step-3 fields against the live
        // values, independent of the validators above. All three must be
        // set before step 4 is reachable.
        if self.step3.timeline.is_none()
            || self.step3.budget.is_none()
            || self.step3.installation_preference.is_none()
        {
            return Err("Please complete timeline, budget, and installation preference".to_string());
        }
        Ok(())
    }

    fn validate_step4(&self) -> Result<(), String> {
        validate::require_filled("name", &self.step4.name)?;
        validate::require_email(&self.step4.email)?;
        validate::require_phone(&self.step4.phone)?;
        Ok(())
    }
}
