//! Build-enquiry wizard module.
//!
//! The 4-step form state machine, its field validators, and URL pre-fill.

mod prefill;
mod state;
pub mod validate;

pub use state::{
    BaseKit, Budget, BuildEnquiry, BuildWizard, EnquirySink, Finish, FridgeType,
    InstallationPreference, ProjectType, StepFour, StepOne, StepThree, StepTwo, Timeline,
    WizardPhase, WizardStep,
};
