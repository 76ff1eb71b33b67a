pub mod report;
pub mod resume;

pub use report::{ContentSignals, Rating, ScoreDetails, ScoreReport, SectionScore};
pub use resume::{
    Contact, EducationEntry, Job, ParseOutcome, ParseWarning, ResumeRecord, Subproject,
    WarningKind,
};
