// Resume builder: the data model plus the form-editing session over it.

pub mod builder;
pub mod model;

pub use builder::{BuilderSession, BuilderStep};
pub use model::{
    EducationField, EducationItem, ExperienceField, ExperienceItem, ItemId, PersonalField,
    PersonalInfo, ProjectField, ProjectItem, ResumeData, SkillSet,
};
