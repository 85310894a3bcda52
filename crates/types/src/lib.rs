pub mod color;
pub mod opinion;
pub mod report;

pub use color::Color;
pub use opinion::{TechnicalOpinion, Topic, TopicImage};
pub use report::{Finding, Report, ReportMeta, Section, Subsection};
