//! Background jobs.

pub mod rating_email_sweep;
pub mod scheduler;

pub use rating_email_sweep::RatingEmailSweepJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
