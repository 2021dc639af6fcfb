//! Repositories: the domain operations over a [`careers_core::store::CareersStore`].
//!
//! Each repository borrows its collaborators, so building one per request is
//! free.

pub mod applicants;
pub mod jobs;
pub mod subscribers;

pub use applicants::ApplicantRepository;
pub use jobs::JobRepository;
pub use subscribers::SubscriberRepository;
