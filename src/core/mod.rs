//! Core marketplace entities and their validation rules

pub mod brief;
pub mod portfolio;
pub mod profile;
pub mod review;
pub mod user;
pub mod validation;

pub use brief::{Brief, BriefPatch, BriefStatus, NewBrief};
pub use portfolio::{NewPortfolioItem, PortfolioItem, PortfolioPatch};
pub use profile::{EditorProfile, NewProfile, ProfessionalTag, ProfessionalType, ProfilePatch};
pub use review::{NewReview, RatingSummary, Review};
pub use user::{NewUser, User, UserPatch, UserPublic, UserType};
