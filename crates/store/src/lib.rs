//! # VidaLeve Store
//!
//! Persistence seam for the VidaLeve service.
//!
//! The hosted relational store is an external collaborator; this crate
//! abstracts it behind the [`UserRepository`] trait so any relational or
//! document store can satisfy it, and ships an in-memory implementation used
//! by the server default and the tests.
//!
//! [`AccountService`] layers the account flows (registration, login, password
//! reset, weight tracking) over the repository, with salted one-way password
//! hashing.

pub mod accounts;
pub mod error;
pub mod memory;
pub mod password;
pub mod repository;

pub use accounts::AccountService;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryRepository;
pub use repository::{PlanType, ResetToken, User, UserRepository, WeightEntry};
