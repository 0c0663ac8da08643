//! mentorlink store
//!
//! libSQL persistence for mentors and students: the connection manager,
//! per-entity repositories, and the assignment rules that link the two.
//!
//! # Example
//!
//! ```no_run
//! use mentorlink_store::{NewMentor, NewStudent, Store};
//!
//! # async fn example() -> mentorlink_store::Result<()> {
//! let store = Store::open_local("mentorlink.db").await?;
//! let ada = store.create_mentor(NewMentor::new("Ada")).await?;
//! let lin = store.create_student(NewStudent::new("Lin")).await?;
//!
//! let ada = store.assign_student_to_mentor(&ada.id, &lin.id).await?;
//! assert_eq!(ada.students, vec![lin.id]);
//! # Ok(())
//! # }
//! ```

mod assignment;
pub mod error;
mod migrations;
pub mod models;
mod repos;
mod rows;
pub mod store;
mod test_support;

pub use error::{Result, RosterError};
pub use models::{is_valid_id, Mentor, NewMentor, NewStudent, Student, ID_LEN};
pub use store::{Store, StoreLocation};
