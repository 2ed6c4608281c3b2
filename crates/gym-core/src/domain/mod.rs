//! # Gym Core - Domain Module
//!
//! Entities, read models and the writable column set of each table.

pub mod user;
pub mod member;
pub mod package;
pub mod checkin;
pub mod payment;

pub use user::{NewUser, User, UserField, UserInfo};
pub use member::{Member, MemberDetail, MemberField, MemberSummary, NewMember};
pub use package::{NewPackage, Package, PackageField};
pub use checkin::{Checkin, CheckinView, NewCheckin};
pub use payment::{NewPayment, Payment, PaymentField, PaymentView};
