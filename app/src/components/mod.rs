//! Page sections and the pieces they share

mod about;
mod contact;
mod education;
mod experience;
mod header;
mod home;
mod lazy_image;
mod leadership;
mod projects;
mod section;

pub use about::About;
pub use contact::Contact;
pub use education::Education;
pub use experience::Experience;
pub use header::Header;
pub use home::Home;
pub use leadership::Leadership;
pub use projects::{ProjectModal, Projects};
