pub mod announcement;
pub mod building;
pub mod calendar;
pub mod error;
pub mod events;
pub mod expense;
pub mod ids;
pub mod message;
pub mod reservation;
pub mod user;
pub mod visitor;
