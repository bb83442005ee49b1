pub mod announcement_service;
pub mod auth_service;
pub mod directory_service;
pub mod error;
pub mod expense_service;
pub mod forms;
pub mod message_service;
pub mod reservation_service;
pub mod visitor_service;
