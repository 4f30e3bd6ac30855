pub mod admin;
pub mod bed;
pub mod booking;
pub mod hospital;
pub mod patient;
