pub mod clients;
pub mod components;
pub mod dashboard;
pub mod form;
pub mod layout;
pub mod list_view;
pub mod reservations;
pub mod vehicles;
