pub mod action;
pub mod campaign;
pub mod company;
pub mod lead;
pub mod meeting;
pub mod strategy;
pub mod user;
