pub mod cards;
pub mod popup;
pub mod tables;
