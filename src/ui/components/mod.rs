pub mod catalog;
pub mod flashcard;
pub mod menu;
pub mod picker;
pub mod quiz;
pub mod results;
