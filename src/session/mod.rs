pub mod catalog;
pub mod flashcard;
pub mod quiz;
