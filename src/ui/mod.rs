pub mod inspect;
pub mod panels;
pub mod plot;
