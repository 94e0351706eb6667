pub mod form;
pub mod modal;
pub mod stat_card;
