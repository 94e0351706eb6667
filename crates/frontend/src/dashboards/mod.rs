pub mod d400_tracking;
pub mod d401_performance;
pub mod d402_overview;
