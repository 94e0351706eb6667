pub mod d400_tracking;
pub mod d401_performance;
