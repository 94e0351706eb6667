mod page;

pub use page::TrackingPage;
