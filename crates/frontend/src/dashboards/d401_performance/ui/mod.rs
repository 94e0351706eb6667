mod page;

pub use page::PerformancePage;
