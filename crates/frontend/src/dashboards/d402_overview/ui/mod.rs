mod page;

pub use page::OverviewDashboard;
