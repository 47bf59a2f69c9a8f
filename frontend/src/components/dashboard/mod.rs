pub mod advanced_analytics;
pub mod performance_benchmarking;
pub mod real_analytics;
pub mod real_time_call_monitor;
pub mod timeframe_selector;
pub mod trend_chart;

pub use advanced_analytics::AdvancedAnalytics;
pub use performance_benchmarking::PerformanceBenchmarking;
pub use real_analytics::RealAnalytics;
pub use real_time_call_monitor::RealTimeCallMonitor;
pub use timeframe_selector::TimeframeSelector;
pub use trend_chart::TrendChart;
