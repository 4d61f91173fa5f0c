pub mod aggregate_daily_stats;
