pub mod result_aggregator;
