//! different utility modules used throughout the project
/// command line flags parsed into a typed options bundle
pub mod cli;
/// logger setup plus file output: csv export of sampled series, timestamped save paths
pub mod logger;
/// parse task document with structure like "title key1: value1 key2: value2" into the options bundle
pub mod task_parser;
