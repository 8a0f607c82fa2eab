pub mod compare;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod errors;
pub mod invoke;
pub mod marshal;
pub mod model;
pub mod report;
pub mod schema;

pub use marshal::list_node::ListNode;
