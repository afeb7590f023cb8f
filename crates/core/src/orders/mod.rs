pub mod service;

pub use service::OrderService;
