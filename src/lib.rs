pub mod config;
pub mod conversions;
pub mod domain {
    pub mod context;
    pub mod event;
}
pub mod error;
pub mod service {
    pub mod conversion_forwarder;
}
pub mod taxonomy;
