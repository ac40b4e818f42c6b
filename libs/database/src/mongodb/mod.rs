mod connector;

pub use connector::{connect, MongoError};

#[cfg(feature = "config")]
pub use connector::connect_from_config;
