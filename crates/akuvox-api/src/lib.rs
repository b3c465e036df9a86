// akuvox-api: Async Rust client for the Akuvox SmartPlus cloud API

pub mod auth;
pub mod client;
pub mod communities;
pub mod devices;
pub mod error;
pub mod models;
pub mod region;
pub mod result_code;
pub mod transport;

pub use client::{CloudClient, Credentials, RequestOptions};
pub use devices::Devices;
pub use error::Error;
pub use models::{Community, Device, DeviceStatus, DeviceType};
pub use region::Subdomain;
pub use transport::{TlsMode, TransportConfig};
