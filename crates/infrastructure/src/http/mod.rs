//! HTTP adapters.

mod body_builder;
mod reqwest_transport;

pub use body_builder::build_form;
pub use reqwest_transport::ReqwestTransport;
