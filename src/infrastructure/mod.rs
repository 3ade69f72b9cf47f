pub mod charts;
pub mod http;
pub mod services;
pub mod websocket;
