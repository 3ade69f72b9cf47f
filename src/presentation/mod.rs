pub mod notifications;
pub mod table;
pub mod wasm_api;
