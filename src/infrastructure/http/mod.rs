pub mod annotation_api;
pub mod stock_data_api;

pub use annotation_api::{AnnotationApi, NewAnnotation};
pub use stock_data_api::{summary_to_json, DownloadRequest, StockDataApi, StockSummaryRow};
