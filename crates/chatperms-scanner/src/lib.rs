//! Keyword scanning and alerting for chatperms.

pub mod alert;
pub mod dispatch;
pub mod scan;

pub use alert::{AlertRecord, build_alert};
pub use dispatch::{
    ALERT_NOTIFICATION_TYPE, AlertPipeline, MessageEvent, ScanOutcome, send_alert,
};
pub use scan::scan_message;
