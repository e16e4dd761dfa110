/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// User ids are opaque strings issued by the upstream CRM API.
pub type UserId = String;
