/// Transfer-Encoding representation
pub mod mechanism;

/// Content-Type representation
pub mod r#type;
