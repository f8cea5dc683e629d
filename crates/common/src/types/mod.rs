use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
}
