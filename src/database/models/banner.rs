use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A promotional banner record, stored in the `banner` table.
///
/// Field names on the wire and in the table follow the established schema
/// (`banner_id`, `urllink`), so existing clients keep working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Banner {
    #[serde(rename = "banner_id")]
    #[sqlx(rename = "banner_id")]
    pub id: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub resource: Option<i32>,
    #[serde(rename = "urllink", default)]
    #[sqlx(rename = "urllink")]
    pub link: Option<String>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

impl Banner {
    /// Only an explicit `true` counts; null and false are both unavailable.
    pub fn is_listed(&self) -> bool {
        self.is_available == Some(true)
    }
}
