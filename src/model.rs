//! Persisted document model.
//!
//! The whole project state lives in one JSON object:
//!
//! ```text
//! {
//!   "project": { "phase", "current_sprint", "risks_status" },
//!   "epics":   [ Epic, ... ]          # keyed by id, stored ordered by id
//!   "tickets": [ Ticket, ... ]        # keyed by id, stored ordered by id
//!   "agents":  { "<name>": Agent }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DEFAULT_PHASE: &str = "planning";
const DEFAULT_SPRINT: &str = "Setup";

/// Overall risk assessment of the project
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    #[default]
    Unknown,
    Green,
    Yellow,
    Red,
}

impl RiskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::Unknown => "unknown",
            RiskStatus::Green => "green",
            RiskStatus::Yellow => "yellow",
            RiskStatus::Red => "red",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EpicStatus {
    #[default]
    Planned,
    InProgress,
    Complete,
}

impl EpicStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpicStatus::Planned => "planned",
            EpicStatus::InProgress => "in_progress",
            EpicStatus::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Todo,
    Assigned,
    InProgress,
    DevComplete,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Todo => "todo",
            TicketStatus::Assigned => "assigned",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::DevComplete => "dev_complete",
        }
    }

    /// Tickets still waiting for or receiving work
    pub fn is_active(&self) -> bool {
        matches!(self, TicketStatus::Todo | TicketStatus::InProgress)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Assigned,
    Active,
    Available,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Assigned => "assigned",
            AgentStatus::Active => "active",
            AgentStatus::Available => "available",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub phase: String,
    pub current_sprint: String,
    #[serde(default)]
    pub risks_status: RiskStatus,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            phase: DEFAULT_PHASE.to_string(),
            current_sprint: DEFAULT_SPRINT.to_string(),
            risks_status: RiskStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Epic {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: EpicStatus,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub tickets_total: u32,
    #[serde(default)]
    pub tickets_complete: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub epic: String,
    pub assigned_to: String,
    pub status: TicketStatus,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "timestamp::deserialize_opt"
    )]
    pub started: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "timestamp::deserialize_opt"
    )]
    pub completed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub feature_docs: String,
    #[serde(default)]
    pub blocked_by: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Agent {
    pub current_ticket: Option<String>,
    pub status: AgentStatus,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub last_update: DateTime<Utc>,
}

/// The full persisted state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    #[serde(default)]
    pub project: Project,
    #[serde(default, with = "keyed")]
    pub epics: BTreeMap<String, Epic>,
    #[serde(default, with = "keyed")]
    pub tickets: BTreeMap<String, Ticket>,
    #[serde(default)]
    pub agents: BTreeMap<String, Agent>,
}

/// Records stored in a keyed collection know their own key.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Epic {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Ticket {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Keyed maps persisted as JSON arrays of records.
mod keyed {
    use std::collections::BTreeMap;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Keyed;

    pub fn serialize<S, T>(map: &BTreeMap<String, T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        serializer.collect_seq(map.values())
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Keyed,
    {
        let records = Vec::<T>::deserialize(deserializer)?;
        let mut map = BTreeMap::new();
        for record in records {
            let key = record.key().to_string();
            if map.contains_key(&key) {
                return Err(D::Error::custom(format!("duplicate id `{key}`")));
            }
            map.insert(key, record);
        }
        Ok(map)
    }
}

/// Timestamp parsing that also accepts naive ISO-8601 values (read as UTC).
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`")))
    }

    pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`"))),
            None => Ok(None),
        }
    }
}
