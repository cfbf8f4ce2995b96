//! Read-only status report.

use serde::Serialize;

use crate::model::{AgentStatus, Document, EpicStatus, Project, TicketStatus};

const TITLE_RULE_WIDTH: usize = 50;
const SECTION_RULE_WIDTH: usize = 30;

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub project: Project,
    pub epics: Vec<EpicProgress>,
    pub agents: Vec<AgentLine>,
    pub active_tickets: Vec<ActiveTicket>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EpicProgress {
    pub id: String,
    pub name: String,
    pub status: EpicStatus,
    pub tickets_complete: u32,
    pub tickets_total: u32,
    pub percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentLine {
    pub name: String,
    pub status: AgentStatus,
    pub current_ticket: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveTicket {
    pub id: String,
    pub title: String,
    pub status: TicketStatus,
    pub assigned_to: String,
}

/// Completion percentage, with empty epics counted as 0%.
pub fn progress_percent(complete: u32, total: u32) -> f64 {
    f64::from(complete) / f64::from(total.max(1)) * 100.0
}

impl StatusReport {
    pub fn build(doc: &Document) -> Self {
        let epics = doc
            .epics
            .values()
            .map(|epic| EpicProgress {
                id: epic.id.clone(),
                name: epic.name.clone(),
                status: epic.status,
                tickets_complete: epic.tickets_complete,
                tickets_total: epic.tickets_total,
                percent: progress_percent(epic.tickets_complete, epic.tickets_total),
            })
            .collect();

        let agents = doc
            .agents
            .iter()
            .map(|(name, agent)| AgentLine {
                name: name.clone(),
                status: agent.status,
                current_ticket: agent.current_ticket.clone(),
            })
            .collect();

        let active_tickets = doc
            .tickets
            .values()
            .filter(|ticket| ticket.status.is_active())
            .map(|ticket| ActiveTicket {
                id: ticket.id.clone(),
                title: ticket.title.clone(),
                status: ticket.status,
                assigned_to: ticket.assigned_to.clone(),
            })
            .collect();

        Self {
            project: doc.project.clone(),
            epics,
            agents,
            active_tickets,
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            String::new(),
            "📊 PROJECT STATUS".to_string(),
            "=".repeat(TITLE_RULE_WIDTH),
            format!("Phase: {}", self.project.phase),
            format!("Sprint: {}", self.project.current_sprint),
            format!("Risk Status: {}", self.project.risks_status),
        ];

        push_heading(&mut lines, "📈 EPICS PROGRESS");
        for epic in &self.epics {
            lines.push(format!(
                "{} {}: {} ({:.0}% - {}/{})",
                epic_indicator(epic.status),
                epic.id,
                epic.name,
                epic.percent,
                epic.tickets_complete,
                epic.tickets_total
            ));
        }

        push_heading(&mut lines, "👥 AGENT STATUS");
        for agent in &self.agents {
            lines.push(format!(
                "{} {}: {} | Current: {}",
                agent_indicator(agent.status),
                agent.name,
                agent.status,
                agent.current_ticket.as_deref().unwrap_or("None")
            ));
        }

        push_heading(&mut lines, "🎫 ACTIVE TICKETS");
        if self.active_tickets.is_empty() {
            lines.push("No active tickets".to_string());
        }
        for ticket in &self.active_tickets {
            let indicator = if ticket.status == TicketStatus::InProgress {
                "🔄"
            } else {
                "📋"
            };
            lines.push(format!(
                "{indicator} {}: {} ({})",
                ticket.id, ticket.title, ticket.assigned_to
            ));
        }

        lines.join("\n")
    }
}

fn push_heading(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.to_string());
    lines.push("-".repeat(SECTION_RULE_WIDTH));
}

fn epic_indicator(status: EpicStatus) -> &'static str {
    match status {
        EpicStatus::Complete => "🟢",
        EpicStatus::InProgress => "🟡",
        EpicStatus::Planned => "⚪",
    }
}

fn agent_indicator(status: AgentStatus) -> &'static str {
    match status {
        AgentStatus::Active => "🟢",
        AgentStatus::Available => "🟡",
        AgentStatus::Assigned => "⚪",
    }
}
