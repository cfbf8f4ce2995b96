//! Board operations: the state transitions for epics, tickets, and agents.
//!
//! Every operation runs all of its checks before touching the document, so
//! an `Err` always means the document is unchanged.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::model::{
    Agent, AgentStatus, Document, Epic, EpicStatus, RiskStatus, Ticket, TicketStatus,
};

/// Input for [`Document::create_ticket`]
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub id: String,
    pub epic: String,
    pub title: String,
    pub agent: String,
    pub description: String,
}

/// Anchor into the features document for a ticket title.
///
/// `"User Login"` under `docs/features.md` becomes
/// `docs/features.md#user-login`.
pub fn feature_docs_anchor(features_doc: &str, title: &str) -> String {
    format!("{features_doc}#{}", title.to_lowercase().replace(' ', "-"))
}

impl Document {
    pub fn create_epic(
        &mut self,
        id: &str,
        name: &str,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<&Epic> {
        if self.epics.contains_key(id) {
            return Err(Error::DuplicateEpic(id.to_string()));
        }

        let epic = Epic {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            status: EpicStatus::Planned,
            created: now,
            tickets_total: 0,
            tickets_complete: 0,
        };
        Ok(&*self.epics.entry(id.to_string()).or_insert(epic))
    }

    pub fn create_ticket(
        &mut self,
        new: NewTicket,
        features_doc: &str,
        now: DateTime<Utc>,
    ) -> Result<&Ticket> {
        let Some(epic) = self.epics.get_mut(&new.epic) else {
            return Err(Error::EpicNotFound(new.epic));
        };
        if self.tickets.contains_key(&new.id) {
            return Err(Error::DuplicateTicket(new.id));
        }

        epic.tickets_total += 1;

        let ticket = Ticket {
            feature_docs: feature_docs_anchor(features_doc, &new.title),
            id: new.id.clone(),
            title: new.title,
            epic: new.epic,
            assigned_to: new.agent,
            status: TicketStatus::Todo,
            description: new.description,
            created: now,
            started: None,
            completed: None,
            files: Vec::new(),
            blocked_by: Vec::new(),
            dependencies: Vec::new(),
        };
        Ok(&*self.tickets.entry(new.id).or_insert(ticket))
    }

    /// Hand a ticket to `agent`, replacing whatever the agent was tracking.
    pub fn assign_ticket(
        &mut self,
        ticket_id: &str,
        agent: &str,
        now: DateTime<Utc>,
    ) -> Result<&Ticket> {
        let ticket = self
            .tickets
            .get_mut(ticket_id)
            .ok_or_else(|| Error::TicketNotFound(ticket_id.to_string()))?;

        ticket.assigned_to = agent.to_string();
        ticket.status = TicketStatus::Assigned;

        self.agents.insert(
            agent.to_string(),
            Agent {
                current_ticket: Some(ticket_id.to_string()),
                status: AgentStatus::Assigned,
                last_update: now,
            },
        );
        Ok(&self.tickets[ticket_id])
    }

    pub fn start_ticket(
        &mut self,
        ticket_id: &str,
        agent: &str,
        now: DateTime<Utc>,
    ) -> Result<&Ticket> {
        let ticket = self.owned_ticket_mut(ticket_id, agent)?;
        ticket.status = TicketStatus::InProgress;
        ticket.started = Some(now);

        self.agents.insert(
            agent.to_string(),
            Agent {
                current_ticket: Some(ticket_id.to_string()),
                status: AgentStatus::Active,
                last_update: now,
            },
        );
        Ok(&self.tickets[ticket_id])
    }

    /// Mark a ticket dev-complete and free its agent.
    ///
    /// `files` replaces the ticket's file list only when non-empty. The epic
    /// counter is not clamped and a repeated completion counts again.
    pub fn complete_ticket(
        &mut self,
        ticket_id: &str,
        agent: &str,
        files: Option<Vec<String>>,
        now: DateTime<Utc>,
    ) -> Result<&Ticket> {
        let ticket = self.owned_ticket_mut(ticket_id, agent)?;
        if ticket.status == TicketStatus::DevComplete {
            tracing::warn!(
                ticket = ticket_id,
                "ticket completed again; epic progress counts it twice"
            );
        }

        ticket.status = TicketStatus::DevComplete;
        ticket.completed = Some(now);
        if let Some(files) = files.filter(|files| !files.is_empty()) {
            ticket.files = files;
        }
        let epic_id = ticket.epic.clone();

        match self.epics.get_mut(&epic_id) {
            Some(epic) => epic.tickets_complete += 1,
            None => tracing::warn!(
                ticket = ticket_id,
                epic = %epic_id,
                "ticket references a missing epic"
            ),
        }

        self.agents.insert(
            agent.to_string(),
            Agent {
                current_ticket: None,
                status: AgentStatus::Available,
                last_update: now,
            },
        );
        Ok(&self.tickets[ticket_id])
    }

    pub fn set_risk_status(&mut self, status: RiskStatus) {
        self.project.risks_status = status;
    }

    fn owned_ticket_mut(&mut self, ticket_id: &str, agent: &str) -> Result<&mut Ticket> {
        let ticket = self
            .tickets
            .get_mut(ticket_id)
            .ok_or_else(|| Error::TicketNotFound(ticket_id.to_string()))?;

        if ticket.assigned_to != agent {
            return Err(Error::NotAssigned {
                ticket: ticket_id.to_string(),
                assigned_to: ticket.assigned_to.clone(),
                agent: agent.to_string(),
            });
        }
        Ok(ticket)
    }
}
