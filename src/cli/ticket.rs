//! pm ticket lifecycle commands: create, assign, start, complete.

use chrono::Utc;
use serde::Serialize;

use crate::board::NewTicket;
use crate::cli::Context;
use crate::error::Result;
use crate::model::{Agent, Ticket, TicketStatus};
use crate::output::{emit_success, HumanOutput};

/// Options for `pm ticket`
pub struct CreateOptions {
    pub id: String,
    pub epic_id: String,
    pub title: String,
    pub agent: String,
    pub description: String,
}

/// Options for `pm assign`
pub struct AssignOptions {
    pub ticket_id: String,
    pub agent: String,
}

/// Options for `pm start`
pub struct StartOptions {
    pub ticket_id: String,
    pub agent: String,
}

/// Options for `pm complete`
pub struct CompleteOptions {
    pub ticket_id: String,
    pub agent: String,
    pub files: Option<Vec<String>>,
}

/// Ticket plus the agent entry written alongside it
#[derive(Serialize)]
struct TicketUpdateReport {
    ticket: Ticket,
    agent: String,
    agent_state: Agent,
}

pub fn run_create(ctx: &Context, options: CreateOptions) -> Result<()> {
    let now = Utc::now();
    let features_doc = ctx.config.docs.features.as_str();
    let new = NewTicket {
        id: options.id,
        epic: options.epic_id,
        title: options.title,
        agent: options.agent,
        description: options.description,
    };

    let ticket = ctx
        .store
        .update(|doc| doc.create_ticket(new, features_doc, now).cloned())?;
    tracing::info!(ticket = %ticket.id, epic = %ticket.epic, "ticket created");

    let mut human = HumanOutput::new(format!(
        "🎫 Ticket created: {} - {} (assigned to {})",
        ticket.id, ticket.title, ticket.assigned_to
    ));
    human.push_detail(format!("feature docs: {}", ticket.feature_docs));
    human.push_next_step(format!("pm start {} {}", ticket.id, ticket.assigned_to));

    emit_success(ctx.output, "ticket", &ticket, Some(&human))?;

    Ok(())
}

pub fn run_assign(ctx: &Context, options: AssignOptions) -> Result<()> {
    let now = Utc::now();
    let report = ctx.store.update(|doc| {
        let ticket = doc
            .assign_ticket(&options.ticket_id, &options.agent, now)?
            .clone();
        Ok(update_report(doc.agents[&options.agent].clone(), ticket, &options.agent))
    })?;
    tracing::info!(ticket = %report.ticket.id, agent = %report.agent, "ticket assigned");

    let mut human = HumanOutput::new(format!(
        "👤 Ticket {} assigned to {}",
        report.ticket.id, report.agent
    ));
    human.push_next_step(format!("pm start {} {}", report.ticket.id, report.agent));

    emit_success(ctx.output, "assign", &report, Some(&human))?;

    Ok(())
}

pub fn run_start(ctx: &Context, options: StartOptions) -> Result<()> {
    let now = Utc::now();
    let report = ctx.store.update(|doc| {
        let ticket = doc
            .start_ticket(&options.ticket_id, &options.agent, now)?
            .clone();
        Ok(update_report(doc.agents[&options.agent].clone(), ticket, &options.agent))
    })?;
    tracing::info!(ticket = %report.ticket.id, agent = %report.agent, "ticket started");

    let mut human = HumanOutput::new(format!(
        "🚀 {} started working on {}",
        report.agent, report.ticket.id
    ));
    human.push_next_step(format!(
        "📝 Don't forget to update {} with progress!",
        ctx.config.docs.features
    ));

    emit_success(ctx.output, "start", &report, Some(&human))?;

    Ok(())
}

pub fn run_complete(ctx: &Context, options: CompleteOptions) -> Result<()> {
    let now = Utc::now();
    let (report, completed_before) = ctx.store.update(|doc| {
        let completed_before = doc
            .tickets
            .get(&options.ticket_id)
            .is_some_and(|ticket| ticket.status == TicketStatus::DevComplete);
        let ticket = doc
            .complete_ticket(&options.ticket_id, &options.agent, options.files.clone(), now)?
            .clone();
        let report = update_report(doc.agents[&options.agent].clone(), ticket, &options.agent);
        Ok((report, completed_before))
    })?;
    tracing::info!(ticket = %report.ticket.id, agent = %report.agent, "ticket completed");

    let mut human = HumanOutput::new(format!(
        "✅ {} completed {}",
        report.agent, report.ticket.id
    ));
    if !report.ticket.files.is_empty() {
        human.push_detail(format!("files: {}", report.ticket.files.join(", ")));
    }
    if completed_before {
        human.push_warning(format!(
            "{} was already dev_complete; epic {} counted it again",
            report.ticket.id, report.ticket.epic
        ));
    }
    human.push_next_step(format!(
        "📝 Remember to update {} with final implementation details!",
        ctx.config.docs.features
    ));

    emit_success(ctx.output, "complete", &report, Some(&human))?;

    Ok(())
}

fn update_report(agent_state: Agent, ticket: Ticket, agent: &str) -> TicketUpdateReport {
    TicketUpdateReport {
        ticket,
        agent: agent.to_string(),
        agent_state,
    }
}
