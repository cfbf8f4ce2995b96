//! pm epic command implementation

use chrono::Utc;

use crate::cli::Context;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};

/// Options for `pm epic`
pub struct CreateOptions {
    pub id: String,
    pub name: String,
    pub description: String,
}

pub fn run_create(ctx: &Context, options: CreateOptions) -> Result<()> {
    let now = Utc::now();
    let epic = ctx.store.update(|doc| {
        doc.create_epic(&options.id, &options.name, &options.description, now)
            .cloned()
    })?;
    tracing::info!(epic = %epic.id, "epic created");

    let mut human = HumanOutput::new(format!("✅ Epic created: {} - {}", epic.id, epic.name));
    human.push_next_step(format!("pm ticket <id> {} <title> <agent>", epic.id));

    emit_success(ctx.output, "epic", &epic, Some(&human))?;

    Ok(())
}
