//! pm status command implementation
//!
//! Provides a single-pane summary of the project, its epics, agents, and
//! the tickets still open for work.

use crate::cli::Context;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::report::StatusReport;

pub fn run(ctx: &Context) -> Result<()> {
    let doc = ctx.store.load()?;
    let report = StatusReport::build(&doc);

    let mut human = HumanOutput::new(report.render());

    for epic in &report.epics {
        if epic.tickets_complete > epic.tickets_total {
            human.push_warning(format!(
                "epic {} counts {} completed of {} tickets",
                epic.id, epic.tickets_complete, epic.tickets_total
            ));
        }
    }

    if report.epics.is_empty() {
        human.push_next_step("pm epic <id> <name> <description...>");
    }

    emit_success(ctx.output, "status", &report, Some(&human))?;

    Ok(())
}
