//! pm risks / update_risk_status command implementation

use serde::Serialize;

use crate::cli::Context;
use crate::error::Result;
use crate::model::RiskStatus;
use crate::output::{emit_success, HumanOutput};
use crate::risk::{parse_risk_status, risk_indicator, RiskDocument, SETTABLE_RISK_STATUSES};

#[derive(Serialize)]
struct RiskUpdateReport {
    risks_status: RiskStatus,
}

/// Check for the risk assessment document and point at the update command
pub fn run_show(ctx: &Context) -> Result<()> {
    let document = RiskDocument::check(&ctx.config, &ctx.root);
    let path = document.path.display().to_string();

    let human = if document.found {
        let mut human = HumanOutput::new(format!("📋 Risk assessment file found: {path}"));
        human.push_next_step("🔍 Please review risk status and update project status:");
        human.push_next_step(format!(
            "pm update_risk_status [{}]",
            SETTABLE_RISK_STATUSES.join("|")
        ));
        human
    } else {
        let mut human = HumanOutput::new(format!("⚠️  No {path} file found!"));
        human.push_next_step("📝 Create risk assessment first");
        human
    };

    emit_success(ctx.output, "risks", &document, Some(&human))?;

    Ok(())
}

pub fn run_update(ctx: &Context, value: &str) -> Result<()> {
    let status = parse_risk_status(value)?;
    ctx.store.update(|doc| {
        doc.set_risk_status(status);
        Ok(())
    })?;
    tracing::info!(risks_status = %status, "risk status updated");

    let human = HumanOutput::new(format!(
        "{} Risk status updated to: {status}",
        risk_indicator(status)
    ));

    emit_success(
        ctx.output,
        "update_risk_status",
        &RiskUpdateReport {
            risks_status: status,
        },
        Some(&human),
    )?;

    Ok(())
}
