//! `fridgeflow plan` -- one-shot planning to stdout, with an optional live
//! timeline.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use fridgeflow_core::{Mode, Plan, PlanRequest, Planner, StepStatus, Timeline, format_min_sec};

/// How `run_plan` should present its result.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOutput {
    pub json: bool,
    pub follow: bool,
}

/// Build a plan and print it as text or JSON.
pub async fn run_plan(
    planner: &Planner,
    ingredients: &str,
    time_limit_minutes: i64,
    mode: Mode,
    output: PlanOutput,
) -> Result<()> {
    let request = PlanRequest::new(ingredients, time_limit_minutes, mode);
    let plan = planner
        .plan(&request)
        .await
        .with_context(|| format!("{mode} planning failed"))?;

    if output.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&plan).context("failed to serialize plan")?
        );
    } else {
        print!("{}", render_plan(&plan));
    }

    if output.follow {
        follow_plan(&plan).await?;
    }
    Ok(())
}

/// Human-readable rendering of a plan.
pub fn render_plan(plan: &Plan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", plan.dish);
    let _ = writeln!(out, "{}", "=".repeat(plan.dish.chars().count()));
    let _ = writeln!(out);

    if plan.steps.is_empty() {
        let _ = writeln!(out, "  (no steps)");
    }
    for (i, step) in plan.steps.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. [{:>5} +{:>5}]  {}",
            i + 1,
            format_min_sec(step.start_offset_seconds),
            format_min_sec(step.duration_seconds),
            step.label
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  Total: {}", format_min_sec(plan.total_seconds()));

    if !plan.substitutions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Substitutions:");
        for tip in &plan.substitutions {
            let _ = writeln!(out, "  - {tip}");
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Tick once a second until every step is done or Ctrl+C. Each line read
/// from stdin pushes the schedule back.
async fn follow_plan(plan: &Plan) -> Result<()> {
    println!();
    println!("Timeline started. Press Enter when you fall behind, Ctrl+C to stop.");

    let started = Instant::now();
    let mut timeline = Timeline::new();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let wall = started.elapsed().as_secs();
                println!("{}", render_timeline(plan, &timeline, wall));
                if timeline.is_finished(plan, wall) {
                    break;
                }
            }
            line = stdin.next_line(), if stdin_open => {
                match line.context("failed to read stdin")? {
                    Some(_) => {
                        timeline.fall_behind();
                        tracing::info!(
                            drift_seconds = timeline.drift_seconds(),
                            "schedule pushed back"
                        );
                    }
                    None => stdin_open = false,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("timeline stopped");
                break;
            }
        }
    }
    Ok(())
}

/// One status line: the plan clock, then every step that is not done yet.
fn render_timeline(plan: &Plan, timeline: &Timeline, wall_seconds: u64) -> String {
    let elapsed = timeline.plan_elapsed(wall_seconds);
    let clock = format_min_sec(u32::try_from(elapsed.max(0)).unwrap_or(u32::MAX));

    let mut line = format!("[{clock:>5}]");
    if timeline.drift_seconds() > 0 {
        let _ = write!(line, " (+{} behind)", format_min_sec(timeline.drift_seconds()));
    }

    let open: Vec<String> = plan
        .steps
        .iter()
        .zip(timeline.statuses(plan, wall_seconds))
        .filter(|(_, status)| *status != StepStatus::Done)
        .map(|(step, status)| format!("{}: {status}", step.label))
        .collect();

    if open.is_empty() {
        line.push_str(" all steps done");
    } else {
        line.push(' ');
        line.push_str(&open.join(" | "));
    }
    line
}
