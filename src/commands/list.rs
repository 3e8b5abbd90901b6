use super::Host;
use crate::Result;
use crate::dispatch::DispatchTable;
use crate::metrics::{MetricId, find_definition};
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Also print each metric's description
    #[arg(long)]
    pub describe: bool,
}

/// Print every `(metric, backend)` binding available in this build.
pub fn list_bindings<H: Host>(host: &mut H, args: &ListArgs) -> Result<()> {
    write_bindings(&mut host.output(), DispatchTable::global(), args.describe).into_app_err("writing dispatch table")
}

fn write_bindings(out: &mut impl Write, dispatch: &DispatchTable, describe: bool) -> std::io::Result<()> {
    let mut current: Option<&MetricId> = None;

    for (key, kind) in dispatch.bindings() {
        if current != Some(&key.metric) {
            current = Some(&key.metric);
            writeln!(out, "{}", key.metric)?;
            if describe && let Some(def) = find_definition(key.metric.as_str()) {
                writeln!(out, "  {}", def.description)?;
            }
        }

        writeln!(out, "  {:<12} {kind}", key.backend.to_string())?;
    }

    Ok(())
}
