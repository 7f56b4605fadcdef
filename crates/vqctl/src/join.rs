use crate::output::{self, CliOutput, OutputType};
use crate::CliContext;
use anyhow::Context;
use virtual_queue::{ConflictType, JoinQueueResult};

#[derive(Debug, clap::Args)]
pub struct Join {
    /// ID of the queue to join.
    queue_id: String,
    /// ID of a guest to include in the party. May be repeated.
    /// If omitted, the preselected linked guests are used, or all
    /// linked guests when none are preselected.
    #[clap(long = "guest")]
    guests: Vec<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct ConflictRow {
    guest_id: String,
    conflict: ConflictType,
}

impl CliOutput for ConflictRow {
    fn table_headers() -> Vec<&'static str> {
        vec!["Guest ID", "Conflict"]
    }

    fn into_table_row(self) -> Vec<String> {
        vec![self.guest_id, self.conflict.to_string()]
    }
}

impl Join {
    pub async fn run(&self, ctx: &CliContext) -> anyhow::Result<()> {
        let client = ctx.client();

        let party = if self.guests.is_empty() {
            let linked = client
                .get_linked_guests(&self.queue_id)
                .await
                .context("failed to list linked guests")?;
            default_party(linked)
        } else {
            self.guests.clone()
        };
        anyhow::ensure!(!party.is_empty(), "there are no guests to join");

        tracing::info!(queue_id = %self.queue_id, party = party.len(), "joining queue");

        let result = client
            .join_queue(&self.queue_id, &party)
            .await
            .with_context(|| format!("failed to join queue {}", self.queue_id))?;

        print_result(ctx.output_type(), &result)?;

        match result.boarding_group {
            Some(_) => Ok(()),
            None if result.closed => anyhow::bail!("queue {} is closed", self.queue_id),
            None => anyhow::bail!("no guest of the party could join queue {}", self.queue_id),
        }
    }
}

/// Select the default party from linked guests: those who are preselected,
/// or everyone if no guest is preselected.
fn default_party(linked: Vec<virtual_queue::Guest>) -> Vec<String> {
    let preselected: Vec<String> = linked
        .iter()
        .filter(|guest| guest.is_preselected)
        .map(|guest| guest.guest_id.clone())
        .collect();

    if !preselected.is_empty() {
        return preselected;
    }
    linked.into_iter().map(|guest| guest.guest_id).collect()
}

fn print_result(output_type: OutputType, result: &JoinQueueResult) -> anyhow::Result<()> {
    match output_type {
        OutputType::Json => println!("{}", serde_json::to_string(result)?),
        OutputType::Yaml => print!("{}", serde_yaml::to_string(result)?),
        OutputType::Table => {
            match result.boarding_group {
                Some(boarding_group) => println!("Boarding group: {boarding_group}"),
                None if result.closed => println!("The queue is closed."),
                None => println!("No boarding group was obtained."),
            }
            if !result.conflicts.is_empty() {
                let rows = result
                    .conflicts
                    .iter()
                    .map(|(guest_id, conflict)| ConflictRow {
                        guest_id: guest_id.clone(),
                        conflict: *conflict,
                    });
                output::print_table(rows)?;
            }
        }
    }
    Ok(())
}
