//! Command orchestration from UI actions to the backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues a command for the backend worker. On failure returns the message to show the user.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err("UI command queue is full; please retry".to_string()),
        Err(TrySendError::Disconnected(_)) => Err(
            "Backend worker is not running (possible startup failure); restart the app".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::ExportJob;
    use crossbeam_channel::bounded;
    use shared::domain::NegotiationRequest;

    fn start_command() -> BackendCommand {
        BackendCommand::StartNegotiation {
            request: NegotiationRequest {
                item: "Laptop".to_string(),
                buyer_max: 1000.0,
                seller_min: 800.0,
            },
        }
    }

    #[test]
    fn queues_commands_while_backend_is_listening() {
        let (tx, rx) = bounded(1);
        dispatch_backend_command(&tx, start_command()).expect("queued");
        assert!(matches!(
            rx.try_recv(),
            Ok(BackendCommand::StartNegotiation { .. })
        ));
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = bounded(1);
        dispatch_backend_command(&tx, start_command()).expect("queued");
        let err = dispatch_backend_command(&tx, start_command()).unwrap_err();
        assert!(err.contains("queue is full"));
    }

    #[test]
    fn reports_disconnected_backend() {
        let (tx, rx) = bounded::<BackendCommand>(1);
        drop(rx);
        let job = ExportJob {
            negotiation: agreed_result(),
            filename: "negotiation_report_Laptop.pdf".to_string(),
        };
        let err = dispatch_backend_command(&tx, BackendCommand::GenerateReport { job }).unwrap_err();
        assert!(err.contains("not running"));
    }

    fn agreed_result() -> shared::domain::NegotiationResult {
        shared::domain::NegotiationResult {
            status: "agreed".to_string(),
            item: "Laptop".to_string(),
            final_price: Some(900.0),
            reason: None,
            summary: None,
            analysis: None,
            rounds: Some(Vec::new()),
            extra: Default::default(),
        }
    }
}
