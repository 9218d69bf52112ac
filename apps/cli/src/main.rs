use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    export::default_download_dir, notifications::NotificationCenter, run_export,
    settings::load_settings, HttpNegotiationClient, NegotiationApi, NegotiationController,
    NegotiationForm, NotificationKind,
};
use tracing_subscriber::EnvFilter;

const TICK: Duration = Duration::from_millis(100);

/// Run one automatic negotiation and print the report.
#[derive(Parser, Debug)]
#[command(name = "negotiate")]
struct Args {
    /// Overrides `server_url` from negotiation_desk.toml / environment.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    item: String,
    #[arg(long, allow_hyphen_values = true)]
    buyer_max: String,
    #[arg(long, allow_hyphen_values = true)]
    seller_min: String,
    /// Also download the PDF report.
    #[arg(long)]
    pdf: bool,
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let server_url = settings.validated_server_url()?;
    let client = HttpNegotiationClient::new(server_url.as_str())
        .with_context(|| format!("failed to set up client for {server_url}"))?;
    tracing::info!(server = %client.base_url(), "using negotiation service");
    let mut controller =
        NegotiationController::new(NotificationCenter::new(settings.notification_ttl));
    let mut announced = 0;

    let form = NegotiationForm::new(args.item, args.buyer_max, args.seller_min);
    let Some(request) = controller.begin_negotiation(&form, Instant::now()) else {
        announce(&controller, &mut announced);
        bail!("negotiation was not started");
    };

    let mut ticker = tokio::time::interval(TICK);
    let mut shown_step = None;
    let outcome = {
        let call = client.start_negotiation(&request);
        tokio::pin!(call);
        loop {
            tokio::select! {
                outcome = &mut call => break outcome,
                _ = ticker.tick() => {
                    controller.poll(Instant::now());
                    show_progress(&controller, &mut shown_step);
                }
            }
        }
    };
    controller.finish_negotiation(outcome, Instant::now());

    while controller.reveal_deadline().is_some() {
        ticker.tick().await;
        controller.poll(Instant::now());
        show_progress(&controller, &mut shown_step);
    }
    announce(&controller, &mut announced);

    let Some(report) = controller.report() else {
        bail!("negotiation did not produce results");
    };
    println!();
    println!("{report}");

    if args.pdf {
        let dir = args
            .output_dir
            .or(settings.download_dir)
            .unwrap_or_else(default_download_dir);
        let saved = run_export(&mut controller, &client, &dir).await;
        announce(&controller, &mut announced);
        match saved {
            Some(path) => println!("Saved {}", path.display()),
            None => bail!("PDF report was not saved"),
        }
    }

    Ok(())
}

fn show_progress(controller: &NegotiationController, shown_step: &mut Option<usize>) {
    let Some(sequencer) = controller.loading() else {
        return;
    };
    let step = sequencer.current_step();
    if *shown_step != Some(step) {
        *shown_step = Some(step);
        println!(
            "[{:>3.0}%] {}",
            sequencer.progress() * 100.0,
            sequencer.current().text
        );
    }
}

fn announce(controller: &NegotiationController, announced: &mut u64) {
    for notification in controller.notifications().since(*announced) {
        match notification.kind {
            NotificationKind::Error | NotificationKind::Warning => {
                eprintln!("{} {}", notification.kind.icon(), notification.message)
            }
            NotificationKind::Success | NotificationKind::Info => {
                println!("{} {}", notification.kind.icon(), notification.message)
            }
        }
    }
    *announced = controller.notifications().last_id();
}
