use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use dotenv::dotenv;
use slotbook_client::{config::ClientConfig, runtime::FormEvent, start_widget};
use slotbook_core::{models::form::Page, view::SlotsView};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shows the bookable slots of a barber on a date and optionally picks one.
#[derive(Debug, Parser)]
#[command(name = "slotbook", version)]
struct Args {
    /// Barber (provider) id
    #[arg(long, default_value = "")]
    barber: String,

    /// Appointment date, YYYY-MM-DD
    #[arg(long, default_value = "")]
    date: String,

    /// Slot time to select, HH:MM
    #[arg(long)]
    select: Option<String>,

    /// Print the container markup instead of a text listing
    #[arg(long)]
    html: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Load configuration
    let config = ClientConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let ids = &config.element_ids;
    let page = Page::booking_form(ids, &args.barber, &args.date);

    let widget = start_widget(&config, &page)?
        .ok_or_else(|| eyre!("booking form elements not found"))?;

    // Wait for the load-time fetch, if any, to settle.
    let mut snapshot = widget
        .wait_for(|s| s.view != SlotsView::Loading)
        .await
        .ok_or_else(|| eyre!("slot picker stopped unexpectedly"))?;

    if let Some(time) = args.select {
        // Nothing is in flight any more, so the next snapshot answers the click.
        snapshot = widget
            .dispatch(FormEvent::SlotClicked(time.clone()))
            .await
            .ok_or_else(|| eyre!("slot picker stopped unexpectedly"))?;

        if snapshot.form.time_value() == time {
            info!("selected slot {}", time);
        } else {
            warn!("slot {} cannot be selected", time);
        }
    }

    if args.html {
        println!("{}", snapshot.view.to_html());
    } else {
        println!("{}", snapshot.view);
    }
    println!("appointment_time={}", snapshot.form.time_value());

    widget.shutdown().await;
    Ok(())
}
