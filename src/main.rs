use barberhub_client::{BookingForm, ClientConfig, HttpApi};
use barberhub_core::models::{
    appointment::{ClientId, EstablishmentId},
    service::ServiceId,
    time_slot::TimeSlot,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Check availability and book appointments at a BarberHub establishment
#[derive(Parser, Debug)]
#[command(name = "barberhub", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the dates open for booking
    Dates {
        #[arg(long)]
        establishment: EstablishmentId,
        /// Reference day (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// List the start times available on a date for the chosen services
    Slots {
        #[arg(long)]
        establishment: EstablishmentId,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long = "service", required = true)]
        services: Vec<ServiceId>,
    },
    /// Book an appointment
    Book {
        #[arg(long)]
        client: ClientId,
        #[arg(long)]
        establishment: EstablishmentId,
        #[arg(long)]
        date: NaiveDate,
        /// Start time as HH:MM
        #[arg(long)]
        time: TimeSlot,
        #[arg(long = "service", required = true)]
        services: Vec<ServiceId>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = ClientConfig::from_env()?;

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let api = HttpApi::new(&config)?;
    info!("Using BarberHub API at {}", api.base_url());

    match cli.command {
        Command::Dates { establishment, today } => {
            let form = BookingForm::load(&api, 0, establishment)
                .await?
                .with_policy(config.booking_policy());
            let today = today.unwrap_or_else(|| Local::now().date_naive());

            let dates = form.selectable_dates(today);
            if dates.is_empty() {
                println!("No dates open for booking in the next {} days", config.horizon_days);
            }
            for date in dates {
                println!("{} {}", date, date.format("%A"));
            }
        }
        Command::Slots {
            establishment,
            date,
            services,
        } => {
            let mut form = BookingForm::load(&api, 0, establishment)
                .await?
                .with_policy(config.booking_policy());
            form.set_services(&services)?;
            form.select_date(Some(date));

            println!(
                "{} minutes of service, total {:.2}",
                form.total_duration_minutes(),
                form.total_price()
            );
            if form.available_times().is_empty() {
                println!("No times available on {}", date);
            }
            for slot in form.available_times() {
                println!("{}", slot);
            }
        }
        Command::Book {
            client,
            establishment,
            date,
            time,
            services,
        } => {
            let mut form = BookingForm::load(&api, client, establishment)
                .await?
                .with_policy(config.booking_policy());

            let today = Local::now().date_naive();
            if !form.is_date_selectable(date, today) {
                return Err(eyre!("{} is not open for booking", date));
            }

            form.set_services(&services)?;
            form.select_date(Some(date));
            form.select_time(time);

            let appointment = form.submit(&api, Local::now().naive_local()).await?;
            println!("Booked appointment {} on {} at {}", appointment.id, date, time);
        }
    }

    Ok(())
}
