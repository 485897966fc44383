// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use shelter_queue::{
    adopt_in_order, certificates_json, import_intake_csv, listing_json, render_listing,
    rng_from_seed, Adopter, AdoptionDesk, RosterGenerator, ShelterConfig, ShelterRegistry,
    NO_ANIMALS_MESSAGE,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Animal shelter intake and adoption queue", long_about = None)]
struct Cli {
    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the mock roster (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Admit animals from an intake CSV (Name,Species,Breed,Age,Sex,Intake_Date)
    #[arg(long)]
    intake: Option<PathBuf>,

    /// Skip the mock roster (use with --intake)
    #[arg(long)]
    no_mock: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive adoption at the console (default)
    Adopt,
    /// Serve the configured adopters in order, oldest animal first
    Demo {
        /// Print the issued certificates as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the current shelter listing
    List {
        /// Print as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Browse and adopt in a terminal UI
    Tui {
        /// Adopter name printed on certificates
        #[arg(long, default_value = "Guest")]
        adopter: String,

        /// Adopter contact (email or phone)
        #[arg(long, default_value = "")]
        contact: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => ShelterConfig::from_file(path)?,
        None => ShelterConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let today = Local::now().date_naive();
    let mut registry = build_registry(&cli, &config, today)?;

    match cli.command.unwrap_or(Commands::Adopt) {
        Commands::Adopt => run_adopt(&mut registry, &config, today)?,
        Commands::Demo { json: false } => run_demo(&mut registry, &config, today),
        Commands::Demo { json: true } => {
            let adopters = demo_adopters(&config);
            let certificates = adopt_in_order(&mut registry, &adopters, today, &config.center_name);
            println!("{}", certificates_json(&certificates)?);
        }
        Commands::List { json: false } => print!("{}", render_listing(&registry)),
        Commands::List { json: true } => println!("{}", listing_json(&registry)?),
        Commands::Tui { adopter, contact } => {
            run_ui_mode(registry, Adopter::new(adopter, contact), &config, today)?
        }
    }

    Ok(())
}

fn build_registry(cli: &Cli, config: &ShelterConfig, today: NaiveDate) -> Result<ShelterRegistry> {
    let mut registry = ShelterRegistry::new();

    if !cli.no_mock {
        let mut rng = rng_from_seed(config.seed);
        RosterGenerator::new(config, today).populate(&mut registry, &mut rng);
    }

    if let Some(path) = &cli.intake {
        import_intake_csv(&mut registry, path, today)?;
    }

    Ok(registry)
}

fn run_adopt(registry: &mut ShelterRegistry, config: &ShelterConfig, today: NaiveDate) -> Result<()> {
    let stdin = io::stdin();
    let mut desk = AdoptionDesk::new(stdin.lock(), io::stdout(), config.center_name.clone());
    desk.run(registry, today)?;
    Ok(())
}

fn run_demo(registry: &mut ShelterRegistry, config: &ShelterConfig, today: NaiveDate) {
    println!("Initial Animal Shelter State ({} animals):", registry.total());
    print!("{}", render_listing(registry));

    println!("\nAdopting animals...");
    let adopters = demo_adopters(config);

    let certificates = adopt_in_order(registry, &adopters, today, &config.center_name);
    for certificate in &certificates {
        println!("{}", certificate);
        println!("------------------------------");
    }
    if certificates.len() < adopters.len() {
        println!("{}", NO_ANIMALS_MESSAGE);
    }

    println!("\nAnimal Shelter State After Adoptions:");
    print!("{}", render_listing(registry));
}

fn demo_adopters(config: &ShelterConfig) -> Vec<Adopter> {
    config
        .demo_adopters
        .iter()
        .map(|name| Adopter::new(name.clone(), ""))
        .collect()
}

#[cfg(feature = "tui")]
fn run_ui_mode(
    registry: ShelterRegistry,
    adopter: Adopter,
    config: &ShelterConfig,
    today: NaiveDate,
) -> Result<()> {
    let mut app = ui::App::new(registry, adopter, config.center_name.clone(), today);
    ui::run_ui(&mut app)?;

    for certificate in &app.adoptions {
        println!("{}", certificate);
    }
    println!("✅ {} adoption(s) completed", app.adoptions.len());

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(
    _registry: ShelterRegistry,
    _adopter: Adopter,
    _config: &ShelterConfig,
    _today: NaiveDate,
) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the console: shelter-queue adopt");
    std::process::exit(1);
}
