use anvil_core::{AutoSlot, Device, DeviceEvent, Slot};
use anvil_world::{load_content, load_scenario, CatalogRepair};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "anvil_cli", about = "Automated anvil tick driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario for a fixed number of ticks.
    Run {
        #[arg(long)]
        scenario: PathBuf,
        #[arg(long, default_value_t = 400)]
        ticks: u64,
        #[arg(long, default_value = "./content")]
        content_dir: String,
        #[arg(long, default_value_t = 40)]
        print_every: u64,
        /// Resume from a saved device record instead of the scenario's device setup.
        #[arg(long)]
        resume: Option<PathBuf>,
        /// Write the final device record to this JSON file.
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

struct RunArgs {
    scenario: PathBuf,
    ticks: u64,
    content_dir: String,
    print_every: u64,
    resume: Option<PathBuf>,
    save: Option<PathBuf>,
}

fn read_record(path: &Path) -> Result<anvil_core::DeviceRecord> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading device record: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("parsing device record: {}", path.display()))
}

fn write_record(path: &Path, device: &Device) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, &device.save())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn run(args: RunArgs) -> Result<()> {
    let content = load_content(&args.content_dir)?;
    let scenario = load_scenario(&args.scenario)?;

    let mut device = match &args.resume {
        Some(path) => Device::from_record(content.constants.clone(), &read_record(path)?),
        None => scenario.build_device(&content)?,
    };
    let mut world = scenario.build_world(&content)?;
    let calculator = CatalogRepair::new(&content);

    println!(
        "Starting scenario '{}': ticks={} content_version={} tank_capacity={}",
        scenario.name,
        args.ticks,
        content.content_version,
        device.tank().capacity(),
    );
    println!("{}", "-".repeat(80));

    let mut repairs = 0u64;
    for _ in 0..args.ticks {
        let events = device.tick(&mut world, &calculator);

        // Print notable events regardless of print_every.
        for envelope in &events {
            if let DeviceEvent::AnvilUsed { .. } = envelope.event {
                repairs += 1;
                println!("*** REPAIR at tick={:04} ***", envelope.tick);
            }
        }

        if args.print_every > 0 && device.ticks_elapsed() % args.print_every == 0 {
            print_status(&device);
        }
    }

    println!("{}", "-".repeat(80));
    println!("Done after {} ticks, {repairs} repairs:", device.ticks_elapsed());
    print_status(&device);

    if let Some(path) = &args.save {
        write_record(path, &device)?;
        println!("Device record written to {}", path.display());
    }

    Ok(())
}

fn slot_label(device: &Device, slot: Slot) -> String {
    match device.inventory().get(slot) {
        Some(stack) if stack.damage > 0 => format!("{}x{}(dmg {})", stack.item, stack.count, stack.damage),
        Some(stack) => format!("{}x{}", stack.item, stack.count),
        None => "-".to_string(),
    }
}

fn print_status(device: &Device) {
    let auto: Vec<String> = AutoSlot::ALL
        .into_iter()
        .filter(|slot| device.auto_flag(*slot))
        .map(|slot| format!("{slot:?}"))
        .collect();
    println!(
        "[tick={tick:04}]  tank={tank:5}/{capacity}  cooldown={cooldown:3}  \
         tool={tool}  modifier={modifier}  output={output}  auto=[{auto}]",
        tick = device.ticks_elapsed(),
        tank = device.tank().amount(),
        capacity = device.tank().capacity(),
        cooldown = device.cooldown(),
        tool = slot_label(device, Slot::Tool),
        modifier = slot_label(device, Slot::Modifier),
        output = slot_label(device, Slot::Output),
        auto = auto.join(", "),
    );
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            scenario,
            ticks,
            content_dir,
            print_every,
            resume,
            save,
        } => {
            run(RunArgs {
                scenario,
                ticks,
                content_dir,
                print_every,
                resume,
                save,
            })?;
        }
    }
    Ok(())
}
