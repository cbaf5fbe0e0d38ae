use ios_device_info::{
    device::DeviceInfo,
    util::{
        self,
        cli::{Report, Reportable as _},
    },
};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "device-info",
    about = "Inspect the Apple device models this Mac knows about"
)]
struct Args {
    #[structopt(short = "v", long = "verbose", help = "Makes life louder")]
    verbose: bool,
    #[structopt(subcommand)]
    subcommand: Subcommand,
}

#[derive(Debug, StructOpt)]
enum Subcommand {
    #[structopt(name = "list", about = "List every device model in the UTI database")]
    List {
        #[structopt(long = "json", help = "Emit the device list as JSON")]
        json: bool,
    },
    #[structopt(name = "name", about = "Resolve a model identifier to a device name")]
    Name {
        #[structopt(help = "A model identifier, such as \"iPhone8,1\"")]
        identifier: String,
        #[structopt(long = "short", help = "Strip model numbers and cellular details")]
        short: bool,
    },
}

fn log_init(verbose: bool) {
    use env_logger::{Builder, Env};
    let default_level = if verbose { "info" } else { "warn" };
    let env = Env::default().default_filter_or(default_level);
    Builder::from_env(env).init();
}

fn run(args: Args) -> Result<(), Report> {
    let info = DeviceInfo::new().map_err(|err| err.report())?;
    match args.subcommand {
        Subcommand::List { json } => {
            if json {
                let list = serde_json::to_string_pretty(info.devices())
                    .map_err(|err| Report::error("Failed to serialize device list", err))?;
                println!("{}", list);
            } else {
                for device in info.devices() {
                    let name = info.name_for_device(device.identifier());
                    if device.colors().is_empty() {
                        println!("{} ({})", name, device.identifier());
                    } else {
                        println!(
                            "{} ({}) in {}",
                            name,
                            device.identifier(),
                            util::list_display(device.colors())
                        );
                    }
                }
            }
        }
        Subcommand::Name { identifier, short } => {
            let name = if short {
                info.short_name_for_device(&identifier)
            } else {
                info.name_for_device(&identifier)
            };
            println!("{}", name);
        }
    }
    Ok(())
}

fn main() {
    let args = Args::from_args();
    log_init(args.verbose);
    if let Err(report) = run(args) {
        report.print(&util::cli::wrapper());
        std::process::exit(1);
    }
}
